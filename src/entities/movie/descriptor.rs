//! Entity descriptor for Movie

use axum::{Router, routing::get};

use super::handlers::{create_movie, get_movie, list_movies, patch_movie, update_movie};
use crate::entities::CatalogState;
use crate::server::EntityDescriptor;

/// Descriptor for the Movie entity
pub struct MovieDescriptor {
    pub state: CatalogState,
}

impl MovieDescriptor {
    pub fn new(state: CatalogState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for MovieDescriptor {
    fn entity_type(&self) -> &str {
        "movie"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/movie", get(list_movies).post(create_movie))
            .route(
                "/movie/{id}",
                get(get_movie).put(update_movie).patch(patch_movie),
            )
            .with_state(self.state.clone())
    }
}
