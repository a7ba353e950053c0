//! Entity descriptor for Cinema

use axum::{Router, routing::get};

use super::handlers::{create_cinema, get_cinema, list_cinemas, update_cinema};
use crate::entities::CatalogState;
use crate::server::EntityDescriptor;

/// Descriptor for the Cinema entity
pub struct CinemaDescriptor {
    pub state: CatalogState,
}

impl CinemaDescriptor {
    pub fn new(state: CatalogState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for CinemaDescriptor {
    fn entity_type(&self) -> &str {
        "cinema"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/cinema", get(list_cinemas).post(create_cinema))
            .route("/cinema/{id}", get(get_cinema).put(update_cinema))
            .with_state(self.state.clone())
    }
}
