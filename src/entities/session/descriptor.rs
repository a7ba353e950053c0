//! Entity descriptor for Session

use axum::{Router, routing::get};

use super::handlers::{create_session, get_session, list_sessions, update_session};
use crate::entities::CatalogState;
use crate::server::EntityDescriptor;

/// Descriptor for the Session entity
pub struct SessionDescriptor {
    pub state: CatalogState,
}

impl SessionDescriptor {
    pub fn new(state: CatalogState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for SessionDescriptor {
    fn entity_type(&self) -> &str {
        "session"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/session", get(list_sessions).post(create_session))
            .route(
                "/session/{cinema_id}/{movie_id}",
                get(get_session).put(update_session),
            )
            .with_state(self.state.clone())
    }
}
