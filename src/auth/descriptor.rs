//! Route descriptor for the identity endpoints

use axum::{
    Router,
    routing::{get, post},
};

use super::extractor::AuthState;
use super::handlers::{login, me, sign_up};
use crate::server::EntityDescriptor;

pub struct AuthDescriptor {
    pub state: AuthState,
}

impl AuthDescriptor {
    pub fn new(state: AuthState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for AuthDescriptor {
    fn entity_type(&self) -> &str {
        "auth"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/auth/signup", post(sign_up))
            .route("/auth/login", post(login))
            .route("/me", get(me))
            .with_state(self.state.clone())
    }
}
