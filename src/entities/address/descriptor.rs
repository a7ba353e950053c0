//! Entity descriptor for Address

use axum::{Router, routing::get};

use super::handlers::{create_address, get_address, list_addresses, update_address};
use crate::entities::CatalogState;
use crate::server::EntityDescriptor;

/// Descriptor for the Address entity
pub struct AddressDescriptor {
    pub state: CatalogState,
}

impl AddressDescriptor {
    pub fn new(state: CatalogState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for AddressDescriptor {
    fn entity_type(&self) -> &str {
        "address"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/address", get(list_addresses).post(create_address))
            .route("/address/{id}", get(get_address).put(update_address))
            .with_state(self.state.clone())
    }
}
