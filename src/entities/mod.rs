//! Catalog entities: addresses, cinemas, movies and sessions
//!
//! Each entity lives in its own module with the same layout:
//! - `model`: the persisted type and its [`Entity`] impl
//! - `dto`: request bodies and their validation rules
//! - `handlers`: axum handlers over [`CatalogState`]
//! - `descriptor`: the [`EntityDescriptor`](crate::server::EntityDescriptor) wiring routes

pub mod address;
pub mod cinema;
pub mod movie;
pub mod session;

pub use address::Address;
pub use cinema::Cinema;
pub use movie::Movie;
pub use session::{Session, SessionKey};

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

use crate::core::{DataService, Entity, FieldVisibility, RelationService};

/// Every relationship property name across the catalog
///
/// Responses are filtered against this full set so nested entities (a
/// cinema inside a session, say) obey the same keep-list.
pub const RELATIONS: &[&str] = &["address", "cinema", "movie", "sessions"];

/// Shared state for every catalog handler
#[derive(Clone)]
pub struct CatalogState {
    pub addresses: Arc<dyn DataService<Address>>,
    pub cinemas: Arc<dyn DataService<Cinema>>,
    pub movies: Arc<dyn DataService<Movie>>,
    pub sessions: Arc<dyn DataService<Session>>,
    pub relations: Arc<dyn RelationService>,
    /// Relationship names emitted on every response
    pub default_visibility: FieldVisibility,
    pub items_per_page: usize,
}

impl CatalogState {
    /// Build the state from a backend implementing every catalog service
    pub fn from_backend<B>(
        backend: Arc<B>,
        default_visibility: FieldVisibility,
        items_per_page: usize,
    ) -> Self
    where
        B: DataService<Address>
            + DataService<Cinema>
            + DataService<Movie>
            + DataService<Session>
            + RelationService
            + 'static,
    {
        Self {
            addresses: backend.clone(),
            cinemas: backend.clone(),
            movies: backend.clone(),
            sessions: backend.clone(),
            relations: backend,
            default_visibility,
            items_per_page,
        }
    }

    /// Effective keep-list for a request: server defaults plus `include`
    pub fn visibility_for(&self, includes: &[String]) -> FieldVisibility {
        self.default_visibility
            .merged(&FieldVisibility::new(includes))
    }
}

/// `201 Created` with a `Location` header pointing at the new entity
pub(crate) fn created<T: Entity>(entity: &T, body: Value) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, entity.location())],
        Json(body),
    )
        .into_response()
}
