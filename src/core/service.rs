//! Service traits for catalog and identity storage

use crate::auth::model::User;
use crate::core::entity::Entity;
use crate::core::query::Page;
use crate::entities::{Cinema, Movie, Session};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for managing catalog entities
///
/// Implementations provide CRUD operations for a specific entity type.
/// Listings are ordered by key so pages are stable.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Persist a new entity; generated keys are assigned by the store
    async fn create(&self, entity: T) -> Result<T>;

    /// Get an entity by key
    async fn get(&self, key: &T::Key) -> Result<Option<T>>;

    /// List one page of entities
    async fn list(&self, page: Page) -> Result<Vec<T>>;

    /// Replace the entity stored under `key`
    ///
    /// The new value may carry a different key (sessions are re-keyed this
    /// way). Returns `None` when nothing is stored under `key`.
    async fn update(&self, key: &T::Key, entity: T) -> Result<Option<T>>;
}

/// Relationship queries across catalog entities
///
/// These are the explicit joins that back `include` and the filtered
/// listings; nothing is fetched unless one of them is called.
#[async_trait]
pub trait RelationService: Send + Sync {
    /// The cinema located at an address, if any
    async fn cinema_at_address(&self, address_id: i64) -> Result<Option<Cinema>>;

    /// Sessions screening a movie
    async fn sessions_for_movie(&self, movie_id: i64) -> Result<Vec<Session>>;

    /// Sessions hosted by a cinema
    async fn sessions_for_cinema(&self, cinema_id: i64) -> Result<Vec<Session>>;

    /// Movies with at least one session in a cinema whose name contains `name`
    async fn movies_showing_at(&self, name: &str, page: Page) -> Result<Vec<Movie>>;

    /// Cinemas located at an address
    async fn cinemas_at_address(&self, address_id: i64, page: Page) -> Result<Vec<Cinema>>;
}

/// Identity store for users and roles
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user; fails when the email is already taken
    async fn create(&self, user: User) -> Result<User>;

    /// Get a user by id
    async fn get(&self, id: &Uuid) -> Result<Option<User>>;

    /// Find a user by (case-insensitive) email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Persist lockout bookkeeping after a login attempt
    async fn update(&self, user: &User) -> Result<()>;

    /// Names of the roles known to the store
    async fn roles(&self) -> Result<Vec<String>>;

    /// Register a role name (no-op when it exists)
    async fn create_role(&self, name: &str) -> Result<()>;
}
