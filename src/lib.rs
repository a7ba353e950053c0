//! # cine-rs
//!
//! REST APIs for a small cinema catalog (addresses, cinemas, movies and
//! the sessions linking them) plus a user identity service with bearer
//! tokens.
//!
//! ## Features
//!
//! - **Explicit registration**: every handler group is an
//!   [`EntityDescriptor`](server::EntityDescriptor) registered on a
//!   [`ServerBuilder`](server::ServerBuilder)
//! - **Opt-in relationships**: `include=address,sessions` loads and emits
//!   relationship properties; they are hidden otherwise
//! - **Validated bodies**: `validator` rules on every DTO, reported per field
//! - **JSON Patch**: RFC 6902 partial updates for movies
//! - **Identity**: Argon2id passwords, lockout after repeated failures,
//!   HS256 tokens valid for seven days
//! - **Pluggable storage**: in-memory (default) or MySQL (`mysql` feature)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cine::prelude::*;
//!
//! let mut config = AppConfig::default();
//! config.auth.signing_key = Some("change-me".into());
//!
//! let host = ServerHost::new(
//!     config,
//!     Arc::new(InMemoryCatalog::new()),
//!     Arc::new(InMemoryUserStore::new()),
//! )?;
//! host.seed().await?;
//! host.builder().serve("127.0.0.1:3000").await?;
//! ```

pub mod auth;
pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ApiError, ApiResult, DataService, Entity, FieldVisibility, IncludeQuery, Page,
        PageQuery, PatchDocument, RelationService, UserStore, ValidatedJson,
    };

    // === Entities ===
    pub use crate::entities::{
        Address, CatalogState, Cinema, Movie, RELATIONS, Session, SessionKey,
    };

    // === Auth ===
    pub use crate::auth::{AuthService, AuthState, Authenticated, Claims, Role, User};

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::{InMemoryCatalog, InMemoryUserStore};
    #[cfg(feature = "mysql")]
    pub use crate::storage::{MysqlCatalog, MysqlUserStore};

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{EntityDescriptor, EntityRegistry, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
