//! Core module containing fundamental traits and types shared by every API

pub mod entity;
pub mod error;
pub mod patch;
pub mod query;
pub mod service;
pub mod validation;
pub mod visibility;

pub use entity::Entity;
pub use error::{ApiError, ApiResult};
pub use patch::{PatchDocument, PatchOperation};
pub use query::{IncludeQuery, ITEMS_PER_PAGE, Page, PageQuery};
pub use service::{DataService, RelationService, UserStore};
pub use validation::ValidatedJson;
pub use visibility::FieldVisibility;
