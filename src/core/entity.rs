//! Entity trait defining the core abstraction for catalog rows

use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Base trait for every persisted catalog type.
///
/// An entity knows:
/// - the route segment it is served under (`resource_name`)
/// - its primary key (`key`), which may be composite
/// - which of its serialized properties are relationships (`relations`)
///
/// Relationship properties are never loaded implicitly. They stay empty
/// until a handler loads them on request, and the visibility filter strips
/// them from responses unless they are kept.
pub trait Entity: Clone + Serialize + Send + Sync + 'static {
    /// Primary key type
    type Key: Clone + Eq + Hash + Ord + Debug + Display + Send + Sync + 'static;

    /// Route segment and entity type name (e.g. "movie", "cinema")
    fn resource_name() -> &'static str;

    /// Get the primary key of this entity instance
    fn key(&self) -> Self::Key;

    /// Serialized names of the relationship properties
    fn relations() -> &'static [&'static str] {
        &[]
    }

    /// Path of this entity, used for `Location` headers
    fn location(&self) -> String {
        format!("/{}/{}", Self::resource_name(), self.key())
    }
}
