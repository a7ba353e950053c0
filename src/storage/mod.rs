//! Storage implementations for different backends

#[cfg(feature = "in-memory")]
pub mod in_memory;
#[cfg(feature = "mysql")]
pub mod mysql;

#[cfg(feature = "in-memory")]
pub use in_memory::{InMemoryCatalog, InMemoryUserStore};
#[cfg(feature = "mysql")]
pub use mysql::{MysqlCatalog, MysqlUserStore};
