//! Movie entity module

pub mod descriptor;
pub mod dto;
pub mod handlers;
pub mod model;

pub use descriptor::MovieDescriptor;
pub use handlers::*;
pub use model::Movie;
