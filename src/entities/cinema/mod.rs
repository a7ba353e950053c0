//! Cinema entity module

pub mod descriptor;
pub mod dto;
pub mod handlers;
pub mod model;

pub use descriptor::CinemaDescriptor;
pub use handlers::*;
pub use model::Cinema;
