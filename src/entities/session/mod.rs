//! Session entity module

pub mod descriptor;
pub mod dto;
pub mod handlers;
pub mod model;

pub use descriptor::SessionDescriptor;
pub use handlers::*;
pub use model::{Session, SessionKey};
