//! Request validation
//!
//! DTOs declare their rules with `validator` attributes; the
//! [`ValidatedJson`] extractor runs them before handlers execute and turns
//! failures into 400 responses with per-field messages.

pub mod extractor;
pub mod validators;

pub use extractor::{ValidatedJson, invalid_json, validate};
