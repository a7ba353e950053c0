//! Typed error handling for the catalog and identity APIs
//!
//! Every error that reaches the HTTP boundary is an [`ApiError`]. Each
//! category carries its own HTTP status and a stable machine-readable code so
//! clients can branch on `code` instead of parsing messages.
//!
//! # Error Categories
//!
//! - [`EntityError`]: missing or conflicting catalog rows
//! - [`ValidationError`]: DTO and payload validation
//! - [`AuthError`]: credentials, lockout and bearer tokens
//! - [`StorageError`]: storage backend failures
//! - [`ConfigError`]: configuration loading, reported at startup rather than
//!   over HTTP
//!
//! # Example
//!
//! ```rust,ignore
//! async fn get_movie(id: i64) -> ApiResult<Movie> {
//!     movies.get(&id).await?.ok_or_else(|| EntityError::not_found("movie", id).into())
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type returned by every handler
#[derive(Debug, Error)]
pub enum ApiError {
    /// Entity-related errors (CRUD operations)
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Authentication errors
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Sign-up could not be completed by the identity store
    #[error("Unknown error occurred")]
    SignUpFailed,

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Entity(e) => e.status_code(),
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::SignUpFailed => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Entity(e) => e.error_code(),
            ApiError::Validation(e) => e.error_code(),
            ApiError::Auth(e) => e.error_code(),
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::SignUpFailed => "SIGNUP_FAILED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Entity(EntityError::NotFound { entity_type, key })
            | ApiError::Entity(EntityError::AlreadyExists { entity_type, key }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "key": key,
                }))
            }
            ApiError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            ApiError::Validation(ValidationError::InvalidReference { field, .. }) => {
                Some(serde_json::json!({ "field": field }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity operations
#[derive(Debug, Error)]
pub enum EntityError {
    /// Entity was not found
    #[error("{entity_type} with key '{key}' not found")]
    NotFound { entity_type: String, key: String },

    /// Entity already exists (conflict)
    #[error("{entity_type} with key '{key}' already exists")]
    AlreadyExists { entity_type: String, key: String },
}

impl EntityError {
    pub fn not_found(entity_type: &str, key: impl ToString) -> Self {
        EntityError::NotFound {
            entity_type: entity_type.to_string(),
            key: key.to_string(),
        }
    }

    pub fn already_exists(entity_type: &str, key: impl ToString) -> Self {
        EntityError::AlreadyExists {
            entity_type: entity_type.to_string(),
            key: key.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::AlreadyExists { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more field-level rule violations
    #[error("Validation errors: {}", join_fields(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Body could not be parsed as the expected JSON shape
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    /// JSON Patch document could not be applied
    #[error("Invalid patch: {message}")]
    InvalidPatch { message: String },

    /// A foreign key names a row that does not exist
    #[error("Invalid reference in '{field}': {message}")]
    InvalidReference { field: String, message: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn join_fields(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::FieldErrors(vec![FieldValidationError::new(field, message)])
    }

    pub fn invalid_reference(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidReference {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
            ValidationError::InvalidPatch { .. } => "INVALID_PATCH",
            ValidationError::InvalidReference { .. } => "INVALID_REFERENCE",
        }
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Errors related to authentication
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Too many failed attempts, account temporarily locked
    #[error("Account is locked out")]
    LockedOut,

    /// Missing, malformed or expired bearer token
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },
}

impl AuthError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        AuthError::Unauthorized {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::LockedOut => "LOCKED_OUT",
            AuthError::Unauthorized { .. } => "UNAUTHORIZED",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Query execution error
    #[error("Storage query error: {message}")]
    QueryError { message: String },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file
    #[error("Failed to parse config file '{file}': {message}")]
    ParseError { file: String, message: String },

    /// Missing required setting
    #[error("Missing required setting '{field}'")]
    MissingField { field: String },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

// =============================================================================
// Conversions from external errors
// =============================================================================

/// Store traits return `anyhow::Result`. A store may report a key conflict
/// it detected itself as an [`EntityError`]; anything else is a storage
/// failure.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<EntityError>() {
            Ok(entity) => ApiError::Entity(entity),
            Err(err) => ApiError::Storage(StorageError::QueryError {
                message: err.to_string(),
            }),
        }
    }
}

/// A specialized Result type for handler operations
pub type ApiResult<T> = Result<T, ApiError>;
