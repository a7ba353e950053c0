//! Axum extractor for validated DTOs
//!
//! This module provides the `ValidatedJson<T>` extractor that deserializes a
//! request body and runs its declarative rules before the handler sees it.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::validators::collect_errors;
use crate::core::error::{ApiError, ValidationError};

/// Axum extractor that deserializes and validates a JSON body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_movie(
///     ValidatedJson(dto): ValidatedJson<CreateMovieDto>,
/// ) -> ApiResult<Response> {
///     // dto already passed every rule
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    /// Get the inner DTO
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(invalid_json)?;

        validate(&payload)?;
        Ok(ValidatedJson(payload))
    }
}

/// A body that could not be parsed into the expected shape
pub fn invalid_json(rejection: JsonRejection) -> ApiError {
    ApiError::Validation(ValidationError::InvalidJson {
        message: rejection.body_text(),
    })
}

/// Run a DTO's rules, mapping failures to field errors
pub fn validate<T: Validate>(dto: &T) -> Result<(), ApiError> {
    dto.validate()
        .map_err(|errors| ApiError::Validation(ValidationError::FieldErrors(collect_errors(&errors))))
}
