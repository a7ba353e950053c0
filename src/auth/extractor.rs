//! Bearer token extractor

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;

use super::model::Claims;
use super::service::AuthService;
use super::token::extract_bearer_token;
use crate::core::error::{ApiError, AuthError};

/// State shared by the identity handlers
#[derive(Clone)]
pub struct AuthState {
    pub service: Arc<AuthService>,
}

/// Claims of a request carrying a valid `Authorization: Bearer` token
///
/// Rejects with 401 when the header is missing, malformed, expired or
/// signed with another key.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Claims);

impl std::ops::Deref for Authenticated {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Authenticated
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthState::from_ref(state);

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(extract_bearer_token)
            .ok_or_else(|| AuthError::unauthorized("Missing authentication token"))?;

        let claims = auth.service.tokens().verify(token)?;
        Ok(Authenticated(claims))
    }
}
