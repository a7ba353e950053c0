//! Identity HTTP handlers

use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};

use super::dto::{LoginDto, SessionUser, SignUpDto};
use super::extractor::{AuthState, Authenticated};
use super::model::User;
use crate::core::validation::invalid_json;
use crate::core::{ApiResult, ValidatedJson};

/// The service validates the body itself so password policy violations
/// are reported alongside the DTO rules.
pub async fn sign_up(
    State(state): State<AuthState>,
    payload: Result<Json<SignUpDto>, JsonRejection>,
) -> ApiResult<Json<SessionUser>> {
    let Json(dto) = payload.map_err(invalid_json)?;
    Ok(Json(state.service.sign_up(dto).await?))
}

pub async fn login(
    State(state): State<AuthState>,
    ValidatedJson(dto): ValidatedJson<LoginDto>,
) -> ApiResult<Json<SessionUser>> {
    Ok(Json(state.service.login(dto).await?))
}

pub async fn me(
    State(state): State<AuthState>,
    Authenticated(claims): Authenticated,
) -> ApiResult<Json<User>> {
    Ok(Json(state.service.profile(&claims).await?))
}
