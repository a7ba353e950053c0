//! Session HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Json, Response},
};
use serde_json::Value;

use super::dto::{CreateSessionDto, UpdateSessionDto};
use super::model::{Session, SessionKey};
use crate::core::error::{EntityError, ValidationError};
use crate::core::{ApiResult, Entity, FieldVisibility, IncludeQuery, PageQuery, ValidatedJson};
use crate::entities::{CatalogState, RELATIONS, created};

async fn load_relations(
    state: &CatalogState,
    session: &mut Session,
    visibility: &FieldVisibility,
) -> ApiResult<()> {
    if visibility.keeps("movie") {
        session.movie = state.movies.get(&session.movie_id).await?.map(Box::new);
    }
    if visibility.keeps("cinema") {
        session.cinema = state.cinemas.get(&session.cinema_id).await?.map(Box::new);
    }
    Ok(())
}

/// Both ends of the session must exist
async fn check_references(state: &CatalogState, key: SessionKey) -> ApiResult<()> {
    if state.movies.get(&key.movie_id).await?.is_none() {
        return Err(ValidationError::invalid_reference(
            "movieId",
            format!("movie {} does not exist", key.movie_id),
        )
        .into());
    }
    if state.cinemas.get(&key.cinema_id).await?.is_none() {
        return Err(ValidationError::invalid_reference(
            "cinemaId",
            format!("cinema {} does not exist", key.cinema_id),
        )
        .into());
    }
    Ok(())
}

pub async fn create_session(
    State(state): State<CatalogState>,
    ValidatedJson(dto): ValidatedJson<CreateSessionDto>,
) -> ApiResult<Response> {
    let session = dto.into_session();
    let key = session.key();
    check_references(&state, key).await?;
    if state.sessions.get(&key).await?.is_some() {
        return Err(EntityError::already_exists("session", key).into());
    }

    let session = state.sessions.create(session).await?;
    tracing::info!(cinema_id = key.cinema_id, movie_id = key.movie_id, "session created");

    let body = state.default_visibility.render(&session, RELATIONS)?;
    Ok(created(&session, body))
}

pub async fn list_sessions(
    State(state): State<CatalogState>,
    Query(params): Query<PageQuery>,
) -> ApiResult<Json<Value>> {
    let mut sessions = state
        .sessions
        .list(params.page(state.items_per_page))
        .await?;

    let visibility = state.visibility_for(&params.includes());
    for session in &mut sessions {
        load_relations(&state, session, &visibility).await?;
    }
    Ok(Json(visibility.render_all(&sessions, RELATIONS)?))
}

pub async fn get_session(
    State(state): State<CatalogState>,
    Path((cinema_id, movie_id)): Path<(i64, i64)>,
    Query(params): Query<IncludeQuery>,
) -> ApiResult<Json<Value>> {
    let key = SessionKey::new(cinema_id, movie_id);
    let mut session = state
        .sessions
        .get(&key)
        .await?
        .ok_or_else(|| EntityError::not_found("session", key))?;

    let visibility = state.visibility_for(&params.includes());
    load_relations(&state, &mut session, &visibility).await?;
    Ok(Json(visibility.render(&session, RELATIONS)?))
}

/// Re-key a session onto another movie and/or cinema
pub async fn update_session(
    State(state): State<CatalogState>,
    Path((cinema_id, movie_id)): Path<(i64, i64)>,
    ValidatedJson(dto): ValidatedJson<UpdateSessionDto>,
) -> ApiResult<StatusCode> {
    let key = SessionKey::new(cinema_id, movie_id);
    if state.sessions.get(&key).await?.is_none() {
        return Err(EntityError::not_found("session", key).into());
    }

    let target = dto.target(key);
    if target != key {
        check_references(&state, target).await?;
        if state.sessions.get(&target).await?.is_some() {
            return Err(EntityError::already_exists("session", target).into());
        }
    }

    state
        .sessions
        .update(&key, Session::new(target.cinema_id, target.movie_id))
        .await?
        .ok_or_else(|| EntityError::not_found("session", key))?;
    tracing::info!(from = %key, to = %target, "session updated");
    Ok(StatusCode::NO_CONTENT)
}
