//! Movie HTTP handlers

use axum::{
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{Json, Response},
};
use serde::Deserialize;
use serde_json::Value;

use super::dto::{CreateMovieDto, UpdateMovieDto};
use super::model::Movie;
use crate::core::error::{EntityError, ValidationError};
use crate::core::validation::validate;
use crate::core::{
    ApiResult, FieldVisibility, IncludeQuery, PageQuery, PatchDocument, ValidatedJson,
};
use crate::entities::{CatalogState, RELATIONS, created};

/// `GET /movie` parameters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MovieQuery {
    pub page: Option<i64>,
    pub include: Option<String>,
    /// Only movies screening in a cinema whose name contains this text
    #[serde(alias = "cineName")]
    pub cinema_name: Option<String>,
}

impl MovieQuery {
    fn paging(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            include: self.include.clone(),
        }
    }
}

async fn load_relations(
    state: &CatalogState,
    movie: &mut Movie,
    visibility: &FieldVisibility,
) -> ApiResult<()> {
    if visibility.keeps("sessions") {
        movie.sessions = Some(state.relations.sessions_for_movie(movie.id).await?);
    }
    Ok(())
}

async fn find_movie(state: &CatalogState, id: i64) -> ApiResult<Movie> {
    Ok(state
        .movies
        .get(&id)
        .await?
        .ok_or_else(|| EntityError::not_found("movie", id))?)
}

pub async fn create_movie(
    State(state): State<CatalogState>,
    ValidatedJson(dto): ValidatedJson<CreateMovieDto>,
) -> ApiResult<Response> {
    let movie = state.movies.create(dto.into_movie()).await?;
    tracing::info!(movie_id = movie.id, title = %movie.title, "movie created");

    let body = state.default_visibility.render(&movie, RELATIONS)?;
    Ok(created(&movie, body))
}

pub async fn list_movies(
    State(state): State<CatalogState>,
    Query(params): Query<MovieQuery>,
) -> ApiResult<Json<Value>> {
    let paging = params.paging();
    let page = paging.page(state.items_per_page);

    let mut movies = match params.cinema_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => state.relations.movies_showing_at(name, page).await?,
        _ => state.movies.list(page).await?,
    };

    let visibility = state.visibility_for(&paging.includes());
    for movie in &mut movies {
        load_relations(&state, movie, &visibility).await?;
    }
    Ok(Json(visibility.render_all(&movies, RELATIONS)?))
}

pub async fn get_movie(
    State(state): State<CatalogState>,
    Path(id): Path<i64>,
    Query(params): Query<IncludeQuery>,
) -> ApiResult<Json<Value>> {
    let mut movie = find_movie(&state, id).await?;
    let visibility = state.visibility_for(&params.includes());
    load_relations(&state, &mut movie, &visibility).await?;
    Ok(Json(visibility.render(&movie, RELATIONS)?))
}

pub async fn update_movie(
    State(state): State<CatalogState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateMovieDto>,
) -> ApiResult<StatusCode> {
    let mut movie = find_movie(&state, id).await?;
    dto.apply(&mut movie);
    save(&state, id, movie).await?;
    tracing::info!(movie_id = id, "movie updated");
    Ok(StatusCode::NO_CONTENT)
}

/// Apply a JSON Patch to a movie
///
/// The patch runs against the movie's update DTO, and the patched DTO must
/// pass the same rules as a full update before it is stored.
pub async fn patch_movie(
    State(state): State<CatalogState>,
    Path(id): Path<i64>,
    payload: Result<Json<PatchDocument>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(patch) = payload.map_err(|e| ValidationError::InvalidPatch {
        message: e.body_text(),
    })?;

    let mut movie = find_movie(&state, id).await?;
    let dto = patch.apply_to(&UpdateMovieDto::from(&movie))?;
    validate(&dto)?;
    dto.apply(&mut movie);

    save(&state, id, movie).await?;
    tracing::info!(movie_id = id, operations = patch.0.len(), "movie patched");
    Ok(StatusCode::NO_CONTENT)
}

async fn save(state: &CatalogState, id: i64, movie: Movie) -> ApiResult<()> {
    state
        .movies
        .update(&id, movie)
        .await?
        .ok_or_else(|| EntityError::not_found("movie", id))?;
    Ok(())
}
