//! Cinema HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Json, Response},
};
use serde::Deserialize;
use serde_json::Value;

use super::dto::{CreateCinemaDto, UpdateCinemaDto};
use super::model::Cinema;
use crate::core::error::{EntityError, ValidationError};
use crate::core::{ApiResult, FieldVisibility, IncludeQuery, PageQuery, ValidatedJson};
use crate::entities::{CatalogState, RELATIONS, created};

/// `GET /cinema` parameters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CinemaQuery {
    pub page: Option<i64>,
    pub include: Option<String>,
    /// Only the cinema located at this address
    pub address_id: Option<i64>,
}

impl CinemaQuery {
    fn paging(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            include: self.include.clone(),
        }
    }
}

async fn load_relations(
    state: &CatalogState,
    cinema: &mut Cinema,
    visibility: &FieldVisibility,
) -> ApiResult<()> {
    if visibility.keeps("address") {
        cinema.address = state.addresses.get(&cinema.address_id).await?;
    }
    if visibility.keeps("sessions") {
        cinema.sessions = Some(state.relations.sessions_for_cinema(cinema.id).await?);
    }
    Ok(())
}

/// The address must exist and must not already host another cinema
async fn check_address(state: &CatalogState, address_id: i64, cinema_id: Option<i64>) -> ApiResult<()> {
    if state.addresses.get(&address_id).await?.is_none() {
        return Err(ValidationError::invalid_reference(
            "addressId",
            format!("address {} does not exist", address_id),
        )
        .into());
    }
    if let Some(existing) = state.relations.cinema_at_address(address_id).await? {
        if Some(existing.id) != cinema_id {
            return Err(EntityError::already_exists("cinema", format!("addressId={}", address_id)).into());
        }
    }
    Ok(())
}

pub async fn create_cinema(
    State(state): State<CatalogState>,
    ValidatedJson(dto): ValidatedJson<CreateCinemaDto>,
) -> ApiResult<Response> {
    let cinema = dto.into_cinema();
    check_address(&state, cinema.address_id, None).await?;

    let cinema = state.cinemas.create(cinema).await?;
    tracing::info!(cinema_id = cinema.id, address_id = cinema.address_id, "cinema created");

    let body = state.default_visibility.render(&cinema, RELATIONS)?;
    Ok(created(&cinema, body))
}

pub async fn list_cinemas(
    State(state): State<CatalogState>,
    Query(params): Query<CinemaQuery>,
) -> ApiResult<Json<Value>> {
    let paging = params.paging();
    let page = paging.page(state.items_per_page);

    let mut cinemas = match params.address_id {
        Some(address_id) => state.relations.cinemas_at_address(address_id, page).await?,
        None => state.cinemas.list(page).await?,
    };

    let visibility = state.visibility_for(&paging.includes());
    for cinema in &mut cinemas {
        load_relations(&state, cinema, &visibility).await?;
    }
    Ok(Json(visibility.render_all(&cinemas, RELATIONS)?))
}

pub async fn get_cinema(
    State(state): State<CatalogState>,
    Path(id): Path<i64>,
    Query(params): Query<IncludeQuery>,
) -> ApiResult<Json<Value>> {
    let mut cinema = state
        .cinemas
        .get(&id)
        .await?
        .ok_or_else(|| EntityError::not_found("cinema", id))?;
    let visibility = state.visibility_for(&params.includes());
    load_relations(&state, &mut cinema, &visibility).await?;
    Ok(Json(visibility.render(&cinema, RELATIONS)?))
}

pub async fn update_cinema(
    State(state): State<CatalogState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateCinemaDto>,
) -> ApiResult<StatusCode> {
    let mut cinema = state
        .cinemas
        .get(&id)
        .await?
        .ok_or_else(|| EntityError::not_found("cinema", id))?;

    if let Some(address_id) = dto.address_id {
        if address_id != cinema.address_id {
            check_address(&state, address_id, Some(id)).await?;
        }
    }
    dto.apply(&mut cinema);

    state
        .cinemas
        .update(&id, cinema)
        .await?
        .ok_or_else(|| EntityError::not_found("cinema", id))?;
    tracing::info!(cinema_id = id, "cinema updated");
    Ok(StatusCode::NO_CONTENT)
}
