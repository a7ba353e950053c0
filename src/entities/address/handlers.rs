//! Address HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Json, Response},
};
use serde_json::Value;

use super::dto::{CreateAddressDto, UpdateAddressDto};
use crate::core::error::EntityError;
use crate::core::{ApiResult, IncludeQuery, PageQuery, ValidatedJson};
use crate::entities::{CatalogState, RELATIONS, created};

pub async fn create_address(
    State(state): State<CatalogState>,
    ValidatedJson(dto): ValidatedJson<CreateAddressDto>,
) -> ApiResult<Response> {
    let address = state.addresses.create(dto.into_address()).await?;
    tracing::info!(address_id = address.id, "address created");

    let body = state.default_visibility.render(&address, RELATIONS)?;
    Ok(created(&address, body))
}

pub async fn list_addresses(
    State(state): State<CatalogState>,
    Query(params): Query<PageQuery>,
) -> ApiResult<Json<Value>> {
    let addresses = state
        .addresses
        .list(params.page(state.items_per_page))
        .await?;
    let visibility = state.visibility_for(&params.includes());
    Ok(Json(visibility.render_all(&addresses, RELATIONS)?))
}

pub async fn get_address(
    State(state): State<CatalogState>,
    Path(id): Path<i64>,
    Query(params): Query<IncludeQuery>,
) -> ApiResult<Json<Value>> {
    let address = state
        .addresses
        .get(&id)
        .await?
        .ok_or_else(|| EntityError::not_found("address", id))?;
    let visibility = state.visibility_for(&params.includes());
    Ok(Json(visibility.render(&address, RELATIONS)?))
}

pub async fn update_address(
    State(state): State<CatalogState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateAddressDto>,
) -> ApiResult<StatusCode> {
    let mut address = state
        .addresses
        .get(&id)
        .await?
        .ok_or_else(|| EntityError::not_found("address", id))?;
    dto.apply(&mut address);

    state
        .addresses
        .update(&id, address)
        .await?
        .ok_or_else(|| EntityError::not_found("address", id))?;
    tracing::info!(address_id = id, "address updated");
    Ok(StatusCode::NO_CONTENT)
}
