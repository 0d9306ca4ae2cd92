//! Ranch and irrigation set HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::ranch::{
    CreateRanchInput, CreateSetInput, IrrigationSet, Ranch, RanchAllocation, RanchDetail,
    RanchService,
};
use crate::AppState;

/// List all ranches
pub async fn list_ranches(State(state): State<AppState>) -> AppResult<Json<Vec<Ranch>>> {
    let service = RanchService::new(state.db);
    let ranches = service.get_ranches().await?;
    Ok(Json(ranches))
}

/// Get a ranch with its sets and blocks
pub async fn get_ranch(
    State(state): State<AppState>,
    Path(ranch_id): Path<Uuid>,
) -> AppResult<Json<RanchDetail>> {
    let service = RanchService::new(state.db);
    let ranch = service.get_ranch_detail(ranch_id).await?;
    Ok(Json(ranch))
}

/// Create a new ranch
pub async fn create_ranch(
    State(state): State<AppState>,
    Json(input): Json<CreateRanchInput>,
) -> AppResult<impl IntoResponse> {
    let service = RanchService::new(state.db);
    let ranch = service.create_ranch(input).await?;
    Ok((StatusCode::CREATED, Json(ranch)))
}

/// List the irrigation sets of a ranch
pub async fn list_sets(
    State(state): State<AppState>,
    Path(ranch_id): Path<Uuid>,
) -> AppResult<Json<Vec<IrrigationSet>>> {
    let service = RanchService::new(state.db);
    let sets = service.get_sets(ranch_id).await?;
    Ok(Json(sets))
}

/// Add an irrigation set to a ranch
pub async fn create_set(
    State(state): State<AppState>,
    Path(ranch_id): Path<Uuid>,
    Json(input): Json<CreateSetInput>,
) -> AppResult<impl IntoResponse> {
    let service = RanchService::new(state.db);
    let set = service.create_set(ranch_id, input).await?;
    Ok((StatusCode::CREATED, Json(set)))
}

/// Metered usage against the ranch's allocation
pub async fn get_allocation(
    State(state): State<AppState>,
    Path(ranch_id): Path<Uuid>,
) -> AppResult<Json<RanchAllocation>> {
    let service = RanchService::new(state.db);
    let allocation = service.get_allocation_status(ranch_id).await?;
    Ok(Json(allocation))
}
