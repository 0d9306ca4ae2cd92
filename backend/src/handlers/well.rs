//! Well HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::well::{CreateWellInput, Well, WellService};
use crate::AppState;

/// List the wells of a ranch
pub async fn list_wells(
    State(state): State<AppState>,
    Path(ranch_id): Path<Uuid>,
) -> AppResult<Json<Vec<Well>>> {
    let service = WellService::new(state.db);
    let wells = service.get_wells(ranch_id).await?;
    Ok(Json(wells))
}

/// Add a well to a ranch
pub async fn create_well(
    State(state): State<AppState>,
    Path(ranch_id): Path<Uuid>,
    Json(input): Json<CreateWellInput>,
) -> AppResult<impl IntoResponse> {
    let service = WellService::new(state.db);
    let well = service.create_well(ranch_id, input).await?;
    Ok((StatusCode::CREATED, Json(well)))
}
