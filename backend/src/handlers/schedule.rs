//! Scheduling HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::schedule::{
    ApplyScheduleInput, CalculationPreview, CalculationPreviewInput, SchedulePlan,
    ScheduleService,
};
use crate::AppState;

/// Apply one schedule to several blocks of a ranch
pub async fn apply_schedule(
    State(state): State<AppState>,
    Path(ranch_id): Path<Uuid>,
    Json(input): Json<ApplyScheduleInput>,
) -> AppResult<impl IntoResponse> {
    let service = ScheduleService::new(state.db.clone(), state.calculator());
    let today = Utc::now().date_naive();
    let summary = service.apply_schedule(ranch_id, input, today).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// Every block of a ranch with its latest schedule
pub async fn get_schedule_plan(
    State(state): State<AppState>,
    Path(ranch_id): Path<Uuid>,
) -> AppResult<Json<SchedulePlan>> {
    let service = ScheduleService::new(state.db.clone(), state.calculator());
    let plan = service.get_schedule_plan(ranch_id).await?;
    Ok(Json(plan))
}

/// Preview a block's irrigation time without saving
pub async fn calculate(
    State(state): State<AppState>,
    Json(input): Json<CalculationPreviewInput>,
) -> AppResult<Json<CalculationPreview>> {
    let service = ScheduleService::new(state.db.clone(), state.calculator());
    let preview = service.preview(input).await?;
    Ok(Json(preview))
}
