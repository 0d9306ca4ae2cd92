//! Water meter reading HTTP handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::WaterMeterReading;
use crate::services::meter_reading::{CreateMeterReadingInput, MeterReadingService};
use crate::AppState;

/// Query parameters for listing readings
#[derive(Debug, Deserialize)]
pub struct MeterReadingQuery {
    pub ranch_id: Uuid,
}

/// List the meter readings of a ranch
pub async fn list_meter_readings(
    State(state): State<AppState>,
    Query(query): Query<MeterReadingQuery>,
) -> AppResult<Json<Vec<WaterMeterReading>>> {
    let service = MeterReadingService::new(state.db);
    let readings = service.get_readings(query.ranch_id).await?;
    Ok(Json(readings))
}

/// Record a meter reading
pub async fn create_meter_reading(
    State(state): State<AppState>,
    Json(input): Json<CreateMeterReadingInput>,
) -> AppResult<impl IntoResponse> {
    let service = MeterReadingService::new(state.db);
    let reading = service.create_reading(input).await?;
    Ok((StatusCode::CREATED, Json(reading)))
}
