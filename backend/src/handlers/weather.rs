//! Weather lookup handler

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::external::WeatherClient;
use crate::AppState;

/// Query parameters for weather lookups
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub location: String,
}

/// Current weather for a location from the configured provider
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> AppResult<Json<serde_json::Value>> {
    if query.location.trim().is_empty() {
        return Err(AppError::validation("location", "Location cannot be empty"));
    }

    let client = WeatherClient::new(&state.config.weather);
    let data = client.get_weather_data(query.location.trim()).await?;
    Ok(Json(data))
}
