//! Irrigation history HTTP handlers

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::history::{BlockHistory, HistoryService};
use crate::AppState;

/// History of a block with this week's usage
pub async fn get_block_history(
    State(state): State<AppState>,
    Path(block_id): Path<Uuid>,
) -> AppResult<Json<BlockHistory>> {
    let service = HistoryService::new(state.db);
    let history = service
        .get_block_history(block_id, Utc::now().date_naive())
        .await?;
    Ok(Json(history))
}
