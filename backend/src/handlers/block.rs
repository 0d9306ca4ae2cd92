//! Block HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::block::{BlockRecord, BlockService, CreateBlockInput, UpdateBlockInput};
use crate::AppState;

/// List the blocks of a ranch by set number
pub async fn list_blocks(
    State(state): State<AppState>,
    Path(ranch_id): Path<Uuid>,
) -> AppResult<Json<Vec<BlockRecord>>> {
    let service = BlockService::new(state.db);
    let blocks = service.get_blocks(ranch_id).await?;
    Ok(Json(blocks))
}

/// Create a block on a ranch
pub async fn create_block(
    State(state): State<AppState>,
    Path(ranch_id): Path<Uuid>,
    Json(input): Json<CreateBlockInput>,
) -> AppResult<impl IntoResponse> {
    let service = BlockService::new(state.db);
    let block = service.create_block(ranch_id, input).await?;
    Ok((StatusCode::CREATED, Json(block)))
}

/// Get a block
pub async fn get_block(
    State(state): State<AppState>,
    Path(block_id): Path<Uuid>,
) -> AppResult<Json<BlockRecord>> {
    let service = BlockService::new(state.db);
    let block = service.get_block(block_id).await?;
    Ok(Json(block))
}

/// Update a block
pub async fn update_block(
    State(state): State<AppState>,
    Path(block_id): Path<Uuid>,
    Json(input): Json<UpdateBlockInput>,
) -> AppResult<Json<BlockRecord>> {
    let service = BlockService::new(state.db);
    let block = service.update_block(block_id, input).await?;
    Ok(Json(block))
}
