use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::services::sync_service;
use crate::state::AppState;

pub async fn trigger_sync(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    tracing::info!("Manual sync triggered");
    sync_service::sync_from_github(&state).await?;
    Ok(Json(json!({ "success": true, "message": "Sync completed" })))
}

pub async fn clear_cache(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    tracing::info!("Cache clear triggered");
    sync_service::clear_and_sync(&state).await?;
    Ok(Json(json!({ "success": true, "message": "Cache cleared and re-synced" })))
}
