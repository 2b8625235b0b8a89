use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::services::store_service;
use crate::state::AppState;

pub async fn health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

pub async fn api_info(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": "Timelapse API",
        "version": env!("CARGO_PKG_VERSION"),
        "github": format!("{}/{}", state.config.github_owner, state.config.github_repo),
        "routes": [
            "GET /api/index - Get timelapse index",
            "GET /api/snapshots - List snapshot hashes",
            "GET /api/snapshots/{hash} - List snapshot contents",
            "GET /api/snapshots/{hash}/{path} - Get snapshot file",
            "POST /api/sync - Sync from GitHub",
            "POST /api/clear - Clear local cache and re-sync",
        ],
    }))
}

pub async fn status(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let snapshots = store_service::read_index(&state.config.index_path())?;
    let uptime = chrono::Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds();

    Ok(Json(json!({
        "data": {
            "snapshot_count": snapshots.len(),
            "uptime_seconds": uptime,
            "version": env!("CARGO_PKG_VERSION"),
        },
        "error": null
    })))
}
