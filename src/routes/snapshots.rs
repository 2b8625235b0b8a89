use axum::body::Body;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use tokio_util::io::ReaderStream;

use crate::error::AppError;
use crate::models::snapshot::{Snapshot, SnapshotContents};
use crate::paths;
use crate::services::store_service;
use crate::state::AppState;

/// Serve the snapshot index in capture order. Callers sort by date themselves.
pub async fn get_index(State(state): State<AppState>) -> Result<Json<Vec<Snapshot>>, AppError> {
    let snapshots = store_service::read_index(&state.config.index_path())?;
    Ok(Json(snapshots))
}

pub async fn list_snapshots(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let hashes = store_service::list_snapshot_hashes(&state).await?;
    Ok(Json(json!({ "snapshots": hashes })))
}

pub async fn get_contents(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<SnapshotContents>, AppError> {
    paths::validate_hash(&hash)?;
    let contents = store_service::list_contents(&state, &hash).await?;
    Ok(Json(contents))
}

pub async fn get_file(
    State(state): State<AppState>,
    Path((hash, file_path)): Path<(String, String)>,
) -> Result<axum::response::Response, AppError> {
    paths::validate_hash(&hash)?;
    let rel_path = paths::validate_relative_path(&file_path)?;

    let disk_path = store_service::resolve_file(&state, &hash, &rel_path).await?;

    let content_type = mime_guess::from_path(&rel_path)
        .first_or_octet_stream()
        .to_string();

    let file = tokio::fs::File::open(&disk_path).await?;
    let size = file.metadata().await?.len();
    let stream = ReaderStream::new(file);
    let body = Body::from_stream(stream);

    let response = axum::response::Response::builder()
        .header("Content-Type", content_type)
        .header("Content-Length", size.to_string())
        .header("Cache-Control", "no-cache")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
