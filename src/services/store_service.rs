use crate::error::AppError;
use crate::models::snapshot::{Snapshot, SnapshotContents};
use crate::state::AppState;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Read the snapshot index from disk. A missing index file means nothing has
/// been captured yet, which is an empty list rather than an error.
pub fn read_index(path: &Path) -> anyhow::Result<Vec<Snapshot>> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e).context("Failed to read index"),
    };
    serde_json::from_slice(&data).context("Failed to parse index")
}

pub fn write_index(path: &Path, snapshots: &[Snapshot]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(snapshots)?;
    std::fs::write(path, data).context("Failed to write index")
}

pub async fn list_snapshot_hashes(state: &AppState) -> Result<Vec<String>, AppError> {
    let mut hashes = Vec::new();
    let mut entries = tokio::fs::read_dir(state.config.snapshots_dir()).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_dir() {
            hashes.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    hashes.sort();
    Ok(hashes)
}

/// List every file under a snapshot directory, as sorted relative paths.
pub async fn list_contents(state: &AppState, hash: &str) -> Result<SnapshotContents, AppError> {
    let dir = state.config.snapshot_dir(hash);
    if !dir.is_dir() {
        return Err(AppError::NotFound(format!("Snapshot {} not found", hash)));
    }

    let mut files = Vec::new();
    let mut pending = vec![dir.clone()];
    while let Some(current) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&current).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_dir() {
                pending.push(path);
            } else if let Ok(rel) = path.strip_prefix(&dir) {
                files.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    files.sort();

    Ok(SnapshotContents {
        hash: hash.to_string(),
        files,
    })
}

/// Resolve a file inside a snapshot directory, verifying it exists.
pub async fn resolve_file(
    state: &AppState,
    hash: &str,
    rel_path: &str,
) -> Result<PathBuf, AppError> {
    let dir = state.config.snapshot_dir(hash);
    if !dir.is_dir() {
        return Err(AppError::NotFound(format!("Snapshot {} not found", hash)));
    }

    let file_path = dir.join(rel_path);
    match tokio::fs::metadata(&file_path).await {
        Ok(meta) if meta.is_file() => Ok(file_path),
        Ok(_) => Err(AppError::BadRequest("Cannot serve directory".into())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AppError::NotFound(format!("File not found: {}", rel_path)))
        }
        Err(e) => Err(e.into()),
    }
}
