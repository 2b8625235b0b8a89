//! One capture run: resolve the latest commit touching the target folder,
//! extract that folder's tree into the snapshot store, take an optional
//! screenshot and append the record to the index. State lives entirely in the
//! request and the store on disk; git is never asked to mutate a working tree.

use crate::capture::{git, screenshot, CaptureError};
use crate::models::snapshot::Snapshot;
use crate::services::store_service;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CaptureRequest {
    pub repo_path: PathBuf,
    pub target_folder: String,
    pub branch: String,
}

#[derive(Debug)]
pub enum CaptureOutcome {
    /// No commit on the branch touches the target folder.
    NoCommit,
    /// The latest commit is already in the index.
    AlreadyCaptured { hash: String },
    Captured {
        snapshot: Snapshot,
        files_written: usize,
    },
}

pub async fn run(
    data_dir: &Path,
    screenshot_cmd: Option<&str>,
    request: &CaptureRequest,
) -> Result<CaptureOutcome, CaptureError> {
    let folder = request.target_folder.trim_matches('/');

    let Some(commit) =
        git::latest_commit(&request.repo_path, &request.branch, folder).await?
    else {
        return Ok(CaptureOutcome::NoCommit);
    };

    let index_path = data_dir.join("index.json");
    let mut index = store_service::read_index(&index_path)?;
    if index.iter().any(|s| s.hash == commit.hash) {
        tracing::info!(hash = %commit.hash, "Latest commit already captured");
        return Ok(CaptureOutcome::AlreadyCaptured { hash: commit.hash });
    }

    tracing::info!(
        hash = %commit.hash,
        author = %commit.author,
        "Capturing snapshot"
    );

    let snapshot_dir = data_dir.join("snapshots").join(&commit.hash);
    let files = git::list_tree(&request.repo_path, &commit.hash, folder).await?;

    let mut files_written = 0;
    for file in &files {
        let data = git::show_file(&request.repo_path, &commit.hash, file).await?;
        let dest = snapshot_dir.join(file);
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&dest, data).await?;
        files_written += 1;
    }
    tracing::info!(files = files_written, "Extracted snapshot tree");

    let has_screenshot =
        take_screenshot(screenshot_cmd, &snapshot_dir, folder).await;

    let snapshot = Snapshot {
        hash: commit.hash.clone(),
        message: commit.message.clone(),
        author: commit.author.clone(),
        date: commit.date,
        folder: folder.to_string(),
        has_screenshot,
    };

    index.push(snapshot.clone());
    store_service::write_index(&index_path, &index)?;
    tracing::info!(hash = %commit.hash, "Snapshot appended to index");

    Ok(CaptureOutcome::Captured {
        snapshot,
        files_written,
    })
}

/// Screenshot the entry HTML if there is one and a command is configured.
/// Failures are logged, not propagated.
async fn take_screenshot(
    screenshot_cmd: Option<&str>,
    snapshot_dir: &Path,
    folder: &str,
) -> bool {
    let Some(cmd) = screenshot_cmd else {
        return false;
    };

    let entry = snapshot_dir.join(folder).join("index.html");
    if !entry.is_file() {
        tracing::info!("No entry HTML, skipping screenshot");
        return false;
    }

    let output = snapshot_dir.join("screenshot.png");
    match screenshot::capture(cmd, &entry, &output).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Screenshot capture failed");
            false
        }
    }
}
