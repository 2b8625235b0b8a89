use crate::error::AppError;
use crate::state::AppState;
use serde::Deserialize;
use std::time::Duration;

/// Mirrors the timelapse data published in the source repository: the index
/// file plus one directory per snapshot hash. Snapshots already on disk are
/// never re-fetched; per-snapshot failures are logged and skipped so one bad
/// snapshot cannot block the rest of the sync.
#[derive(Debug, Deserialize)]
struct IndexEntry {
    hash: String,
}

#[derive(Debug, Deserialize)]
struct ContentsEntry {
    name: String,
    path: String,
    download_url: Option<String>,
    #[serde(rename = "type")]
    kind: String,
}

fn client() -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .user_agent(concat!("timelapse/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(AppError::from)
}

pub async fn sync_from_github(state: &AppState) -> Result<(), AppError> {
    if !state.config.has_github_source() {
        return Err(AppError::BadRequest("No GitHub source configured".into()));
    }

    let _guard = state.sync_lock.lock().await;
    sync_locked(state).await
}

/// Wipe the local cache and pull everything again from the upstream.
pub async fn clear_and_sync(state: &AppState) -> Result<(), AppError> {
    if !state.config.has_github_source() {
        return Err(AppError::BadRequest("No GitHub source configured".into()));
    }

    let _guard = state.sync_lock.lock().await;

    let snapshots_dir = state.config.snapshots_dir();
    if snapshots_dir.exists() {
        tokio::fs::remove_dir_all(&snapshots_dir).await?;
    }
    let index_path = state.config.index_path();
    if index_path.exists() {
        tokio::fs::remove_file(&index_path).await?;
    }
    tokio::fs::create_dir_all(&snapshots_dir).await?;

    tracing::info!("Cache cleared, re-syncing");
    sync_locked(state).await
}

async fn sync_locked(state: &AppState) -> Result<(), AppError> {
    let client = client()?;
    let config = &state.config;

    let index_url = format!(
        "https://raw.githubusercontent.com/{}/{}/{}/.timelapse/index.json",
        config.github_owner, config.github_repo, config.github_branch
    );

    tracing::info!(url = %index_url, "Fetching index from upstream");
    let index_data = fetch_bytes(&client, &index_url).await?;

    tokio::fs::write(config.index_path(), &index_data).await?;

    let entries: Vec<IndexEntry> = serde_json::from_slice(&index_data)
        .map_err(|e| AppError::Internal(format!("Failed to parse upstream index: {}", e)))?;

    tracing::info!(count = entries.len(), "Syncing snapshots");
    for entry in &entries {
        if let Err(e) = sync_snapshot(state, &client, &entry.hash).await {
            tracing::warn!(hash = %entry.hash, error = %e, "Failed to sync snapshot");
        }
    }

    Ok(())
}

async fn sync_snapshot(
    state: &AppState,
    client: &reqwest::Client,
    hash: &str,
) -> Result<(), AppError> {
    let snapshot_dir = state.config.snapshot_dir(hash);
    if snapshot_dir.exists() {
        tracing::debug!(hash = %hash, "Snapshot already present, skipping");
        return Ok(());
    }

    tracing::info!(hash = %hash, "Fetching snapshot");
    let remote_dir = format!(".timelapse/snapshots/{}", hash);
    let count = sync_tree(state, client, hash, &remote_dir, "").await?;
    tracing::info!(hash = %hash, files = count, "Synced snapshot");
    Ok(())
}

/// Download one directory level from the contents API, recursing into
/// subdirectories so nested asset folders land in the right place.
async fn sync_tree(
    state: &AppState,
    client: &reqwest::Client,
    hash: &str,
    remote_dir: &str,
    local_prefix: &str,
) -> Result<usize, AppError> {
    let config = &state.config;
    let api_url = format!(
        "https://api.github.com/repos/{}/{}/contents/{}?ref={}",
        config.github_owner, config.github_repo, remote_dir, config.github_branch
    );

    let resp = client.get(&api_url).send().await?;
    if !resp.status().is_success() {
        return Err(AppError::Transport(format!(
            "GitHub API returned {} for {}",
            resp.status(),
            remote_dir
        )));
    }
    let entries: Vec<ContentsEntry> = resp.json().await?;

    let local_dir = config.snapshot_dir(hash).join(local_prefix);
    tokio::fs::create_dir_all(&local_dir).await?;

    let mut count = 0;
    for entry in entries {
        if entry.kind == "dir" {
            let nested_prefix = if local_prefix.is_empty() {
                entry.name.clone()
            } else {
                format!("{}/{}", local_prefix, entry.name)
            };
            count +=
                Box::pin(sync_tree(state, client, hash, &entry.path, &nested_prefix)).await?;
            continue;
        }
        if entry.kind != "file" {
            continue;
        }

        let Some(url) = entry.download_url else {
            continue;
        };
        match fetch_bytes(client, &url).await {
            Ok(data) => {
                tokio::fs::write(local_dir.join(&entry.name), data).await?;
                count += 1;
            }
            Err(e) => {
                tracing::warn!(file = %entry.name, error = %e, "Failed to download file");
            }
        }
    }

    Ok(count)
}

async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<bytes::Bytes, AppError> {
    let resp = client.get(url).send().await?;
    if !resp.status().is_success() {
        return Err(AppError::Transport(format!("HTTP {} for {}", resp.status(), url)));
    }
    Ok(resp.bytes().await?)
}
