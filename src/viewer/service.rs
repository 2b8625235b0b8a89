use crate::models::snapshot::{Snapshot, SnapshotContents};
use async_trait::async_trait;

/// Errors surfaced by the snapshot service contract. Both variants propagate
/// to the top-level display logic, which converts them into a single
/// user-visible error state.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Transport(err.to_string())
    }
}

/// Read-only access to the snapshot store. Every call is independent and
/// idempotent; no caching or retries are provided.
#[async_trait]
pub trait SnapshotService: Send + Sync {
    /// Fetch the index. Returns index order, not guaranteed chronological.
    async fn list_snapshots(&self) -> Result<Vec<Snapshot>, ServiceError>;

    /// List the file paths present under a snapshot's directory.
    async fn list_files(&self, hash: &str) -> Result<SnapshotContents, ServiceError>;

    /// Fetch one file's text content.
    async fn read_file(&self, hash: &str, path: &str) -> Result<String, ServiceError>;

    /// URL of the snapshot's screenshot. Pure path construction; the resource
    /// itself may not exist.
    fn screenshot_url(&self, hash: &str) -> String;

    /// Base URL that relative asset references inside a snapshot's markup
    /// resolve against: `<root>/snapshots/<hash>/<folder>/`.
    fn asset_base_url(&self, hash: &str, folder: &str) -> String;
}

/// Snapshot service backed by the timelapse HTTP API.
pub struct HttpSnapshotService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSnapshotService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, ServiceError> {
        let resp = self.client.get(url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ServiceError::NotFound(url.to_string()));
        }
        if !resp.status().is_success() {
            return Err(ServiceError::Transport(format!(
                "HTTP {} for {}",
                resp.status(),
                url
            )));
        }
        Ok(resp)
    }
}

#[async_trait]
impl SnapshotService for HttpSnapshotService {
    async fn list_snapshots(&self) -> Result<Vec<Snapshot>, ServiceError> {
        let url = format!("{}/index", self.base_url);
        Ok(self.get(&url).await?.json().await?)
    }

    async fn list_files(&self, hash: &str) -> Result<SnapshotContents, ServiceError> {
        let url = format!("{}/snapshots/{}", self.base_url, hash);
        Ok(self.get(&url).await?.json().await?)
    }

    async fn read_file(&self, hash: &str, path: &str) -> Result<String, ServiceError> {
        let url = format!("{}/snapshots/{}/{}", self.base_url, hash, path);
        Ok(self.get(&url).await?.text().await?)
    }

    fn screenshot_url(&self, hash: &str) -> String {
        format!("{}/snapshots/{}/screenshot.png", self.base_url, hash)
    }

    fn asset_base_url(&self, hash: &str, folder: &str) -> String {
        format!("{}/snapshots/{}/{}/", self.base_url, hash, folder)
    }
}
