use crate::config::AppConfig;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Serializes sync/clear operations so two upstream pulls never interleave.
    pub sync_lock: Arc<Mutex<()>>,
    pub start_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            sync_lock: Arc::new(Mutex::new(())),
            start_time: chrono::Utc::now(),
        }
    }
}
