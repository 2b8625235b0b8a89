use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: String,
    pub github_owner: String,
    pub github_repo: String,
    pub github_branch: String,
    pub sync_on_startup: bool,
    pub sync_interval_minutes: u64,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            data_dir: env::var("TIMELAPSE_PATH").unwrap_or_else(|_| ".timelapse".into()),
            github_owner: env::var("GITHUB_OWNER").unwrap_or_else(|_| "".into()),
            github_repo: env::var("GITHUB_REPO").unwrap_or_else(|_| "".into()),
            github_branch: env::var("GITHUB_BRANCH").unwrap_or_else(|_| "main".into()),
            sync_on_startup: env::var("SYNC_ON_STARTUP")
                .map(|v| v == "true")
                .unwrap_or(false),
            sync_interval_minutes: parse_env("SYNC_INTERVAL_MINUTES", 0),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    pub fn snapshots_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("snapshots")
    }

    pub fn snapshot_dir(&self, hash: &str) -> PathBuf {
        self.snapshots_dir().join(hash)
    }

    pub fn index_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("index.json")
    }

    /// True when a GitHub mirror is configured as the upstream source.
    pub fn has_github_source(&self) -> bool {
        !self.github_owner.is_empty() && !self.github_repo.is_empty()
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
