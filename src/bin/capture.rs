//! Capture binary: extracts one snapshot of the target folder for the latest
//! commit touching it and appends the record to the store index. Configured
//! entirely from the environment; intended to run from CI on every push.

use std::path::PathBuf;
use timelapse::capture::pipeline::{self, CaptureOutcome, CaptureRequest};
use tracing_subscriber::EnvFilter;

struct CaptureConfig {
    data_dir: PathBuf,
    repo_path: PathBuf,
    target_folder: String,
    branch: String,
    screenshot_cmd: Option<String>,
    log_level: String,
}

impl CaptureConfig {
    fn from_env() -> Self {
        Self {
            data_dir: std::env::var("TIMELAPSE_PATH")
                .unwrap_or_else(|_| ".timelapse".into())
                .into(),
            repo_path: std::env::var("REPO_PATH")
                .unwrap_or_else(|_| ".".into())
                .into(),
            target_folder: std::env::var("TARGET_FOLDER").unwrap_or_else(|_| "target".into()),
            branch: std::env::var("BRANCH").unwrap_or_else(|_| "main".into()),
            screenshot_cmd: std::env::var("SCREENSHOT_CMD").ok(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let config = CaptureConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let request = CaptureRequest {
        repo_path: config.repo_path.clone(),
        target_folder: config.target_folder.clone(),
        branch: config.branch.clone(),
    };

    tracing::info!(
        repo = %request.repo_path.display(),
        folder = %request.target_folder,
        branch = %request.branch,
        "Starting capture"
    );

    let outcome = pipeline::run(
        &config.data_dir,
        config.screenshot_cmd.as_deref(),
        &request,
    )
    .await;

    match outcome {
        Ok(CaptureOutcome::NoCommit) => {
            tracing::warn!("No commit touches the target folder, nothing to capture");
        }
        Ok(CaptureOutcome::AlreadyCaptured { hash }) => {
            tracing::info!(hash = %hash, "Already captured, nothing to do");
        }
        Ok(CaptureOutcome::Captured {
            snapshot,
            files_written,
        }) => {
            tracing::info!(
                hash = %snapshot.hash,
                files = files_written,
                screenshot = snapshot.has_screenshot,
                "Capture complete"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Capture failed");
            std::process::exit(1);
        }
    }
}
