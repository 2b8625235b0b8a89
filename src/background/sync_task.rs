use crate::services::sync_service;
use crate::state::AppState;
use std::time::Duration;
use tokio::sync::watch;

/// Periodic upstream sync. Only runs when an interval is configured; the
/// webhook-triggered POST /api/sync is the primary path.
pub async fn run(state: AppState, mut shutdown: watch::Receiver<bool>) {
    let minutes = state.config.sync_interval_minutes;
    if minutes == 0 {
        return;
    }
    let interval = Duration::from_secs(minutes * 60);
    tracing::info!(minutes, "Background sync enabled");

    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = shutdown.changed() => {
                tracing::info!("Background sync shutting down");
                return;
            }
        }

        tracing::info!("Background sync starting");
        match sync_service::sync_from_github(&state).await {
            Ok(()) => tracing::info!("Background sync completed"),
            Err(e) => tracing::warn!(error = %e, "Background sync failed"),
        }
    }
}
