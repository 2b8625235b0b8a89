use timelapse::background;
use timelapse::config::AppConfig;
use timelapse::routes;
use timelapse::services::sync_service;
use timelapse::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env();

    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    tracing::info!("Starting timelapse v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(data_dir = %config.data_dir, "Local snapshot store");

    std::fs::create_dir_all(config.snapshots_dir()).expect("Failed to create snapshots dir");

    let state = AppState::new(config.clone());

    // Initial sync on startup (optional)
    if config.sync_on_startup && config.has_github_source() {
        tracing::info!(
            source = %format!("{}/{}", config.github_owner, config.github_repo),
            branch = %config.github_branch,
            "Performing initial sync from GitHub"
        );
        if let Err(e) = sync_service::sync_from_github(&state).await {
            tracing::warn!(error = %e, "Initial sync failed");
        }
    }

    // Shutdown signal
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let sync_handle = tokio::spawn(background::sync_task::run(
        state.clone(),
        shutdown_rx.clone(),
    ));

    let app = routes::build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await
        .expect("Server error");

    tracing::info!("Waiting for background tasks to finish");
    let _ = sync_handle.await;

    tracing::info!("Shutdown complete");
}

async fn shutdown_signal(shutdown_tx: tokio::sync::watch::Sender<bool>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
    let _ = shutdown_tx.send(true);
}
