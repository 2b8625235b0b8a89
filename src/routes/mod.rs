pub mod health;
pub mod snapshots;
pub mod sync;

use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new().route("/health", get(health::health));

    let api_routes = Router::new()
        .route("/", get(health::api_info))
        .route("/status", get(health::status))
        .route("/index", get(snapshots::get_index))
        .route("/snapshots", get(snapshots::list_snapshots))
        .route("/snapshots/{hash}", get(snapshots::get_contents))
        .route("/snapshots/{hash}/{*file_path}", get(snapshots::get_file))
        .route("/sync", post(sync::trigger_sync))
        .route("/clear", post(sync::clear_cache));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let x_request_id = http::HeaderName::from_static("x-request-id");

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
