pub mod carts;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use common::types::Health;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::observability;
use crate::startup::AppState;

/// Backing-store liveness, mirroring the gRPC health protocol statuses.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Health>) {
    let health = if state.carts.is_serving().await {
        Health::serving()
    } else {
        Health::not_serving()
    };
    let status = if health.is_serving() { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status, Json(health))
}

async fn metrics() -> (StatusCode, String) {
    observability::encode_metrics()
}

/// Build the full application router: cart routes, health and metrics.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    let carts = Router::new()
        .route("/carts/:user_id", get(carts::get_cart).delete(carts::empty_cart))
        .route("/carts/:user_id/items", post(carts::add_item));

    ops.merge(carts)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx 以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
