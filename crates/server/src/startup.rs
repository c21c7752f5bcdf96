use std::future::Future;
use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, LatencyConfig};
use service::{CartService, CartStoreProvider};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::errors::StartupError;
use crate::routes;

/// Shared handler state. The store inside `carts` is selected once at startup.
#[derive(Clone)]
pub struct AppState {
    pub carts: CartService,
    pub latency: LatencyConfig,
}

impl AppState {
    pub fn new(provider: CartStoreProvider, latency: LatencyConfig) -> Self {
        Self { carts: CartService::new(Arc::new(provider)), latency }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Select and initialize the cart store, then assemble the state.
pub async fn build_state(config: &AppConfig) -> Result<AppState, StartupError> {
    let provider = CartStoreProvider::from_config(&config.cart_store).await?;
    Ok(AppState::new(provider, config.latency.clone()))
}

pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

/// Resolve once `signal` fires. If the signal handler could not be installed
/// the server keeps running instead of stopping right away.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!(event = "shutdown_signal", "received Ctrl+C, shutting down"),
        Err(e) => {
            error!(event = "shutdown_signal_unavailable", error = %e, "cannot listen for Ctrl+C, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

/// Public entry: initialize the store and run the HTTP server until Ctrl+C.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    let state = build_state(&config).await?;
    let app = build_app(state);

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    info!(%addr, "cart service listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
