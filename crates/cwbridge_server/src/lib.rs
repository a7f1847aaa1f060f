//! cwbridge server library
//!
//! HTTP adapter exposing ConnectWise Manage operations through
//! `GET /discover` and `POST /function/{name}`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

pub use config::{InvalidBodyStyle, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use state::AppState;

use axum::Router;
use tower_http::trace::TraceLayer;

/// Router with CORS and request tracing applied
pub fn router(state: AppState) -> Router {
    handlers::routes()
        .layer(axum::middleware::from_fn(middleware::cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the adapter server and run until ctrl-c
pub async fn start_server(config: ServerConfig) -> ServerResult<()> {
    tracing::info!("Starting ConnectWise adapter on {}", config.bind_address());
    let company_id = config.credentials.company_id.as_str();
    tracing::info!(
        "Company ID: {}",
        if company_id.is_empty() { "Not set" } else { company_id }
    );
    tracing::info!("Base URL: {}", config.credentials.base_url());

    let state = AppState::new(config.clone())?;
    tracing::info!("{} functions registered", state.discovery.functions.len());

    let app = router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutting down");
}
