mod config;
mod errors;
mod jobs;
mod models;
mod provider;
mod routes;
mod state;
mod telemetry;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::routes::{build_router, cors::cors_layer};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; nothing below reads the environment again
    let config = Config::from_env()?;

    // Initialize structured logging (console + append-only JSON file)
    let _log_guard = telemetry::subscriber::init(&config)?;

    info!("Starting Jobs API v{}", env!("CARGO_PKG_VERSION"));
    if !config.env_file_loaded {
        warn!("No .env file found, using environment variables");
    }
    info!(api_key_loaded = config.has_api_key(), "API configuration");
    if !config.has_api_key() {
        warn!("SERPAPI_KEY not set, /api/jobs will serve mock data");
    }

    let state = AppState::from_config(&config);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.allowed_origins)?);
    info!("CORS enabled for: {}", config.allowed_origins.join(", "));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!(port = config.port, "Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
