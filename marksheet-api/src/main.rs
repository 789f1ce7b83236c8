//! Marksheet API Server Entry Point
//!
//! Bootstraps logging and configuration, assembles the store-backed
//! application state, and starts the Axum HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use marksheet_api::{create_api_router, ApiConfig, ApiError, ApiResult, AppState};
use marksheet_storage::MemoryStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ApiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ApiConfig::from_env();
    if !config.is_production() {
        tracing::warn!("CORS origins not configured; allowing all origins (dev mode)");
    }

    let store = Arc::new(MemoryStore::new());
    let state = Arc::new(AppState::new(store, config));

    let app: Router = create_api_router(state);

    let addr = resolve_bind_addr()?;
    tracing::info!(%addr, "Starting marksheet API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn resolve_bind_addr() -> ApiResult<SocketAddr> {
    let host = std::env::var("MARKSHEET_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port_str = std::env::var("PORT")
        .ok()
        .or_else(|| std::env::var("MARKSHEET_PORT").ok())
        .unwrap_or_else(|| "5000".to_string());
    let port = port_str
        .parse::<u16>()
        .map_err(|_| ApiError::internal_error(format!("Invalid port value: {}", port_str)))?;

    let addr = format!("{}:{}", host, port);
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::internal_error(format!("Invalid bind address {}: {}", addr, e)))
}
