//! # Licorería API Server
//!
//! HTTP JSON API for the liquor store: product catalog, the shared shopping
//! cart, and the alcohol-consumption statistics table.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         API Server                                  │
//! │                                                                     │
//! │  Storefront ──► HTTP (5000) ──► Handlers ──► CartService ──► SQLite │
//! │                                     │                               │
//! │                                     └──► Repositories ─────► SQLite │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod routes;
mod service;
mod state;

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use licoreria_db::{Database, DbConfig};

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (RUST_LOG wins, `info` otherwise)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Licoreria API server...");

    // Load configuration
    let config = ServerConfig::load()?;
    info!(
        port = config.port,
        database_path = %config.database_path.display(),
        "Configuration loaded"
    );

    // The SQLite file is created on connect, but its parent directory is not
    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Connect to the database and run migrations
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Connected to SQLite, migrations applied");

    // Build shared state and the router
    let state = AppState::new(db);
    let app = routes::router(state);

    // Start serving
    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!(%addr, "Starting HTTP server");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
