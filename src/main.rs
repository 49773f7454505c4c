//! # Inventory API
//!
//! Starts the product actor and serves the HTTP API until Ctrl-C, then shuts down gracefully.

use inventory_api::config::AppConfig;
use inventory_api::http::{self, AppState};
use inventory_api::lifecycle::{setup_tracing, InventorySystem};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = AppConfig::from_env().map_err(|e| e.to_string())?;

    // Setup tracing once for the entire application
    setup_tracing(config.log_format);
    info!(?config, "Starting inventory service");

    let system = InventorySystem::new(&config);
    let state = AppState::new(
        system.product_client.clone(),
        config.default_low_stock_threshold,
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| format!("failed to bind {}: {e}", config.bind_addr))?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
        }
        info!("Shutdown signal received");
    };

    if let Err(e) = http::serve(listener, state, shutdown).await {
        error!(error = %e, "HTTP server failed");
    }

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
