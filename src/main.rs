//! giveaway-ledger server entry point.
//!
//! Starts the Axum HTTP server with the REST endpoints.

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use giveaway_ledger::api;
use giveaway_ledger::app_state::AppState;
use giveaway_ledger::config::{LedgerConfig, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = LedgerConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    tracing::info!(
        addr = %config.listen_addr,
        persistence = config.persistence_enabled,
        data_file = %config.data_file.display(),
        seeded = config.rng_seed.is_some(),
        "starting giveaway-ledger"
    );

    // Build application state and router
    let app_state = AppState::from_config(&config);
    let app = api::build_app(app_state, config.request_timeout);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
