//! Cropwatch HTTP Server Binary
//!
//! This is the main entry point for the crop monitoring REST API server.
//! It loads the configuration, publishes an initial demo dataset, sets up
//! the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin cropwatch-server
//!
//! # With an explicit configuration file
//! CROPWATCH_CONFIG=./cropwatch.toml cargo run --bin cropwatch-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `CROPWATCH_CONFIG`: Path to a TOML configuration file
//! - `RUST_LOG`: Log filter directives, e.g. `cropwatch=debug,tower_http=warn` (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::FmtSubscriber;

use cropwatch::config::AppConfig;
use cropwatch::http::{create_router, log_filter, AppState};
use cropwatch::services::pipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(log_filter(env::var("RUST_LOG").ok().as_deref()))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Cropwatch HTTP Server");

    let config = AppConfig::load()?;
    let state = AppState::new(config);

    // Publish the demo field so the dashboard has data on first load
    let seed = state.config.generator.seed.unwrap_or_else(rand::random::<u64>);
    let today = chrono::Utc::now().date_naive();
    let snapshot = pipeline::load_demo(&state.config, seed, today)?;
    let published = state.store.publish(snapshot);
    info!(
        "Demo dataset ready (generation {}, seed {}, {} alerts)",
        published.generation,
        published.seed,
        published.alerts.len()
    );

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
