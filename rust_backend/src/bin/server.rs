//! Video analytics HTTP server binary.
//!
//! Loads `analytics.toml` if one is found, sets up the HTTP router, and
//! starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin yt-analytics-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: `server.host` from config, else 0.0.0.0)
//! - `PORT`: Server port (default: `server.port` from config, else 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use yt_analytics::config::AnalyticsConfig;
use yt_analytics::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting video analytics HTTP server");

    let config = AnalyticsConfig::load_or_default()?;
    let addr: SocketAddr = config.bind_address().parse()?;
    info!(
        "Ranking length {}, demo size {}",
        config.analysis.top_n, config.demo.size
    );

    let app = create_router(AppState::new(config));

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
