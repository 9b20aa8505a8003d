// SPDX-License-Identifier: Apache-2.0
//! Standalone Log Insight licensing mock.
//!
//! Serves the same routes a test fixture gets, on `LI_MOCK_PORT`
//! (default 9543). Storage is in-memory; data is lost on restart.

use std::net::SocketAddr;

use li_mock::{AppState, MockConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = MockConfig::from_env();
    let port = config.port;
    tracing::info!(?config, "configuration loaded");

    let app = li_mock::app(AppState::with_config(config));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("li-mock listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
