//! # certreg-api — Binary Entry Point
//!
//! Starts the axum HTTP server for the certificate registry. Binds to a
//! configurable port (default 8080); the admin identity comes from
//! `CERTREG_ADMIN`.

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use certreg_api::{app, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("configuration error: {e}");
        e
    })?;

    match config.ipfs_url.as_deref() {
        Some(url) => tracing::info!(%url, "metadata store configured"),
        None => tracing::warn!(
            "no metadata store configured; /v1/metadata routes will return 503 \
             (set CERTREG_IPFS_URL to enable)"
        ),
    }

    let state = AppState::from_config(&config);
    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(admin = %config.admin, "certreg API listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
