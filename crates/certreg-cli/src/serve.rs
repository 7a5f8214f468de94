//! # Serve Subcommand
//!
//! Serves the HTTP API from a local snapshot. The registry is loaded
//! once at startup and held in memory; mutations made over HTTP are not
//! written back to the snapshot file.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use certreg_api::ipfs::IpfsClient;
use certreg_api::AppState;

use crate::store::load_registry;

/// Arguments for the `certreg serve` subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to bind.
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Base URL of the IPFS HTTP API. Without it the metadata routes
    /// answer 503.
    #[arg(long)]
    pub ipfs_url: Option<String>,
}

/// Execute the serve subcommand.
pub fn run_serve(args: &ServeArgs, state_path: &Path) -> Result<u8> {
    let registry = load_registry(state_path)?;
    tracing::info!(
        admin = %registry.admin(),
        certificates = registry.certificate_count(),
        "registry snapshot loaded"
    );
    tracing::warn!("serving in-memory; HTTP mutations are not written back to the snapshot");

    let mut state = AppState::with_registry(registry);
    if let Some(url) = &args.ipfs_url {
        state = state.with_ipfs(IpfsClient::new(url));
    }
    let app = certreg_api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(async {
        tracing::info!("certreg API listening on {addr}");
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        axum::serve(listener, app).await.context("server error")
    })?;
    Ok(0)
}
