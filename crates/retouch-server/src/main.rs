use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::Parser;
use retouch_server::{logging, server, AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    logging::init_subscriber(config.log_format)
        .map_err(|e| anyhow!("Failed to initialize logging subsystem: {e}"))?;

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        address = %addr,
        download_dir = ?config.download_dir,
        max_upload_bytes = config.max_upload_bytes,
        session_ttl_secs = config.session_ttl_secs,
        "Retouch server listening"
    );

    let state = Arc::new(AppState::new(config));
    server::serve(listener, state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    })
    .await;

    info!("Retouch server stopped");
    Ok(())
}
