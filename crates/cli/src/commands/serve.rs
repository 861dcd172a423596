//! Serve command - run the HTTP server

use anyhow::{Context, Result};
use halal_check_adapters::http;
use std::path::PathBuf;

use crate::args::ServeArgs;
use crate::config::AppConfig;

pub async fn execute(args: ServeArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut config = AppConfig::load(config_path.as_deref())?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let addr = config.server.socket_addr()?;
    let gateway = config.provider.build_gateway()?;

    tracing::info!(
        addr = %addr,
        provider = %config.provider.kind,
        timeout_secs = config.provider.timeout_secs,
        "Starting halal-check server"
    );

    let shutdown = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %error, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutdown signal received");
    };

    http::serve(addr, gateway, shutdown)
        .await
        .with_context(|| format!("Server on {} failed", addr))?;

    tracing::info!("Server stopped");
    Ok(())
}
