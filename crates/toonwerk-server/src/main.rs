// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Toonwerk — photo-to-cartoon upload server
//
// Entry point. Resolves configuration, initialises logging, and runs the web
// server until Ctrl+C.

use clap::Parser;
use toonwerk_core::error::Result;
use toonwerk_server::WebServer;
use toonwerk_server::cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.resolve()?;

    let default_level = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    tracing::info!(
        upload_dir = %config.upload_dir.display(),
        mode = %config.filter.mode,
        "Toonwerk starting"
    );

    let mut server = WebServer::new(config);
    server.start().await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Ctrl+C received");
    server.stop().await
}
