// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! it-server: HTTP front end for the in-memory issue store.
//!
//! Issues live only for the lifetime of the process. Each project is an
//! independent collection addressed as `/api/issues/{project}`.

mod config;
mod error;
mod extract;
mod server;
#[cfg(test)]
mod server_tests;
mod state;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{Args, Config};
use error::Error;
use state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = Config::from_args(&args)?;

    setup_logging(&config)?;

    info!("Starting it-server");
    info!("  Bind address: {}", config.bind);
    if let Some(ref path) = args.config {
        info!("  Config file: {}", path.display());
    }

    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|source| Error::Bind {
            addr: config.bind,
            source,
        })?;

    let state = AppState::new();
    server::run(listener, state.clone(), shutdown_signal()).await?;

    let (projects, issues) = state.totals().await;
    info!(
        "Stopped; discarding {} issue(s) across {} project(s)",
        issues, projects
    );
    Ok(())
}

fn setup_logging(config: &Config) -> Result<(), Error> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log)
            .map_err(|e| Error::Logging(format!("invalid log filter '{}': {}", config.log, e)))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
