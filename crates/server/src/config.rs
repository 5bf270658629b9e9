// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server configuration.
//!
//! Settings come from three layers, later ones winning:
//! - built-in defaults (`0.0.0.0:3000`, log level `info`)
//! - an optional TOML file given with `--config`
//! - command-line flags, plus the `PORT` environment variable
//!
//! ```toml
//! bind = "127.0.0.1:8080"
//! log = "it_server=debug,tower_http=info"
//! ```

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG: &str = "info";
const VERBOSE_LOG: &str = "debug";

/// it-server: HTTP issue tracker
#[derive(Parser, Debug, Default)]
#[command(name = "it-server")]
#[command(about = "HTTP issue tracker backed by an in-memory store")]
pub struct Args {
    /// Address to bind the server to
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,

    /// Port to listen on, replacing the port of the bind address
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Socket address the HTTP listener binds to.
    pub bind: SocketAddr,
    /// Log filter directive used when `RUST_LOG` is unset.
    pub log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            log: DEFAULT_LOG.to_string(),
        }
    }
}

impl Config {
    /// Loads settings from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolves the final settings from the file named in `args` (if any)
    /// overlaid with the flags themselves.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(bind) = args.bind {
            config.bind = bind;
        }
        if let Some(port) = args.port {
            config.bind.set_port(port);
        }
        if args.verbose {
            config.log = VERBOSE_LOG.to_string();
        }

        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
