// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop the server from starting or keep it from serving.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read config file {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for server startup.
pub type Result<T> = std::result::Result<T, Error>;
