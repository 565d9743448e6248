// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToonwerkError};
use crate::types::FilterParameters;

/// Process settings for the upload server.
///
/// Resolved once at startup and handed to the server explicitly; nothing reads
/// these values from globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP listener binds to.
    pub host: IpAddr,
    /// Port the HTTP listener binds to (default 5002).
    pub port: u16,
    /// Directory where cartoon results are written.
    pub upload_dir: PathBuf,
    /// How many cartoon results to keep on disk; the oldest are pruned.
    pub max_stored_results: usize,
    /// Verbose logging.
    pub debug: bool,
    /// Largest accepted request body in bytes.
    pub max_upload_bytes: usize,
    /// Filter parameters used when a request does not pick a mode.
    pub filter: FilterParameters,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5002,
            upload_dir: PathBuf::from("static/uploads"),
            max_stored_results: 100,
            debug: false,
            max_upload_bytes: 16 * 1024 * 1024,
            filter: FilterParameters::default(),
        }
    }
}

impl AppConfig {
    /// Load settings from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| {
            ToonwerkError::Config(format!("failed to read {}: {}", path.display(), err))
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_upload_bytes == 0 {
            return Err(ToonwerkError::Config(
                "max_upload_bytes must be greater than zero".into(),
            ));
        }
        if self.max_stored_results == 0 {
            return Err(ToonwerkError::Config(
                "max_stored_results must be greater than zero".into(),
            ));
        }
        if self.upload_dir.as_os_str().is_empty() {
            return Err(ToonwerkError::Config("upload_dir must not be empty".into()));
        }
        self.filter.validate()
    }
}
