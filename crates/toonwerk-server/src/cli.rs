// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and config resolution for the `toonwerk` binary.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use toonwerk_core::AppConfig;
use toonwerk_core::error::Result;
use toonwerk_core::types::{FilterParameters, PipelineMode};

/// Photo-to-cartoon upload server.
#[derive(Parser, Debug, Default)]
#[command(name = "toonwerk", author, version, about = "Photo-to-cartoon upload server", long_about = None)]
pub struct Args {
    /// JSON config file; flags given on the command line win over it
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Address to bind (default 0.0.0.0)")]
    pub host: Option<IpAddr>,

    #[arg(short = 'p', long, help = "Port to listen on (default 5002)")]
    pub port: Option<u16>,

    #[arg(long, value_name = "DIR", help = "Directory for uploads and results (default static/uploads)")]
    pub upload_dir: Option<PathBuf>,

    /// Verbose logging
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Default filter mode: edge_mask or smoothed
    #[arg(short = 'm', long, value_name = "MODE")]
    pub mode: Option<PipelineMode>,
}

impl Args {
    /// Defaults, then the config file, then flags.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_json_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(dir) = &self.upload_dir {
            config.upload_dir = dir.clone();
        }
        if self.debug {
            config.debug = true;
        }
        if let Some(mode) = self.mode {
            if mode != config.filter.mode {
                config.filter = FilterParameters::for_mode(mode);
            }
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn no_flags_gives_defaults() {
        let args = Args::try_parse_from(["toonwerk"]).unwrap();
        let config = args.resolve().unwrap();
        assert_eq!(config.port, 5002);
        assert_eq!(config.filter, FilterParameters::edge_mask_on_original());
    }

    #[test]
    fn flags_override_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toonwerk.json");
        std::fs::write(
            &path,
            r#"{"port": 8080, "debug": false, "upload_dir": "/srv/toons"}"#,
        )
        .unwrap();

        let args = Args::try_parse_from([
            "toonwerk",
            "--config",
            path.to_str().unwrap(),
            "--host",
            "127.0.0.1",
            "--debug",
            "--mode",
            "smoothed",
        ])
        .unwrap();
        let config = args.resolve().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.upload_dir, PathBuf::from("/srv/toons"));
        assert!(config.debug);
        assert_eq!(config.filter, FilterParameters::smoothed_color_with_sharpen());
    }

    #[test]
    fn unknown_mode_is_a_parse_error() {
        assert!(Args::try_parse_from(["toonwerk", "--mode", "sepia"]).is_err());
    }

    #[test]
    fn invalid_config_file_fails_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"filter": {"threshold_block": 4}}"#).unwrap();
        let args = Args {
            config: Some(path),
            ..Args::default()
        };
        assert!(args.resolve().is_err());
    }
}
