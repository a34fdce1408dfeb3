//! Daemon configuration
//!
//! Merges command-line/environment overrides over the TOML config file over
//! compiled defaults.

use crate::milestones::DEFAULT_MILESTONES_FILE;
use crate::remotecfg::DEFAULT_CONFIG_ENDPOINT;
use devdiag_common::config::FileConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 5760;

/// Resolved daemon configuration
#[derive(Debug, Clone)]
pub struct SvcConfig {
    /// HTTP listen port
    pub port: u16,
    /// Remote configuration endpoint URL
    pub config_endpoint: String,
    /// Milestone log file path
    pub milestones_file: PathBuf,
    /// AV decoder status poll interval
    pub poll_interval: Duration,
}

/// Per-setting overrides from the command line (clap fills these from args
/// or environment variables)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub config_endpoint: Option<String>,
    pub milestones_file: Option<PathBuf>,
    pub poll_interval_secs: Option<u64>,
}

impl SvcConfig {
    /// Resolve each setting: override > config file > default
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Self {
        Self {
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            config_endpoint: overrides
                .config_endpoint
                .or(file.config_endpoint)
                .unwrap_or_else(|| DEFAULT_CONFIG_ENDPOINT.to_string()),
            milestones_file: overrides
                .milestones_file
                .or(file.milestones_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MILESTONES_FILE)),
            poll_interval: Duration::from_secs(
                overrides
                    .poll_interval_secs
                    .or(file.poll_interval_secs)
                    .unwrap_or(crate::avstatus::DEFAULT_POLL_INTERVAL.as_secs()),
            ),
        }
    }
}
