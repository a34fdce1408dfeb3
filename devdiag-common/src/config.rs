//! Configuration file discovery and loading
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Tiers 1 and 2 are handled by the daemon's argument parser; this module
//! provides tier 3: locating and parsing the TOML config file.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

/// Optional settings read from the TOML config file.
///
/// Every field is optional; absent fields fall through to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    /// HTTP listen port
    pub port: Option<u16>,
    /// Remote configuration endpoint URL
    pub config_endpoint: Option<String>,
    /// Milestone log file path
    pub milestones_file: Option<PathBuf>,
    /// AV decoder status poll interval, in seconds
    pub poll_interval_secs: Option<u64>,
}

impl FileConfig {
    /// Parse a config file's contents
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config(format!("invalid config file: {}", e)))
    }

    /// Load a config file from an explicit path
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

/// Locate the config file for the platform.
///
/// Tries `~/.config/devdiag/config.toml` first, then `/etc/devdiag/config.toml`
/// on Linux. Returns None when no config file exists (not an error).
pub fn find_config_file() -> Option<PathBuf> {
    if let Some(path) = dirs::config_dir().map(|d| d.join("devdiag").join("config.toml")) {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/devdiag/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Load the platform config file, or defaults when none exists.
///
/// A missing file is fine; a file that exists but fails to parse is an error
/// so a typo does not silently fall back to defaults.
pub fn load_file_config() -> Result<FileConfig> {
    match find_config_file() {
        Some(path) => {
            info!("Loading config file: {}", path.display());
            FileConfig::load_from(&path)
        }
        None => Ok(FileConfig::default()),
    }
}
