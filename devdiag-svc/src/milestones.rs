//! Milestone boot-log access
//!
//! The milestone log is an append-only text file, one logical entry per line,
//! written by early-boot components and appended to by this service.

use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default milestone log location on the device
pub const DEFAULT_MILESTONES_FILE: &str = "/opt/logs/milestones.log";

/// Handle to the milestone log file
pub struct MilestoneLog {
    path: PathBuf,
}

impl MilestoneLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all milestone entries, oldest first.
    ///
    /// An absent file is an error; an existing but empty file yields zero
    /// entries. Blank lines are skipped.
    pub fn read(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Err(Error::MilestonesNotFound(self.path.clone()));
        }

        let contents = std::fs::read_to_string(&self.path)?;
        Ok(contents
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Append one marker as a new line.
    ///
    /// An empty marker is rejected before the file is touched.
    pub fn append(&self, marker: &str) -> Result<()> {
        if marker.is_empty() {
            return Err(Error::EmptyMarker);
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", marker)?;

        debug!("milestone logged: {}", marker);
        Ok(())
    }
}
