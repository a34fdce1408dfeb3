//! Error types for devdiag-svc
//!
//! Defines daemon-specific error types using thiserror for clear error
//! propagation.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the devdiag daemon
#[derive(Error, Debug)]
pub enum Error {
    /// Notification sink registered a second time
    #[error("listener is already registered")]
    AlreadyRegistered,

    /// Unregister called for a sink that was never registered
    #[error("listener is not registered")]
    ListenerNotFound,

    /// Milestone append called with an empty marker
    #[error("milestone marker must not be empty")]
    EmptyMarker,

    /// Milestone log file does not exist
    #[error("milestone log not found: {}", .0.display())]
    MilestonesNotFound(PathBuf),

    /// Configuration endpoint replied with a non-success status
    #[error("configuration endpoint returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),

    /// Configuration endpoint transport failure (unreachable, timeout, bad body)
    #[error("configuration transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience Result type using the devdiag-svc Error
pub type Result<T> = std::result::Result<T, Error>;
