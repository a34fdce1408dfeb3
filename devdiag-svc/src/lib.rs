//! # devdiag Service Library (devdiag-svc)
//!
//! Device diagnostics daemon: tracks aggregated AV decoder activity with a
//! background poller, fans out change notifications to registered sinks and
//! SSE clients, retrieves remote configuration parameters, and serves the
//! milestone boot log.

use std::sync::Arc;

pub mod api;
pub mod avstatus;
pub mod config;
pub mod error;
pub mod milestones;
pub mod remotecfg;
pub mod sse;

pub use api::build_router;
pub use error::{Error, Result};

use avstatus::StatusTracker;
use milestones::MilestoneLog;
use remotecfg::ConfigClient;
use sse::SseBroadcaster;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// AV decoder status tracker
    pub tracker: Arc<StatusTracker>,
    /// Client for the local configuration endpoint
    pub config_client: Arc<ConfigClient>,
    /// Milestone boot log
    pub milestones: Arc<MilestoneLog>,
    /// Event broadcaster for SSE clients
    pub broadcaster: SseBroadcaster,
}

impl AppState {
    pub fn new(
        tracker: Arc<StatusTracker>,
        config_client: ConfigClient,
        milestones: MilestoneLog,
        broadcaster: SseBroadcaster,
    ) -> Self {
        Self {
            tracker,
            config_client: Arc::new(config_client),
            milestones: Arc::new(milestones),
            broadcaster,
        }
    }
}
