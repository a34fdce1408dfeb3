//! Pollable source of the aggregated decoder activity level

use devdiag_common::DecoderLevel;
use tracing::warn;

/// Provider of the current aggregated decoder activity level.
///
/// Implementations wrap an opaque platform query. The query has no error
/// channel: an implementation that cannot reach its backend reports a prior
/// or default level instead of failing, so the poll loop never sees an error.
/// The query is called once per poll interval and must bound its own latency.
pub trait StatusSource: Send + Sync {
    /// Sample the current level of the most active decoder
    fn query(&self) -> DecoderLevel;
}

/// Fallback source for platforms without a resource manager.
///
/// Always reports Idle, matching the behavior of a device with no decoder
/// activity visible.
pub struct IdleSource;

impl IdleSource {
    pub fn new() -> Self {
        warn!("no platform resource manager available, decoder status will always be reported as IDLE");
        Self
    }
}

impl Default for IdleSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSource for IdleSource {
    fn query(&self) -> DecoderLevel {
        DecoderLevel::Idle
    }
}
