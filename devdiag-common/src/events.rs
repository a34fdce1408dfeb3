//! Event types for the devdiag event system

use crate::level::DecoderLevel;
use serde::{Deserialize, Serialize};

/// Diagnostic event types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DiagEvent {
    /// The aggregated AV decoder activity level changed
    AvDecoderStatusChanged {
        status: DecoderLevel,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl DiagEvent {
    /// Build an AvDecoderStatusChanged event stamped with the current time
    pub fn av_decoder_status_changed(status: DecoderLevel) -> Self {
        DiagEvent::AvDecoderStatusChanged {
            status,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Event name used on the wire (SSE event field)
    pub fn name(&self) -> &'static str {
        match self {
            DiagEvent::AvDecoderStatusChanged { .. } => "AvDecoderStatusChanged",
        }
    }
}
