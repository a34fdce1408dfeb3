//! Bridge from tracker fan-out to the SSE broadcast channel

use super::broadcaster::SseBroadcaster;
use crate::avstatus::NotificationSink;
use devdiag_common::{DecoderLevel, DiagEvent};

/// Notification sink that forwards decoder transitions to SSE clients.
///
/// The handoff is a lossy broadcast send, so the tracker's poll task is
/// never blocked by slow or absent SSE clients.
pub struct SseSink {
    broadcaster: SseBroadcaster,
}

impl SseSink {
    pub fn new(broadcaster: SseBroadcaster) -> Self {
        Self { broadcaster }
    }
}

impl NotificationSink for SseSink {
    fn on_decoder_status_changed(&self, status: DecoderLevel) {
        self.broadcaster
            .broadcast_lossy(DiagEvent::av_decoder_status_changed(status));
    }
}
