//! SSE broadcaster for real-time client updates

use axum::{
    response::sse::{Event, KeepAlive, Sse},
};
use devdiag_common::DiagEvent;
use futures::stream::{Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{info, warn};

/// SSE Broadcaster manages client connections and event distribution
#[derive(Clone)]
pub struct SseBroadcaster {
    tx: broadcast::Sender<DiagEvent>,
}

impl SseBroadcaster {
    /// Create a new SSE broadcaster
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of events to buffer per lagging client
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        info!("SSE broadcaster initialized with capacity {}", capacity);
        Self { tx }
    }

    /// Broadcast an event, ignoring if no clients are connected
    pub fn broadcast_lossy(&self, event: DiagEvent) {
        let _ = self.tx.send(event);
    }

    /// Get current number of connected clients
    pub fn client_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Subscribe to the raw event stream
    pub fn subscribe(&self) -> broadcast::Receiver<DiagEvent> {
        self.tx.subscribe()
    }

    /// Create an SSE stream for a new client connection
    pub fn subscribe_stream(&self) -> impl Stream<Item = Result<Event, Infallible>> {
        let rx = self.tx.subscribe();
        let stream = BroadcastStream::new(rx);

        stream.filter_map(|result| async move {
            match result {
                Ok(diag_event) => {
                    let event = Event::default()
                        .event(diag_event.name())
                        .json_data(&diag_event)
                        .ok();
                    event.map(Ok)
                }
                Err(e) => {
                    // A lagging client dropped events; log and continue
                    warn!("SSE client lagged: {:?}", e);
                    None
                }
            }
        })
    }

    /// Create an Axum SSE response for a new client connection
    ///
    /// This is the handler body for GET /api/v1/events
    pub fn handle_sse_connection(&self) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
        info!("New SSE client connected, total clients: {}", self.client_count());

        Sse::new(self.subscribe_stream()).keep_alive(
            KeepAlive::new()
                .interval(Duration::from_secs(30))
                .text("keep-alive"),
        )
    }
}
