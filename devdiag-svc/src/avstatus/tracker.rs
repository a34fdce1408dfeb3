//! Background AV decoder status tracker
//!
//! Owns the poll task that samples the status source, the shared cell holding
//! the last committed level, and the listener registry used for fan-out.

use super::registry::{ListenerRegistry, NotificationSink};
use super::source::StatusSource;
use crate::error::Result;
use devdiag_common::DecoderLevel;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Default interval between status source samples
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Tracks the aggregated AV decoder activity level.
///
/// One dedicated poll task samples the source every interval, commits the
/// value when it differs from the last committed one, and fans out a single
/// notification per transition. `current_status` is callable from any thread
/// at any time, including from inside a sink callback: the status lock is
/// released before fan-out begins.
pub struct StatusTracker {
    source: Arc<dyn StatusSource>,
    interval: Duration,
    current: Arc<Mutex<DecoderLevel>>,
    registry: Arc<ListenerRegistry>,
    cancel: CancellationToken,
    poll_task: Mutex<Option<JoinHandle<()>>>,
}

impl StatusTracker {
    /// Create a tracker in the stopped state with the status cell at Idle
    pub fn new(source: Arc<dyn StatusSource>, interval: Duration) -> Self {
        Self {
            source,
            interval,
            current: Arc::new(Mutex::new(DecoderLevel::Idle)),
            registry: Arc::new(ListenerRegistry::new()),
            cancel: CancellationToken::new(),
            poll_task: Mutex::new(None),
        }
    }

    /// Spawn the poll task.
    ///
    /// Panics if the tracker is already running: start is wired exactly once
    /// by the owner at construction time, so a second call is a bug there,
    /// not a runtime condition to tolerate.
    pub fn start(&self) {
        let mut slot = self.poll_task.lock().unwrap_or_else(PoisonError::into_inner);
        assert!(slot.is_none(), "status tracker already started");

        let handle = tokio::spawn(poll_loop(
            self.source.clone(),
            self.interval,
            self.current.clone(),
            self.registry.clone(),
            self.cancel.clone(),
        ));
        *slot = Some(handle);
    }

    /// Request the poll task to exit and wait for it to finish.
    ///
    /// Wakes a blocked interval wait immediately rather than letting it run
    /// out, so shutdown latency does not depend on the poll interval. An
    /// in-flight fan-out is drained, not abandoned. Safe to call when the
    /// tracker was never started, and safe to call more than once.
    pub async fn stop(&self) {
        self.cancel.cancel();

        let handle = self
            .poll_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                error!("poll task join failed: {}", e);
            }
            info!("AV decoder status tracker stopped");
        }
    }

    /// Last committed decoder level.
    ///
    /// Returns the initial Idle default until the first poll cycle commits
    /// a change.
    pub fn current_status(&self) -> DecoderLevel {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a sink for status change notifications
    pub fn register_listener(&self, sink: Arc<dyn NotificationSink>) -> Result<()> {
        self.registry.register(sink)
    }

    /// Remove a previously registered sink
    pub fn unregister_listener(&self, sink: &Arc<dyn NotificationSink>) -> Result<()> {
        self.registry.unregister(sink)
    }

    /// Number of currently registered sinks
    pub fn listener_count(&self) -> usize {
        self.registry.len()
    }
}

impl Drop for StatusTracker {
    fn drop(&mut self) {
        // Cannot join from a sync drop; the cancelled task exits on its own
        // at the next wait.
        self.cancel.cancel();
    }
}

/// One cycle: cancellable interval wait, sample, debounce, commit, fan out.
async fn poll_loop(
    source: Arc<dyn StatusSource>,
    interval: Duration,
    current: Arc<Mutex<DecoderLevel>>,
    registry: Arc<ListenerRegistry>,
    cancel: CancellationToken,
) {
    info!(
        "AV decoder status poll task started ({}s interval)",
        interval.as_secs_f64()
    );

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = time::sleep(interval) => {}
        }

        let observed = source.query();

        // Commit under the status guard, released before fan-out so a sink
        // callback can read the current status without deadlocking.
        let changed = {
            let mut committed = current.lock().unwrap_or_else(PoisonError::into_inner);
            if *committed == observed {
                false
            } else {
                *committed = observed;
                true
            }
        };

        if changed {
            debug!("decoder status changed to {}", observed);
            registry.notify_all(observed);
        }
    }

    info!("AV decoder status poll task exiting");
}
