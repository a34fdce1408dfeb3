//! Listener registry and notification fan-out

use crate::error::{Error, Result};
use devdiag_common::DecoderLevel;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Receiver of decoder status change notifications.
///
/// The callback is invoked synchronously from the tracker's poll task, once
/// per detected transition, never concurrently with another notification to
/// the same sink. A slow callback delays delivery to later-registered sinks
/// and the next poll cycle, so sinks must be fast or hand off to their own
/// async context internally.
///
/// The callback may read the tracker's current status, but must not register
/// or unregister listeners (the registry guard is held during fan-out).
pub trait NotificationSink: Send + Sync {
    /// Called with the new level after each detected transition
    fn on_decoder_status_changed(&self, status: DecoderLevel);
}

/// Ordered set of registered notification sinks.
///
/// Sinks are identified by the Arc they were registered with: registering the
/// same Arc twice is rejected, and unregister only accepts an Arc that is
/// currently registered. Guarded independently of the tracker's status cell
/// so a sink callback can read the current status without deadlocking.
pub struct ListenerRegistry {
    listeners: Mutex<Vec<Arc<dyn NotificationSink>>>,
}

/// Identity of a sink registration: the Arc's data pointer
fn sink_ptr(sink: &Arc<dyn NotificationSink>) -> *const () {
    Arc::as_ptr(sink) as *const ()
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Add a sink, rejecting duplicates.
    ///
    /// A duplicate registration is reported as an error rather than ignored
    /// so a double-subscribe bug is visible to the caller.
    pub fn register(&self, sink: Arc<dyn NotificationSink>) -> Result<()> {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);

        if listeners.iter().any(|l| sink_ptr(l) == sink_ptr(&sink)) {
            return Err(Error::AlreadyRegistered);
        }

        listeners.push(sink);
        debug!("listener registered, {} total", listeners.len());
        Ok(())
    }

    /// Remove a sink, failing if it was never registered
    pub fn unregister(&self, sink: &Arc<dyn NotificationSink>) -> Result<()> {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);

        let position = listeners
            .iter()
            .position(|l| sink_ptr(l) == sink_ptr(sink))
            .ok_or(Error::ListenerNotFound)?;

        listeners.remove(position);
        debug!("listener unregistered, {} remaining", listeners.len());
        Ok(())
    }

    /// Number of currently registered sinks
    pub fn len(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver one notification to every registered sink, in registration
    /// order, under the registry guard.
    pub fn notify_all(&self, status: DecoderLevel) {
        let listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);

        for listener in listeners.iter() {
            listener.on_decoder_status_changed(status);
        }
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
