//! AV decoder status tracking
//!
//! The platform resource manager knows the activity level of every decoder
//! but offers no change notification, so a background task polls it at a
//! fixed interval, debounces repeated samples, and fans out one notification
//! per detected transition to every registered sink.

pub mod registry;
pub mod source;
pub mod tracker;

pub use registry::{ListenerRegistry, NotificationSink};
pub use source::{IdleSource, StatusSource};
pub use tracker::{StatusTracker, DEFAULT_POLL_INTERVAL};
