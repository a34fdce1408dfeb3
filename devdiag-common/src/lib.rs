//! # devdiag Common Library
//!
//! Shared code for the devdiag diagnostics service:
//! - Error types
//! - Decoder activity level value type
//! - Diagnostic event types (DiagEvent enum)
//! - Configuration file discovery and loading

pub mod config;
pub mod error;
pub mod events;
pub mod level;

pub use error::{Error, Result};
pub use events::DiagEvent;
pub use level::DecoderLevel;
