//! SSE delivery of diagnostic events

pub mod broadcaster;
pub mod sink;

pub use broadcaster::SseBroadcaster;
pub use sink::SseSink;
