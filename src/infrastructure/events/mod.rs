//! Event Sink Implementations
//!
//! Provides concrete implementations of SyncEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - TracingEventSink: structured log lines

mod json;
mod logging;

pub use json::JsonEventSink;
pub use logging::TracingEventSink;
