//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `catalog/` - Catalog implementations (CKAN over HTTP, in-memory)
//! - `events/` - Sync event sinks (tracing, NDJSON)
//! - `scratch` - Local staging of resource payloads

pub mod catalog;
pub mod events;
pub mod scratch;

// Re-export for convenience
pub use catalog::{CkanClient, MemoryCatalog};
pub use events::{JsonEventSink, TracingEventSink};
pub use scratch::{ScratchDir, ScratchFile};
