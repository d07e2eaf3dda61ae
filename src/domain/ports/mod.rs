//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod catalog;
pub mod sync_events;

pub use catalog::{Catalog, CatalogError, CatalogResult};
pub use sync_events::{NoopEventSink, SyncEvent, SyncEventSink};
