//! ckan-mirror - one-way mirroring between CKAN catalogs
//!
//! Copies organizations, datasets (packages) and their file resources from a
//! source catalog to a destination catalog. Every run recomputes the full
//! difference; the source always wins and nothing is persisted between runs.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::MirrorUseCase;
pub use config::{Config, MirrorSettings};
pub use domain::entities::{Organization, Package, Resource};
pub use domain::ports::{Catalog, CatalogError, CatalogResult, SyncEvent, SyncEventSink};
pub use domain::value_objects::{ChangeSet, Side};
pub use error::{ConfigError, SyncError, SyncResult};
pub use infrastructure::{CkanClient, MemoryCatalog, ScratchDir};
