//! Sync Event Port
//!
//! Provides an observable interface for mirror runs.
//! Every committed create/update/delete is reported as it happens.

use crate::domain::value_objects::ChangeSet;

/// Event emitted during a mirror run
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// Run started
    Started { source: String, destination: String },

    /// An organization is about to be compared
    OrganizationSyncing { name: String },
    OrganizationCreated { name: String },
    OrganizationUpdated { name: String, fields: Vec<&'static str> },

    /// A package is about to be compared
    PackageSyncing { name: String },
    PackageCreated { name: String },
    PackageUpdated { name: String, fields: Vec<&'static str> },
    /// Package existed only on the destination
    PackageDeleted { name: String },

    ResourceCreated { package: String, name: String, hash: String },
    ResourceUpdated { package: String, name: String, hash: String },
    /// Resource had no source counterpart
    ResourceDeleted { package: String, name: String, hash: String },

    /// Run finished
    Completed { changes: ChangeSet },
}

/// Trait for receiving sync events
///
/// Implementations:
/// - `TracingEventSink`: structured log lines
/// - `JsonEventSink`: NDJSON event stream for automation
/// - `NoopEventSink`: silent operation
pub trait SyncEventSink {
    fn on_event(&self, event: SyncEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl SyncEventSink for NoopEventSink {
    fn on_event(&self, _event: SyncEvent) {}
}

impl<T: SyncEventSink + ?Sized> SyncEventSink for &T {
    fn on_event(&self, event: SyncEvent) {
        (**self).on_event(event)
    }
}
