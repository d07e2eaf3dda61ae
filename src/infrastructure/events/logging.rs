//! Tracing Event Sink
//!
//! Reports sync events as structured log lines. Committed writes log at
//! `info`, progress markers at `debug`.

use tracing::{debug, info};

use crate::domain::ports::{SyncEvent, SyncEventSink};

/// Event sink backed by the `tracing` subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl SyncEventSink for TracingEventSink {
    fn on_event(&self, event: SyncEvent) {
        match event {
            SyncEvent::Started {
                source,
                destination,
            } => info!(%source, %destination, "mirror started"),
            SyncEvent::OrganizationSyncing { name } => {
                debug!(organization = %name, "syncing organization")
            }
            SyncEvent::OrganizationCreated { name } => {
                info!(organization = %name, "organization created")
            }
            SyncEvent::OrganizationUpdated { name, fields } => {
                info!(organization = %name, fields = ?fields, "organization updated")
            }
            SyncEvent::PackageSyncing { name } => debug!(package = %name, "syncing package"),
            SyncEvent::PackageCreated { name } => info!(package = %name, "package created"),
            SyncEvent::PackageUpdated { name, fields } => {
                info!(package = %name, fields = ?fields, "package updated")
            }
            SyncEvent::PackageDeleted { name } => info!(package = %name, "package deleted"),
            SyncEvent::ResourceCreated {
                package,
                name,
                hash,
            } => info!(%package, resource = %name, %hash, "resource created"),
            SyncEvent::ResourceUpdated {
                package,
                name,
                hash,
            } => info!(%package, resource = %name, %hash, "resource updated"),
            SyncEvent::ResourceDeleted {
                package,
                name,
                hash,
            } => info!(%package, resource = %name, %hash, "resource deleted"),
            SyncEvent::Completed { changes } => info!(
                total = changes.total(),
                organizations = changes.organizations.total(),
                packages = changes.packages.total(),
                resources = changes.resources.total(),
                "mirror finished"
            ),
        }
    }
}
