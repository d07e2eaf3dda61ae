//! Mirror Use Case
//!
//! Orchestrates one mirror run:
//! 1. Converge every source organization
//! 2. Converge every source package, then its resources
//! 3. Delete destination packages the source no longer lists
//!
//! Decisions come from the domain planner; this type only sequences catalog
//! calls and adds up the changes it commits.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::entities::{Package, Resource, ResourceUpload};
use crate::domain::ports::{Catalog, CatalogResult, NoopEventSink, SyncEvent, SyncEventSink};
use crate::domain::services::{FieldSet, Planner, RecordAction};
use crate::domain::value_objects::{ChangeKind, ChangeSet, EntityKind};
use crate::error::{SyncError, SyncResult};
use crate::infrastructure::scratch::ScratchDir;

/// Mirror use case - converges a destination catalog onto a source catalog
///
/// Parameterized by both catalogs and the event sink so tests can run it
/// against in-memory catalogs.
pub struct MirrorUseCase<S, D, E = NoopEventSink>
where
    S: Catalog,
    D: Catalog,
    E: SyncEventSink,
{
    source: S,
    destination: D,
    scratch: ScratchDir,
    events: E,
}

impl<S, D> MirrorUseCase<S, D>
where
    S: Catalog,
    D: Catalog,
{
    pub fn new(source: S, destination: D, scratch: ScratchDir) -> Self {
        Self {
            source,
            destination,
            scratch,
            events: NoopEventSink,
        }
    }
}

impl<S, D, E> MirrorUseCase<S, D, E>
where
    S: Catalog,
    D: Catalog,
    E: SyncEventSink,
{
    /// Report progress to `events` instead of discarding it
    pub fn with_events<E2: SyncEventSink>(self, events: E2) -> MirrorUseCase<S, D, E2> {
        MirrorUseCase {
            source: self.source,
            destination: self.destination,
            scratch: self.scratch,
            events,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn destination(&self) -> &D {
        &self.destination
    }

    pub fn scratch(&self) -> &ScratchDir {
        &self.scratch
    }

    /// Mirror the whole catalog.
    ///
    /// Organizations that exist only on the destination are left alone;
    /// packages that exist only on the destination are deleted.
    pub fn sync_all(&self) -> SyncResult<ChangeSet> {
        self.events.on_event(SyncEvent::Started {
            source: self.source.display_name(),
            destination: self.destination.display_name(),
        });

        let mut changes = ChangeSet::new();

        let organizations = self
            .source
            .list_organizations()
            .map_err(SyncError::source_catalog)?;
        for name in &organizations {
            changes += self.sync_organization(name)?;
        }

        let packages = self
            .source
            .list_packages()
            .map_err(SyncError::source_catalog)?;
        for name in &packages {
            changes += self.sync_package(name)?;
        }

        changes += self.prune_packages(&packages)?;

        self.events.on_event(SyncEvent::Completed { changes });
        Ok(changes)
    }

    /// Create or update one organization; at most one change
    pub fn sync_organization(&self, name: &str) -> SyncResult<ChangeSet> {
        self.events.on_event(SyncEvent::OrganizationSyncing {
            name: name.to_string(),
        });

        let source = self
            .source
            .get_organization(name)
            .map_err(SyncError::source_catalog)?
            .ok_or_else(|| SyncError::MissingSource {
                kind: EntityKind::Organization,
                name: name.to_string(),
            })?;
        let existing = self
            .destination
            .get_organization(name)
            .map_err(SyncError::destination_catalog)?;

        let Some(mut record) = existing else {
            self.destination
                .create_organization(&source.draft())
                .map_err(SyncError::destination_catalog)?;
            self.events.on_event(SyncEvent::OrganizationCreated {
                name: name.to_string(),
            });
            return Ok(ChangeSet::single(
                EntityKind::Organization,
                ChangeKind::Created,
            ));
        };

        if !Planner::plan(FieldSet::ORGANIZATION, &source, Some(&record)).is_change() {
            debug!(organization = name, "organization unchanged");
            return Ok(ChangeSet::new());
        }

        let fields = FieldSet::ORGANIZATION.differing(&source, &record);
        record.merge_from_source(&source);
        self.destination
            .update_organization(&record)
            .map_err(SyncError::destination_catalog)?;
        self.events.on_event(SyncEvent::OrganizationUpdated {
            name: name.to_string(),
            fields,
        });
        Ok(ChangeSet::single(
            EntityKind::Organization,
            ChangeKind::Updated,
        ))
    }

    /// Create or update one package, then reconcile its resources
    pub fn sync_package(&self, name: &str) -> SyncResult<ChangeSet> {
        self.events.on_event(SyncEvent::PackageSyncing {
            name: name.to_string(),
        });

        let source = self
            .source
            .get_package(name)
            .map_err(SyncError::source_catalog)?
            .ok_or_else(|| SyncError::MissingSource {
                kind: EntityKind::Package,
                name: name.to_string(),
            })?;
        let existing = self
            .destination
            .get_package(name)
            .map_err(SyncError::destination_catalog)?;

        let mut changes = ChangeSet::new();
        let snapshot = match existing {
            None => {
                let created = self
                    .destination
                    .create_package(&source.draft())
                    .map_err(SyncError::destination_catalog)?;
                self.events.on_event(SyncEvent::PackageCreated {
                    name: name.to_string(),
                });
                changes.record(EntityKind::Package, ChangeKind::Created);
                created
            }
            Some(mut record) => {
                if Planner::plan(FieldSet::PACKAGE, &source, Some(&record)).is_change() {
                    let fields = FieldSet::PACKAGE.differing(&source, &record);
                    record.merge_from_source(&source);
                    self.destination
                        .update_package(&record)
                        .map_err(SyncError::destination_catalog)?;
                    self.events.on_event(SyncEvent::PackageUpdated {
                        name: name.to_string(),
                        fields,
                    });
                    changes.record(EntityKind::Package, ChangeKind::Updated);
                } else {
                    debug!(package = name, "package unchanged");
                }
                record
            }
        };

        changes += self.sync_resources(&source, &snapshot)?;
        Ok(changes)
    }

    /// Upload missing or changed resources, then delete orphans.
    ///
    /// Orphans are found against `destination` as it was before any upload.
    fn sync_resources(&self, source: &Package, destination: &Package) -> SyncResult<ChangeSet> {
        let package_id = destination
            .id
            .as_deref()
            .ok_or_else(|| SyncError::MissingDestinationId {
                name: destination.name.clone(),
            })?;

        let mut changes = ChangeSet::new();
        for resource in &source.resources {
            changes += self.sync_resource(&source.name, package_id, resource)?;
        }

        for orphan in Planner::prune(&source.resources, &destination.resources) {
            self.destination
                .delete_resource(&orphan.id)
                .map_err(SyncError::destination_catalog)?;
            self.events.on_event(SyncEvent::ResourceDeleted {
                package: source.name.clone(),
                name: orphan.label().to_string(),
                hash: orphan.match_key().to_string(),
            });
            changes.record(EntityKind::Resource, ChangeKind::Deleted);
        }

        Ok(changes)
    }

    fn sync_resource(
        &self,
        package: &str,
        package_id: &str,
        resource: &Resource,
    ) -> SyncResult<ChangeSet> {
        let search = self
            .destination
            .find_resource_by_hash(&resource.id)
            .map_err(SyncError::destination_catalog)?;
        if search.count > 1 {
            warn!(
                package,
                hash = %resource.id,
                matches = search.count,
                "several destination resources share a hash; using the first"
            );
        }
        let matched = search.first_match();
        let upload = ResourceUpload::for_transfer(resource, package_id);

        let change = match Planner::plan(FieldSet::RESOURCE, resource, matched) {
            RecordAction::Create => {
                self.transfer(resource, &upload, |payload| {
                    self.destination.create_resource(&upload, payload)
                })?;
                self.events.on_event(SyncEvent::ResourceCreated {
                    package: package.to_string(),
                    name: resource.label().to_string(),
                    hash: resource.id.clone(),
                });
                ChangeKind::Created
            }
            RecordAction::Update => {
                let dest_id = matched.map(|m| m.id.clone()).unwrap_or_default();
                let upload = upload.replacing(dest_id);
                self.transfer(resource, &upload, |payload| {
                    self.destination.update_resource(&upload, payload)
                })?;
                self.events.on_event(SyncEvent::ResourceUpdated {
                    package: package.to_string(),
                    name: resource.label().to_string(),
                    hash: resource.id.clone(),
                });
                ChangeKind::Updated
            }
            RecordAction::Unchanged => {
                debug!(package, resource = %resource.id, "resource unchanged");
                return Ok(ChangeSet::new());
            }
        };

        Ok(ChangeSet::single(EntityKind::Resource, change))
    }

    /// Relay one payload through scratch storage.
    ///
    /// The staged file is removed whether the download or the upload fails.
    fn transfer<F>(&self, resource: &Resource, upload: &ResourceUpload, send: F) -> SyncResult<()>
    where
        F: FnOnce(&Path) -> CatalogResult<()>,
    {
        let url = resource.url.as_deref().unwrap_or_default();
        self.scratch.ensure().map_err(|source| SyncError::Scratch {
            path: self.scratch.path().to_path_buf(),
            source,
        })?;

        let staged = self.scratch.stage(&resource.id, url);
        debug!(hash = %upload.hash, path = %staged.path().display(), "staging payload");
        self.source
            .download(url, staged.path())
            .map_err(SyncError::source_catalog)?;
        send(staged.path()).map_err(SyncError::destination_catalog)?;

        let path = staged.path().to_path_buf();
        staged
            .release()
            .map_err(|source| SyncError::Scratch { path, source })
    }

    /// Delete destination packages missing from `source_names`
    fn prune_packages(&self, source_names: &[String]) -> SyncResult<ChangeSet> {
        let keep: HashSet<&str> = source_names.iter().map(String::as_str).collect();
        let destination_names = self
            .destination
            .list_packages()
            .map_err(SyncError::destination_catalog)?;

        let mut changes = ChangeSet::new();
        for name in destination_names
            .iter()
            .filter(|name| !keep.contains(name.as_str()))
        {
            self.destination
                .delete_package(name)
                .map_err(SyncError::destination_catalog)?;
            self.events.on_event(SyncEvent::PackageDeleted { name: name.clone() });
            changes.record(EntityKind::Package, ChangeKind::Deleted);
        }
        Ok(changes)
    }
}
