//! Common test utilities for ckan-mirror scenario tests.
//!
//! This module provides:
//! - Record fixtures: organizations, packages and resources as a catalog
//!   would return them
//! - `Mirror`: a use case over two in-memory catalogs with a private
//!   scratch directory

#![allow(dead_code)]

use std::path::Path;

use ckan_mirror::domain::entities::{Organization, Package, Resource};
use ckan_mirror::infrastructure::{MemoryCatalog, ScratchDir};
use ckan_mirror::MirrorUseCase;
use tempfile::TempDir;

pub const SOURCE_URL: &str = "https://source.example.org/api/3/";

/// Download URL the source serves for a resource
pub fn file_url(package: &str, resource_id: &str, file: &str) -> String {
    format!(
        "https://source.example.org/dataset/{}/resource/{}/download/{}",
        package, resource_id, file
    )
}

pub fn organization(name: &str, title: &str) -> Organization {
    Organization {
        title: Some(title.to_string()),
        display_name: Some(title.to_string()),
        description: Some(format!("{} datasets", title)),
        state: Some("active".to_string()),
        kind: Some("organization".to_string()),
        approval_status: Some("approved".to_string()),
        ..Organization::named(name)
    }
}

pub fn source_resource(package: &str, id: &str, file: &str, position: i64) -> Resource {
    Resource {
        name: Some(file.to_string()),
        format: Some("CSV".to_string()),
        url: Some(file_url(package, id, file)),
        position: Some(position),
        ..Resource::with_id(id)
    }
}

/// What a previous mirror run left on the destination for a source resource
pub fn mirrored_resource(dest_id: &str, source: &Resource) -> Resource {
    Resource {
        name: source.name.clone(),
        description: source.description.clone(),
        format: source.format.clone(),
        url: Some(String::new()),
        position: source.position,
        hash: Some(source.id.clone()),
        ..Resource::with_id(dest_id)
    }
}

pub fn package(name: &str, id: &str, org: &str, resources: Vec<Resource>) -> Package {
    Package {
        id: Some(id.to_string()),
        title: Some(format!("{} title", name)),
        notes: Some(format!("About {}", name)),
        state: Some("active".to_string()),
        organization: Some(Organization::named(org)),
        owner_org: Some(org.to_string()),
        resources,
        ..Package::named(name)
    }
}

/// Add a package to the source together with the payloads of its resources
pub fn with_served_package(catalog: MemoryCatalog, package: Package) -> MemoryCatalog {
    let catalog = package.resources.iter().fold(catalog, |catalog, resource| {
        let url = resource.url.clone().unwrap_or_default();
        let body = format!("payload of {}", resource.id);
        catalog.with_file(url, body)
    });
    catalog.with_package(package)
}

/// A mirror between two in-memory catalogs
pub struct Mirror {
    pub use_case: MirrorUseCase<MemoryCatalog, MemoryCatalog>,
    pub scratch: TempDir,
}

impl Mirror {
    pub fn new(source: MemoryCatalog, destination: MemoryCatalog) -> Self {
        let scratch = tempfile::tempdir().unwrap();
        let use_case = MirrorUseCase::new(source, destination, ScratchDir::new(scratch.path()));
        Self { use_case, scratch }
    }

    pub fn source(&self) -> &MemoryCatalog {
        self.use_case.source()
    }

    pub fn destination(&self) -> &MemoryCatalog {
        self.use_case.destination()
    }

    pub fn scratch_path(&self) -> &Path {
        self.scratch.path()
    }

    /// Number of files left in the scratch directory
    pub fn leftover_files(&self) -> usize {
        std::fs::read_dir(self.scratch.path()).unwrap().count()
    }
}
