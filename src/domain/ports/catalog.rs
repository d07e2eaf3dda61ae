//! Catalog Port
//!
//! Authenticated access to one catalog instance. Each mirror run holds two
//! of these: one bound to the source, one to the destination.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::{
    NewOrganization, NewPackage, Organization, Package, ResourceSearch, ResourceUpload,
};

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failure talking to a catalog.
///
/// `action` is the API action (`package_show`, ...) or `download`.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The HTTP exchange itself failed
    #[error("{action}: transport error: {message}")]
    Transport { action: &'static str, message: String },

    /// The catalog answered with something that is not an API envelope
    #[error("{action}: HTTP {status} without a JSON API response")]
    Status { action: &'static str, status: u16 },

    /// The envelope parsed but its `result` has an unexpected shape
    #[error("{action}: unexpected response: {message}")]
    Decode { action: &'static str, message: String },

    /// The catalog refused a write (`success: false`)
    #[error("{action} rejected: {error}")]
    Rejected { action: &'static str, error: String },

    /// Reading or writing a local payload file failed
    #[error("{action}: I/O error on {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// The API action that failed
    pub fn action(&self) -> &'static str {
        match self {
            CatalogError::Transport { action, .. }
            | CatalogError::Status { action, .. }
            | CatalogError::Decode { action, .. }
            | CatalogError::Rejected { action, .. }
            | CatalogError::Io { action, .. } => action,
        }
    }
}

/// Operations the reconciler needs from a catalog.
///
/// Lookups by name return `Ok(None)` when the catalog reports the entity as
/// missing; that is a normal branch, not an error.
pub trait Catalog {
    /// Human-readable identity (usually the base URL)
    fn display_name(&self) -> String;

    fn list_organizations(&self) -> CatalogResult<Vec<String>>;

    fn get_organization(&self, id: &str) -> CatalogResult<Option<Organization>>;

    fn create_organization(&self, draft: &NewOrganization) -> CatalogResult<Organization>;

    /// Full replace of an existing organization
    fn update_organization(&self, record: &Organization) -> CatalogResult<Organization>;

    fn list_packages(&self) -> CatalogResult<Vec<String>>;

    fn get_package(&self, id: &str) -> CatalogResult<Option<Package>>;

    fn create_package(&self, draft: &NewPackage) -> CatalogResult<Package>;

    /// Full replace of an existing package
    fn update_package(&self, record: &Package) -> CatalogResult<Package>;

    fn delete_package(&self, name: &str) -> CatalogResult<()>;

    /// Resources whose `hash` field equals `hash`
    fn find_resource_by_hash(&self, hash: &str) -> CatalogResult<ResourceSearch>;

    /// Create a resource whose content is the file at `payload`
    fn create_resource(&self, upload: &ResourceUpload, payload: &Path) -> CatalogResult<()>;

    /// Replace a resource (`upload.id` must be set) with the file at `payload`
    fn update_resource(&self, upload: &ResourceUpload, payload: &Path) -> CatalogResult<()>;

    fn delete_resource(&self, id: &str) -> CatalogResult<()>;

    /// Stream the file at `url` into `dest`
    fn download(&self, url: &str, dest: &Path) -> CatalogResult<()>;
}
