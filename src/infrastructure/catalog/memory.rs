//! In-memory Catalog
//!
//! A complete `Catalog` held in process memory. Used by the reconciler tests
//! and by embedders that want to dry-run a mirror against a snapshot.
//!
//! Behaves like the action API where the mirror depends on it: lookups of
//! unknown names are `None`, duplicate creates are rejected, uploaded
//! resources get fresh ids and appear in `resource_search` by `hash`.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use crate::domain::entities::{
    NewOrganization, NewPackage, Organization, Package, ResourceSearch, ResourceUpload,
};
use crate::domain::ports::{Catalog, CatalogError, CatalogResult};

#[derive(Debug, Default)]
struct MemoryState {
    organizations: BTreeMap<String, Organization>,
    packages: BTreeMap<String, Package>,
    /// Payloads served by `download`, keyed by URL
    files: HashMap<String, Vec<u8>>,
    /// Payloads received by resource create/update, keyed by resource id
    uploads: HashMap<String, Vec<u8>>,
    next_id: u64,
    downloads: usize,
    writes: usize,
    failing: HashSet<&'static str>,
}

impl MemoryState {
    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn package_by_id_mut(&mut self, id: &str) -> Option<&mut Package> {
        self.packages
            .values_mut()
            .find(|pkg| pkg.id.as_deref() == Some(id))
    }

    fn organization_ref(&self, name: &str) -> Organization {
        self.organizations
            .get(name)
            .cloned()
            .unwrap_or_else(|| Organization::named(name))
    }
}

/// Catalog backed by in-process maps
#[derive(Debug)]
pub struct MemoryCatalog {
    name: String,
    state: RefCell<MemoryState>,
}

impl MemoryCatalog {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: RefCell::new(MemoryState::default()),
        }
    }

    /// Seed an organization; an id is assigned if it has none
    pub fn with_organization(self, mut organization: Organization) -> Self {
        {
            let mut state = self.state.borrow_mut();
            if organization.id.is_none() {
                organization.id = Some(state.fresh_id("org"));
            }
            state
                .organizations
                .insert(organization.name.clone(), organization);
        }
        self
    }

    /// Seed a package, including its resources, exactly as given
    pub fn with_package(self, mut package: Package) -> Self {
        {
            let mut state = self.state.borrow_mut();
            if package.id.is_none() {
                package.id = Some(state.fresh_id("pkg"));
            }
            state.packages.insert(package.name.clone(), package);
        }
        self
    }

    /// Serve `bytes` for downloads of `url`
    pub fn with_file(self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.state
            .borrow_mut()
            .files
            .insert(url.into(), bytes.into());
        self
    }

    /// Make every call of `action` fail as a rejection
    pub fn fail_on(&self, action: &'static str) {
        self.state.borrow_mut().failing.insert(action);
    }

    pub fn organization(&self, name: &str) -> Option<Organization> {
        self.state.borrow().organizations.get(name).cloned()
    }

    pub fn package(&self, name: &str) -> Option<Package> {
        self.state.borrow().packages.get(name).cloned()
    }

    pub fn package_names(&self) -> Vec<String> {
        self.state.borrow().packages.keys().cloned().collect()
    }

    /// Payload last uploaded for a resource
    pub fn uploaded(&self, resource_id: &str) -> Option<Vec<u8>> {
        self.state.borrow().uploads.get(resource_id).cloned()
    }

    pub fn download_count(&self) -> usize {
        self.state.borrow().downloads
    }

    /// Number of successful mutating calls
    pub fn write_count(&self) -> usize {
        self.state.borrow().writes
    }

    fn check(&self, action: &'static str) -> CatalogResult<()> {
        if self.state.borrow().failing.contains(action) {
            return Err(rejected(action, "injected failure"));
        }
        Ok(())
    }

    fn store_upload(
        &self,
        action: &'static str,
        upload: &ResourceUpload,
        payload: &Path,
    ) -> CatalogResult<()> {
        self.check(action)?;
        let bytes = std::fs::read(payload).map_err(|source| CatalogError::Io {
            action,
            path: payload.to_path_buf(),
            source,
        })?;

        let mut state = self.state.borrow_mut();
        let id = match &upload.id {
            Some(id) => id.clone(),
            None => state.fresh_id("res"),
        };
        let package = state
            .package_by_id_mut(&upload.package_id)
            .ok_or_else(|| rejected(action, "package not found"))?;
        let record = upload.to_resource(id.as_str());
        match package.resources.iter_mut().find(|r| r.id == id) {
            Some(existing) => *existing = record,
            None if upload.id.is_some() => return Err(rejected(action, "resource not found")),
            None => package.resources.push(record),
        }
        state.uploads.insert(id, bytes);
        state.writes += 1;
        Ok(())
    }
}

impl Catalog for MemoryCatalog {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn list_organizations(&self) -> CatalogResult<Vec<String>> {
        self.check("organization_list")?;
        Ok(self.state.borrow().organizations.keys().cloned().collect())
    }

    fn get_organization(&self, id: &str) -> CatalogResult<Option<Organization>> {
        self.check("organization_show")?;
        let state = self.state.borrow();
        Ok(state
            .organizations
            .values()
            .find(|org| org.name == id || org.id.as_deref() == Some(id))
            .cloned())
    }

    fn create_organization(&self, draft: &NewOrganization) -> CatalogResult<Organization> {
        self.check("organization_create")?;
        let mut state = self.state.borrow_mut();
        if state.organizations.contains_key(&draft.name) {
            return Err(rejected("organization_create", "name already in use"));
        }
        let mut created = Organization::from(draft.clone());
        created.id = Some(state.fresh_id("org"));
        state
            .organizations
            .insert(created.name.clone(), created.clone());
        state.writes += 1;
        Ok(created)
    }

    fn update_organization(&self, record: &Organization) -> CatalogResult<Organization> {
        self.check("organization_update")?;
        let mut state = self.state.borrow_mut();
        match state.organizations.get_mut(&record.name) {
            Some(existing) => *existing = record.clone(),
            None => return Err(rejected("organization_update", "not found")),
        }
        state.writes += 1;
        Ok(record.clone())
    }

    fn list_packages(&self) -> CatalogResult<Vec<String>> {
        self.check("package_list")?;
        Ok(self.package_names())
    }

    fn get_package(&self, id: &str) -> CatalogResult<Option<Package>> {
        self.check("package_show")?;
        let state = self.state.borrow();
        Ok(state
            .packages
            .values()
            .find(|pkg| pkg.name == id || pkg.id.as_deref() == Some(id))
            .cloned())
    }

    fn create_package(&self, draft: &NewPackage) -> CatalogResult<Package> {
        self.check("package_create")?;
        let mut state = self.state.borrow_mut();
        if state.packages.contains_key(&draft.name) {
            return Err(rejected("package_create", "That URL is already in use."));
        }
        let mut created = Package::from(draft.clone());
        created.id = Some(state.fresh_id("pkg"));
        created.organization = draft
            .owner_org
            .as_deref()
            .map(|name| state.organization_ref(name));
        state.packages.insert(created.name.clone(), created.clone());
        state.writes += 1;
        Ok(created)
    }

    fn update_package(&self, record: &Package) -> CatalogResult<Package> {
        self.check("package_update")?;
        let mut state = self.state.borrow_mut();
        if !state.packages.contains_key(&record.name) {
            return Err(rejected("package_update", "not found"));
        }
        let mut updated = record.clone();
        updated.organization = record
            .owner_org
            .as_deref()
            .map(|name| state.organization_ref(name));
        state.packages.insert(updated.name.clone(), updated.clone());
        state.writes += 1;
        Ok(updated)
    }

    fn delete_package(&self, name: &str) -> CatalogResult<()> {
        self.check("package_delete")?;
        let mut state = self.state.borrow_mut();
        if state.packages.remove(name).is_none() {
            return Err(rejected("package_delete", "not found"));
        }
        state.writes += 1;
        Ok(())
    }

    fn find_resource_by_hash(&self, hash: &str) -> CatalogResult<ResourceSearch> {
        self.check("resource_search")?;
        let state = self.state.borrow();
        let results: Vec<_> = state
            .packages
            .values()
            .flat_map(|pkg| pkg.resources.iter())
            .filter(|resource| resource.hash.as_deref() == Some(hash))
            .cloned()
            .collect();
        Ok(ResourceSearch {
            count: results.len(),
            results,
        })
    }

    fn create_resource(&self, upload: &ResourceUpload, payload: &Path) -> CatalogResult<()> {
        self.store_upload("resource_create", upload, payload)
    }

    fn update_resource(&self, upload: &ResourceUpload, payload: &Path) -> CatalogResult<()> {
        if upload.id.is_none() {
            return Err(rejected("resource_update", "id is required"));
        }
        self.store_upload("resource_update", upload, payload)
    }

    fn delete_resource(&self, id: &str) -> CatalogResult<()> {
        self.check("resource_delete")?;
        let mut state = self.state.borrow_mut();
        let owner = state
            .packages
            .values_mut()
            .find(|pkg| pkg.resources.iter().any(|r| r.id == id));
        match owner {
            Some(pkg) => pkg.resources.retain(|r| r.id != id),
            None => return Err(rejected("resource_delete", "not found")),
        }
        state.uploads.remove(id);
        state.writes += 1;
        Ok(())
    }

    fn download(&self, url: &str, dest: &Path) -> CatalogResult<()> {
        self.check("download")?;
        let bytes = self
            .state
            .borrow()
            .files
            .get(url)
            .cloned()
            .ok_or(CatalogError::Status {
                action: "download",
                status: 404,
            })?;
        std::fs::write(dest, bytes).map_err(|source| CatalogError::Io {
            action: "download",
            path: dest.to_path_buf(),
            source,
        })?;
        self.state.borrow_mut().downloads += 1;
        Ok(())
    }
}

fn rejected(action: &'static str, error: &str) -> CatalogError {
    CatalogError::Rejected {
        action,
        error: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Resource;
    use tempfile::tempdir;

    fn catalog_with_package() -> MemoryCatalog {
        let mut package = Package::named("p1");
        package.id = Some("pkg-p1".to_string());
        MemoryCatalog::new("memory").with_package(package)
    }

    #[test]
    fn unknown_lookup_is_none() {
        let catalog = MemoryCatalog::new("memory");
        assert_eq!(catalog.get_organization("nope").unwrap(), None);
        assert_eq!(catalog.get_package("nope").unwrap(), None);
    }

    #[test]
    fn duplicate_create_is_rejected() {
        let catalog = MemoryCatalog::new("memory").with_organization(Organization::named("org1"));
        let err = catalog
            .create_organization(&Organization::named("org1").draft())
            .unwrap_err();
        assert!(matches!(err, CatalogError::Rejected { .. }));
    }

    #[test]
    fn uploaded_resource_is_searchable_by_hash() {
        let dir = tempdir().unwrap();
        let payload = dir.path().join("abc-f.csv");
        std::fs::write(&payload, b"a,b").unwrap();
        let catalog = catalog_with_package();

        let upload = ResourceUpload::for_transfer(&Resource::with_id("abc"), "pkg-p1");
        catalog.create_resource(&upload, &payload).unwrap();

        let search = catalog.find_resource_by_hash("abc").unwrap();
        assert_eq!(search.count, 1);
        let id = search.results[0].id.clone();
        assert_eq!(catalog.uploaded(&id), Some(b"a,b".to_vec()));
        assert_eq!(catalog.package("p1").unwrap().resources.len(), 1);
    }

    #[test]
    fn upload_without_payload_file_fails() {
        let dir = tempdir().unwrap();
        let catalog = catalog_with_package();
        let upload = ResourceUpload::for_transfer(&Resource::with_id("abc"), "pkg-p1");

        let err = catalog
            .create_resource(&upload, &dir.path().join("missing"))
            .unwrap_err();

        assert!(matches!(err, CatalogError::Io { .. }));
        assert_eq!(catalog.write_count(), 0);
    }

    #[test]
    fn download_writes_served_file() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("out");
        let catalog = MemoryCatalog::new("memory").with_file("http://src/f.csv", "x,y");

        catalog.download("http://src/f.csv", &dest).unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"x,y");
        assert_eq!(catalog.download_count(), 1);
    }

    #[test]
    fn download_of_unknown_url_is_404() {
        let dir = tempdir().unwrap();
        let err = MemoryCatalog::new("memory")
            .download("http://src/none", &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Status { status: 404, .. }));
    }

    #[test]
    fn injected_failure_rejects_action() {
        let catalog = MemoryCatalog::new("memory");
        catalog.fail_on("package_list");
        assert!(catalog.list_packages().is_err());
        assert!(catalog.list_organizations().is_ok());
    }
}
