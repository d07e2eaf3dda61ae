//! HTTP Catalog Client
//!
//! Implements the Catalog port against a CKAN action API with a blocking
//! reqwest client. Calls are strictly sequential; there is no retry.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use reqwest::blocking::{multipart, Client, RequestBuilder};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::config::{Endpoint, HttpConfig};
use crate::domain::entities::{
    NewOrganization, NewPackage, Organization, Package, ResourceSearch, ResourceUpload,
};
use crate::domain::ports::{Catalog, CatalogError, CatalogResult};

use super::envelope::ApiResponse;

/// Payloads are copied to scratch storage in chunks of this size
pub const DOWNLOAD_CHUNK_SIZE: usize = 4096;

/// Client for one catalog instance
pub struct CkanClient {
    http: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl CkanClient {
    /// Build a client with its own connection pool
    pub fn new(endpoint: &Endpoint, settings: &HttpConfig) -> CatalogResult<Self> {
        let http = Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent())
            .build()
            .map_err(|e| CatalogError::Transport {
                action: "connect",
                message: e.to_string(),
            })?;
        Ok(Self::with_client(http, endpoint))
    }

    /// Build a client around an existing reqwest client
    pub fn with_client(http: Client, endpoint: &Endpoint) -> Self {
        Self {
            http,
            base_url: with_trailing_slash(endpoint.url.clone()),
            api_key: endpoint.api_key.clone().filter(|key| !key.is_empty()),
        }
    }

    /// API root every action is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn action_url(&self, action: &str) -> String {
        format!("{}action/{}", self.base_url, action)
    }

    fn request(&self, method: Method, action: &str) -> RequestBuilder {
        self.authorize(self.http.request(method, self.action_url(action)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(AUTHORIZATION, key),
            None => request,
        }
    }

    fn send(&self, action: &'static str, request: RequestBuilder) -> CatalogResult<ApiResponse> {
        debug!(catalog = %self.base_url, action, "calling action");
        let response = request.send().map_err(|e| transport(action, e))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| transport(action, e))?;
        ApiResponse::parse(action, status, &body)
    }

    fn get(&self, action: &'static str, query: &[(&str, &str)]) -> CatalogResult<ApiResponse> {
        self.send(action, self.request(Method::GET, action).query(query))
    }

    fn post<B: Serialize + ?Sized>(
        &self,
        action: &'static str,
        body: &B,
    ) -> CatalogResult<ApiResponse> {
        self.send(action, self.request(Method::POST, action).json(body))
    }

    fn lookup<T: DeserializeOwned>(
        &self,
        action: &'static str,
        id: &str,
    ) -> CatalogResult<Option<T>> {
        self.get(action, &[("id", id)])?.into_lookup(action)
    }

    fn upload(
        &self,
        action: &'static str,
        upload: &ResourceUpload,
        payload: &Path,
    ) -> CatalogResult<()> {
        // The form owns the open payload file; it is closed when the request
        // has been sent or has failed.
        let form = upload_form(action, upload, payload)?;
        self.send(action, self.request(Method::POST, action).multipart(form))?
            .into_ack(action)
    }

    /// Request for a payload download.
    ///
    /// The API key is only sent to the catalog's own origin, never to
    /// third-party hosts a resource may link to.
    fn download_request(&self, url: &str) -> RequestBuilder {
        let request = self.http.get(url);
        let same_origin = Url::parse(url)
            .map(|parsed| parsed.origin() == self.base_url.origin())
            .unwrap_or(false);
        if same_origin {
            self.authorize(request)
        } else {
            request
        }
    }
}

impl Catalog for CkanClient {
    fn display_name(&self) -> String {
        self.base_url.to_string()
    }

    fn list_organizations(&self) -> CatalogResult<Vec<String>> {
        self.get("organization_list", &[])?
            .into_result("organization_list")
    }

    fn get_organization(&self, id: &str) -> CatalogResult<Option<Organization>> {
        self.lookup("organization_show", id)
    }

    fn create_organization(&self, draft: &NewOrganization) -> CatalogResult<Organization> {
        self.post("organization_create", draft)?
            .into_result("organization_create")
    }

    fn update_organization(&self, record: &Organization) -> CatalogResult<Organization> {
        self.post("organization_update", record)?
            .into_result("organization_update")
    }

    fn list_packages(&self) -> CatalogResult<Vec<String>> {
        self.get("package_list", &[])?.into_result("package_list")
    }

    fn get_package(&self, id: &str) -> CatalogResult<Option<Package>> {
        self.lookup("package_show", id)
    }

    fn create_package(&self, draft: &NewPackage) -> CatalogResult<Package> {
        self.post("package_create", draft)?
            .into_result("package_create")
    }

    fn update_package(&self, record: &Package) -> CatalogResult<Package> {
        self.post("package_update", record)?
            .into_result("package_update")
    }

    fn delete_package(&self, name: &str) -> CatalogResult<()> {
        self.post("package_delete", &json!({ "id": name }))?
            .into_ack("package_delete")
    }

    fn find_resource_by_hash(&self, hash: &str) -> CatalogResult<ResourceSearch> {
        let query = format!("hash:{}", hash);
        self.get("resource_search", &[("query", query.as_str())])?
            .into_result("resource_search")
    }

    fn create_resource(&self, upload: &ResourceUpload, payload: &Path) -> CatalogResult<()> {
        self.upload("resource_create", upload, payload)
    }

    fn update_resource(&self, upload: &ResourceUpload, payload: &Path) -> CatalogResult<()> {
        self.upload("resource_update", upload, payload)
    }

    fn delete_resource(&self, id: &str) -> CatalogResult<()> {
        self.post("resource_delete", &json!({ "id": id }))?
            .into_ack("resource_delete")
    }

    fn download(&self, url: &str, dest: &Path) -> CatalogResult<()> {
        const ACTION: &str = "download";

        debug!(url, dest = %dest.display(), "downloading payload");
        let mut response = self
            .download_request(url)
            .send()
            .map_err(|e| transport(ACTION, e))?;
        if !response.status().is_success() {
            return Err(CatalogError::Status {
                action: ACTION,
                status: response.status().as_u16(),
            });
        }

        let io_error = |source| CatalogError::Io {
            action: ACTION,
            path: dest.to_path_buf(),
            source,
        };
        let mut writer = BufWriter::new(File::create(dest).map_err(io_error)?);
        let mut chunk = [0u8; DOWNLOAD_CHUNK_SIZE];
        loop {
            let read = response.read(&mut chunk).map_err(|e| transport(ACTION, e))?;
            if read == 0 {
                break;
            }
            writer.write_all(&chunk[..read]).map_err(io_error)?;
        }
        writer.flush().map_err(io_error)
    }
}

/// Multipart form: metadata fields plus the payload as the `upload` part
fn upload_form(
    action: &'static str,
    upload: &ResourceUpload,
    payload: &Path,
) -> CatalogResult<multipart::Form> {
    let form = upload
        .form_fields()
        .into_iter()
        .fold(multipart::Form::new(), |form, (name, value)| {
            form.text(name, value)
        });
    form.file("upload", payload)
        .map_err(|source| CatalogError::Io {
            action,
            path: payload.to_path_buf(),
            source,
        })
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn transport(action: &'static str, err: impl std::fmt::Display) -> CatalogError {
    CatalogError::Transport {
        action,
        message: err.to_string(),
    }
}
