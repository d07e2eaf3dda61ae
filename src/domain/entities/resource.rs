//! Resource entity - a file attached to a package
//!
//! On the source a resource is identified by its `id`. On the destination
//! the same resource is found through its `hash` field, which carries the
//! source id.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{text_field, CatalogRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Location of the payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Index within the owning package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    /// Cross-catalog match key (source resource id on mirrored resources)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Resource {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Match key of a destination resource; resources without one share the empty key
    pub fn match_key(&self) -> &str {
        self.hash.as_deref().unwrap_or("")
    }

    /// Display label for logs and events
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl CatalogRecord for Resource {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::String(self.id.clone())),
            "name" => text_field(&self.name),
            "description" => text_field(&self.description),
            "format" => text_field(&self.format),
            "url" => text_field(&self.url),
            "position" => self.position.map(Value::from),
            "hash" => text_field(&self.hash),
            "last_modified" => text_field(&self.last_modified),
            "package_id" => text_field(&self.package_id),
            other => self.other.get(other).filter(|v| !v.is_null()).cloned(),
        }
    }
}

/// Result of `resource_search`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSearch {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub results: Vec<Resource>,
}

impl ResourceSearch {
    /// The match that is acted upon; any further results are ignored
    pub fn first_match(&self) -> Option<&Resource> {
        self.results.first()
    }
}

/// Metadata sent alongside the payload for `resource_create` / `resource_update`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceUpload {
    /// Destination id, set only for updates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub package_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    /// Always empty: the payload is pushed as file content
    pub url: String,
}

impl ResourceUpload {
    /// Describe the transfer of a source resource into a destination package
    pub fn for_transfer(source: &Resource, package_id: impl Into<String>) -> Self {
        Self {
            id: None,
            package_id: package_id.into(),
            name: source.name.clone(),
            format: source.format.clone(),
            hash: source.id.clone(),
            position: source.position,
            description: source.description.clone(),
            last_modified: source.last_modified.clone(),
            url: String::new(),
        }
    }

    /// Target an existing destination resource
    pub fn replacing(mut self, destination_id: impl Into<String>) -> Self {
        self.id = Some(destination_id.into());
        self
    }

    /// Form fields in submission order; unset values are omitted
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::with_capacity(9);
        if let Some(id) = &self.id {
            fields.push(("id", id.clone()));
        }
        fields.push(("package_id", self.package_id.clone()));
        if let Some(name) = &self.name {
            fields.push(("name", name.clone()));
        }
        if let Some(format) = &self.format {
            fields.push(("format", format.clone()));
        }
        fields.push(("hash", self.hash.clone()));
        if let Some(position) = self.position {
            fields.push(("position", position.to_string()));
        }
        if let Some(description) = &self.description {
            fields.push(("description", description.clone()));
        }
        if let Some(last_modified) = &self.last_modified {
            fields.push(("last_modified", last_modified.clone()));
        }
        fields.push(("url", self.url.clone()));
        fields
    }

    /// The resource record this upload produces on the destination
    pub fn to_resource(&self, id: impl Into<String>) -> Resource {
        Resource {
            id: id.into(),
            name: self.name.clone(),
            description: self.description.clone(),
            format: self.format.clone(),
            url: Some(self.url.clone()),
            position: self.position,
            hash: Some(self.hash.clone()),
            last_modified: self.last_modified.clone(),
            package_id: Some(self.package_id.clone()),
            other: Map::new(),
        }
    }
}
