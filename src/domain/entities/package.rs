//! Package (dataset) entity

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{text_field, CatalogRecord, Organization, Resource};

/// Extras key recording which source package a mirrored package came from
pub const PROVENANCE_KEY: &str = "source";

/// A dataset as returned by `package_show`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_org: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Owning organization, embedded by `package_show`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub extras: Vec<Extra>,
    /// Resources in catalog order
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Package {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Name of the owning organization
    pub fn organization_name(&self) -> Option<&str> {
        self.organization.as_ref().map(|org| org.name.as_str())
    }

    /// Build the creation payload that copies this (source) package.
    ///
    /// Resources are not part of the payload; they are transferred one by
    /// one after the package exists.
    pub fn draft(&self) -> NewPackage {
        NewPackage {
            name: self.name.clone(),
            title: self.title.clone(),
            notes: self.notes.clone(),
            owner_org: self.organization_name().map(str::to_string),
            tags: self.tags.iter().map(Tag::stripped).collect(),
            extras: vec![Extra::new(
                PROVENANCE_KEY,
                self.id.clone().unwrap_or_default(),
            )],
        }
    }

    /// Overwrite title, notes and ownership with the source's values
    pub fn merge_from_source(&mut self, source: &Package) {
        self.title = source.title.clone();
        self.notes = source.notes.clone();
        self.owner_org = source.organization_name().map(str::to_string);
    }

    /// Value of the provenance extra, if this package was created by a mirror run
    pub fn provenance(&self) -> Option<&str> {
        self.extras
            .iter()
            .find(|extra| extra.key == PROVENANCE_KEY)
            .map(|extra| extra.value.as_str())
    }
}

impl CatalogRecord for Package {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::String(self.name.clone())),
            "id" => text_field(&self.id),
            "title" => text_field(&self.title),
            "notes" => text_field(&self.notes),
            "owner_org" => text_field(&self.owner_org),
            "state" => text_field(&self.state),
            other => self.other.get(other).filter(|v| !v.is_null()).cloned(),
        }
    }
}

/// A free-form tag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Tag {
    /// Copy with only `name`, `display_name` and `state`
    fn stripped(&self) -> Tag {
        Tag {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            state: self.state.clone(),
            other: Map::new(),
        }
    }
}

/// A key/value pair from the package `extras` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extra {
    pub key: String,
    pub value: String,
}

impl Extra {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Payload for `package_create`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPackage {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_org: Option<String>,
    pub tags: Vec<Tag>,
    pub extras: Vec<Extra>,
}

impl From<NewPackage> for Package {
    fn from(draft: NewPackage) -> Self {
        Self {
            name: draft.name,
            title: draft.title,
            notes: draft.notes,
            owner_org: draft.owner_org,
            tags: draft.tags,
            extras: draft.extras,
            ..Self::default()
        }
    }
}
