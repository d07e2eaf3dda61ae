//! Organization entity
//!
//! Organizations are matched across catalogs by `name`. Attributes the
//! mirror does not manage are kept in `other` so that a full-replace update
//! hands the destination record back intact.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{text_field, CatalogRecord};

/// An organization as returned by `organization_show`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// Stable name (the cross-catalog identity)
    pub name: String,
    /// Catalog-local id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Group type (`organization` for organizations)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_status: Option<String>,
    /// Everything else the catalog returned
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Organization {
    /// Create a bare organization with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build the creation payload that copies this (source) organization
    pub fn draft(&self) -> NewOrganization {
        NewOrganization {
            name: self.name.clone(),
            title: self.title.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            state: self.state.clone(),
            kind: self.kind.clone(),
            approval_status: self.approval_status.clone(),
        }
    }

    /// Overwrite the mirrored attributes with the source's values.
    ///
    /// `id` and every attribute in `other` stay as the destination has them.
    pub fn merge_from_source(&mut self, source: &Organization) {
        self.display_name = source.display_name.clone();
        self.description = source.description.clone();
        self.state = source.state.clone();
        self.title = source.title.clone();
        self.approval_status = source.approval_status.clone();
    }
}

impl CatalogRecord for Organization {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::String(self.name.clone())),
            "id" => text_field(&self.id),
            "title" => text_field(&self.title),
            "display_name" => text_field(&self.display_name),
            "description" => text_field(&self.description),
            "state" => text_field(&self.state),
            "type" => text_field(&self.kind),
            "approval_status" => text_field(&self.approval_status),
            other => self.other.get(other).filter(|v| !v.is_null()).cloned(),
        }
    }
}

/// Payload for `organization_create`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrganization {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_status: Option<String>,
}

impl From<NewOrganization> for Organization {
    fn from(draft: NewOrganization) -> Self {
        Self {
            name: draft.name,
            id: None,
            title: draft.title,
            display_name: draft.display_name,
            description: draft.description,
            state: draft.state,
            kind: draft.kind,
            approval_status: draft.approval_status,
            other: Map::new(),
        }
    }
}
