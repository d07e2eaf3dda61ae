//! Domain Entities
//!
//! Records owned by a remote catalog. They are fetched fresh for every
//! comparison and never cached.
//! - `Organization` - named grouping that owns packages
//! - `Package` - dataset with tags and an ordered list of resources
//! - `Resource` - a single file attached to a package

mod organization;
mod package;
mod resource;

pub use organization::{NewOrganization, Organization};
pub use package::{Extra, NewPackage, Package, Tag, PROVENANCE_KEY};
pub use resource::{Resource, ResourceSearch, ResourceUpload};

use serde_json::Value;

/// Named-field access used by projected comparisons.
///
/// `None` means the record has no value for the field: absent and `null`
/// read the same.
pub trait CatalogRecord {
    fn field(&self, name: &str) -> Option<Value>;
}

fn text_field(value: &Option<String>) -> Option<Value> {
    value.clone().map(Value::String)
}
