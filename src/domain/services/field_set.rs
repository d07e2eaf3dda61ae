//! Projected record comparison
//!
//! Two records are considered in sync when they agree on a fixed set of
//! named fields. Everything outside the set is ignored.

use crate::domain::entities::CatalogRecord;

/// A named subset of record fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSet {
    fields: &'static [&'static str],
}

impl FieldSet {
    /// Fields that decide whether an organization needs an update
    pub const ORGANIZATION: FieldSet =
        FieldSet::new(&["title", "display_name", "description", "state"]);

    /// Fields that decide whether a package needs an update
    pub const PACKAGE: FieldSet = FieldSet::new(&["title", "notes"]);

    /// Fields that decide whether a matched resource needs an update
    pub const RESOURCE: FieldSet = FieldSet::new(&["name", "description", "position"]);

    pub const fn new(fields: &'static [&'static str]) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    /// True when both records hold equal values for every field in the set
    pub fn same<A, B>(&self, a: &A, b: &B) -> bool
    where
        A: CatalogRecord + ?Sized,
        B: CatalogRecord + ?Sized,
    {
        self.fields.iter().all(|name| a.field(name) == b.field(name))
    }

    /// Names of the fields on which the records disagree, in set order
    pub fn differing<A, B>(&self, a: &A, b: &B) -> Vec<&'static str>
    where
        A: CatalogRecord + ?Sized,
        B: CatalogRecord + ?Sized,
    {
        self.fields
            .iter()
            .copied()
            .filter(|name| a.field(name) != b.field(name))
            .collect()
    }
}
