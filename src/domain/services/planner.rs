//! Reconciliation planning
//!
//! Pure decision logic: given a source record and what the destination
//! currently holds, say what has to happen. No catalog calls are made here.

use std::collections::{BTreeMap, HashSet};

use crate::domain::entities::{CatalogRecord, Resource};

use super::FieldSet;

/// What to do with one destination record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAction {
    /// Destination has no counterpart
    Create,
    /// Counterpart exists but differs on compared fields
    Update,
    /// Counterpart is already in sync
    Unchanged,
}

impl RecordAction {
    /// Whether this action writes to the destination
    pub fn is_change(&self) -> bool {
        !matches!(self, RecordAction::Unchanged)
    }
}

/// Stateless planning service
pub struct Planner;

impl Planner {
    /// Decide how to converge `destination` towards `source` on `fields`
    pub fn plan<S, D>(fields: FieldSet, source: &S, destination: Option<&D>) -> RecordAction
    where
        S: CatalogRecord + ?Sized,
        D: CatalogRecord + ?Sized,
    {
        match destination {
            None => RecordAction::Create,
            Some(existing) if fields.same(source, existing) => RecordAction::Unchanged,
            Some(_) => RecordAction::Update,
        }
    }

    /// Destination resources that have no source counterpart.
    ///
    /// Destination resources are keyed by match key; when several share a key
    /// the last one in catalog order stands for the group. Resources without a
    /// hash share the empty key. The result is ordered by key.
    pub fn prune<'a>(source: &[Resource], destination: &'a [Resource]) -> Vec<&'a Resource> {
        let source_ids: HashSet<&str> = source.iter().map(|r| r.id.as_str()).collect();

        let by_key: BTreeMap<&str, &'a Resource> = destination
            .iter()
            .fold(BTreeMap::new(), |mut acc, resource| {
                acc.insert(resource.match_key(), resource);
                acc
            });

        by_key
            .into_iter()
            .filter(|(key, _)| !source_ids.contains(key))
            .map(|(_, resource)| resource)
            .collect()
    }
}
