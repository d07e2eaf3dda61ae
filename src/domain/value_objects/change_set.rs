//! ChangeSet value object - tally of writes applied to the destination
//!
//! Each sync operation returns the changes it committed; callers add them
//! up. `total()` is the run's change count.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::Serialize;

/// Kind of catalog entity a change touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Organization,
    Package,
    Resource,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Organization => write!(f, "organization"),
            EntityKind::Package => write!(f, "package"),
            EntityKind::Resource => write!(f, "resource"),
        }
    }
}

/// What a change did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// Per-entity counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.created + self.updated + self.deleted
    }

    fn bump(&mut self, change: ChangeKind) {
        match change {
            ChangeKind::Created => self.created += 1,
            ChangeKind::Updated => self.updated += 1,
            ChangeKind::Deleted => self.deleted += 1,
        }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Self) {
        self.created += rhs.created;
        self.updated += rhs.updated;
        self.deleted += rhs.deleted;
    }
}

/// Changes committed to the destination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    pub organizations: Tally,
    pub packages: Tally,
    pub resources: Tally,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A change set holding a single change
    pub fn single(entity: EntityKind, change: ChangeKind) -> Self {
        let mut set = Self::new();
        set.record(entity, change);
        set
    }

    pub fn record(&mut self, entity: EntityKind, change: ChangeKind) {
        match entity {
            EntityKind::Organization => self.organizations.bump(change),
            EntityKind::Package => self.packages.bump(change),
            EntityKind::Resource => self.resources.bump(change),
        }
    }

    /// Total number of writes
    pub fn total(&self) -> usize {
        self.organizations.total() + self.packages.total() + self.resources.total()
    }

    /// True when nothing was written
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl AddAssign for ChangeSet {
    fn add_assign(&mut self, rhs: Self) {
        self.organizations += rhs.organizations;
        self.packages += rhs.packages;
        self.resources += rhs.resources;
    }
}

impl Add for ChangeSet {
    type Output = ChangeSet;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl Sum for ChangeSet {
    fn sum<I: Iterator<Item = ChangeSet>>(iter: I) -> Self {
        iter.fold(ChangeSet::new(), Add::add)
    }
}
