//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod change_set;
mod side;

pub use change_set::{ChangeKind, ChangeSet, EntityKind, Tally};
pub use side::Side;
