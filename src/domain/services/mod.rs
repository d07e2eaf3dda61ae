//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

mod field_set;
mod planner;

pub use field_set::FieldSet;
pub use planner::{Planner, RecordAction};
