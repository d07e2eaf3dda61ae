//! Domain Layer
//!
//! The core of the mirror - reconciliation rules without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Catalog records (Organization, Package, Resource)
//! - `value_objects/` - Immutable value types (ChangeSet, Side)
//! - `services/` - Domain services (FieldSet, Planner)
//! - `ports/` - Interface definitions for infrastructure (Catalog, SyncEventSink)
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
