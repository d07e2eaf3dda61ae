//! Sync Module
//!
//! One-way mirroring of a source catalog onto a destination catalog.
//!
//! ## Usage
//!
//! ```ignore
//! use ckan_mirror::application::sync::MirrorUseCase;
//!
//! let use_case = MirrorUseCase::new(source, destination, ScratchDir::new("."));
//! let changes = use_case.sync_all()?;
//! ```

mod use_case;

pub use use_case::MirrorUseCase;
