//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON) and exit status
//!
//! ## Structure
//!
//! - `cli` - Command-line flags
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Summary rendering
//!
//! ## Usage
//!
//! ```ignore
//! use ckan_mirror::presentation::factory;
//!
//! let (settings, _warnings) = factory::load_settings(&cli)?;
//! let use_case = factory::create_mirror_use_case(&settings)?;
//! let changes = use_case.sync_all()?;
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::Cli;
pub use factory::{create_mirror_use_case, load_settings};
pub use output::{exit_code, OutputFormat, TextRenderer};
