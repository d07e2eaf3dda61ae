//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::MirrorUseCase;
use crate::config::{load_file_layer, ConfigWarning, MirrorSettings};
use crate::error::{ConfigError, SyncError, SyncResult};
use crate::infrastructure::{CkanClient, ScratchDir};

use super::cli::Cli;

/// Type alias for the concrete MirrorUseCase talking to two live catalogs
pub type ConcreteMirrorUseCase = MirrorUseCase<CkanClient, CkanClient>;

/// Resolve settings from every configuration layer
///
/// Returns the settings together with non-fatal warnings from the config
/// file (unknown keys).
pub fn load_settings(cli: &Cli) -> Result<(MirrorSettings, Vec<ConfigWarning>), ConfigError> {
    let (config, warnings) = load_file_layer(cli.config.as_deref())?;
    let settings = config
        .with_env_overrides()?
        .with_overrides(cli.overrides())
        .resolve()?;
    Ok((settings, warnings))
}

/// Create a mirror use case with both catalog clients wired up
///
/// Both clients share the same HTTP settings and scratch directory.
pub fn create_mirror_use_case(settings: &MirrorSettings) -> SyncResult<ConcreteMirrorUseCase> {
    let source =
        CkanClient::new(&settings.source, &settings.http).map_err(SyncError::source_catalog)?;
    let destination = CkanClient::new(&settings.destination, &settings.http)
        .map_err(SyncError::destination_catalog)?;

    Ok(MirrorUseCase::new(
        source,
        destination,
        ScratchDir::new(&settings.scratch),
    ))
}
