//! Error types for ckan-mirror
//!
//! Uses `thiserror` for library errors; the binary wraps them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::CatalogError;
use crate::domain::value_objects::{EntityKind, Side};

/// Result type alias for mirror operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Failure of a mirror run
#[derive(Error, Debug)]
pub enum SyncError {
    /// A catalog call failed
    #[error("{side} catalog: {source}")]
    Catalog {
        side: Side,
        #[source]
        source: CatalogError,
    },

    /// The source listed an entity it then could not show
    #[error("{kind} '{name}' is listed by the source but not found there")]
    MissingSource { kind: EntityKind, name: String },

    /// A destination package came back without an id
    #[error("destination package '{name}' has no id")]
    MissingDestinationId { name: String },

    /// Staging a payload locally failed
    #[error("scratch file {}: {source}", path.display())]
    Scratch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    pub fn source_catalog(source: CatalogError) -> Self {
        SyncError::Catalog {
            side: Side::Source,
            source,
        }
    }

    pub fn destination_catalog(source: CatalogError) -> Self {
        SyncError::Catalog {
            side: Side::Destination,
            source,
        }
    }
}

/// Invalid or incomplete configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required setting not supplied by any layer
    #[error("missing {what}: pass {flag} or set {env}")]
    Missing {
        what: &'static str,
        flag: &'static str,
        env: &'static str,
    },

    /// Catalog URL is not an absolute http(s) URL
    #[error("invalid {what} '{value}': {reason}")]
    InvalidUrl {
        what: &'static str,
        value: String,
        reason: String,
    },

    /// Environment variable with an unusable value
    #[error("invalid value '{value}' for {var}: expected {expected}")]
    InvalidEnv {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Config file could not be read
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the expected layout
    #[error("invalid config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}
