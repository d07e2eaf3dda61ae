//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::loader::{self, ConfigWarning};

pub const ENV_SOURCE_URL: &str = "CKAN_MIRROR_SOURCE_URL";
pub const ENV_SOURCE_API_KEY: &str = "CKAN_MIRROR_SOURCE_API_KEY";
pub const ENV_DESTINATION_URL: &str = "CKAN_MIRROR_DESTINATION_URL";
pub const ENV_DESTINATION_API_KEY: &str = "CKAN_MIRROR_DESTINATION_API_KEY";
pub const ENV_TEMPORARY_PATH: &str = "CKAN_MIRROR_TEMPORARY_PATH";
pub const ENV_TIMEOUT_SECS: &str = "CKAN_MIRROR_TIMEOUT_SECS";

/// One catalog's connection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// API root, e.g. `https://data.example.org/api/3/`
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,
}

/// Where payloads are staged between download and upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScratchConfig {
    #[serde(default = "default_scratch_path")]
    pub path: PathBuf,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            path: default_scratch_path(),
        }
    }
}

fn default_scratch_path() -> PathBuf {
    PathBuf::from(".")
}

/// HTTP client settings shared by both catalogs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout; unset means no limit
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub user_agent: Option<String>,
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("ckan-mirror/{}", env!("CARGO_PKG_VERSION")))
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: EndpointConfig,

    #[serde(default)]
    pub destination: EndpointConfig,

    #[serde(default)]
    pub scratch: ScratchConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

/// Settings given on the command line; `None` leaves the lower layers alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub source_url: Option<String>,
    pub source_api_key: Option<String>,
    pub destination_url: Option<String>,
    pub destination_api_key: Option<String>,
    pub temporary_path: Option<PathBuf>,
}

/// A validated catalog endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: Url,
    pub api_key: Option<String>,
}

/// Fully resolved settings for one mirror run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorSettings {
    pub source: Endpoint,
    pub destination: Endpoint,
    pub scratch: PathBuf,
    pub http: HttpConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (CKAN_MIRROR_* prefix)
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        loader::with_env_overrides(self, |var| std::env::var(var).ok())
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(url) = overrides.source_url {
            self.source.url = Some(url);
        }
        if let Some(key) = overrides.source_api_key {
            self.source.api_key = Some(key);
        }
        if let Some(url) = overrides.destination_url {
            self.destination.url = Some(url);
        }
        if let Some(key) = overrides.destination_api_key {
            self.destination.api_key = Some(key);
        }
        if let Some(path) = overrides.temporary_path {
            self.scratch.path = path;
        }
        self
    }

    /// Validate into the settings a run needs
    pub fn resolve(&self) -> Result<MirrorSettings, ConfigError> {
        Ok(MirrorSettings {
            source: resolve_endpoint(&self.source, "source URL", "--source", ENV_SOURCE_URL)?,
            destination: resolve_endpoint(
                &self.destination,
                "destination URL",
                "--destination",
                ENV_DESTINATION_URL,
            )?,
            scratch: self.scratch.path.clone(),
            http: self.http.clone(),
        })
    }
}

fn resolve_endpoint(
    config: &EndpointConfig,
    what: &'static str,
    flag: &'static str,
    env: &'static str,
) -> Result<Endpoint, ConfigError> {
    let raw = config
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or(ConfigError::Missing { what, flag, env })?;

    let invalid = |reason: String| ConfigError::InvalidUrl {
        what,
        value: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("expected an http or https URL".to_string()));
    }

    Ok(Endpoint {
        url,
        api_key: config.api_key.clone(),
    })
}
