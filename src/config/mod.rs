//! Configuration module for ckan-mirror
//!
//! Implements the configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (CKAN_MIRROR_*)
//! 3. Config file (`--config`, else `<config dir>/ckan-mirror/config.toml`)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{load_file_layer, user_config_path, with_env_overrides, ConfigWarning};
pub use types::{
    Config, ConfigOverrides, Endpoint, EndpointConfig, HttpConfig, MirrorSettings, ScratchConfig,
    ENV_DESTINATION_API_KEY, ENV_DESTINATION_URL, ENV_SOURCE_API_KEY, ENV_SOURCE_URL,
    ENV_TEMPORARY_PATH, ENV_TIMEOUT_SECS,
};
