//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::types::{
    Config, ENV_DESTINATION_API_KEY, ENV_DESTINATION_URL, ENV_SOURCE_API_KEY, ENV_SOURCE_URL,
    ENV_TEMPORARY_PATH, ENV_TIMEOUT_SECS,
};

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load the config file layer.
///
/// An explicit path must exist. Without one, the user config file is read
/// if present; otherwise defaults apply.
pub fn load_file_layer(
    explicit: Option<&Path>,
) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    if let Some(path) = explicit {
        return load_with_warnings(path);
    }

    match user_config_path() {
        Some(path) if path.is_file() => load_with_warnings(&path),
        _ => Ok((Config::default(), Vec::new())),
    }
}

/// `<config dir>/ckan-mirror/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ckan-mirror").join("config.toml"))
}

/// Apply environment variable overrides (CKAN_MIRROR_* prefix).
///
/// `lookup` returns a variable's value; empty values count as unset.
pub fn with_env_overrides<F>(mut config: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

    if let Some(url) = var(ENV_SOURCE_URL) {
        config.source.url = Some(url);
    }
    if let Some(key) = var(ENV_SOURCE_API_KEY) {
        config.source.api_key = Some(key);
    }
    if let Some(url) = var(ENV_DESTINATION_URL) {
        config.destination.url = Some(url);
    }
    if let Some(key) = var(ENV_DESTINATION_API_KEY) {
        config.destination.api_key = Some(key);
    }
    if let Some(path) = var(ENV_TEMPORARY_PATH) {
        config.scratch.path = PathBuf::from(path);
    }
    if let Some(secs) = var(ENV_TIMEOUT_SECS) {
        let parsed = secs.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
            var: ENV_TIMEOUT_SECS,
            value: secs.clone(),
            expected: "a whole number of seconds",
        })?;
        config.http.timeout_secs = Some(parsed);
    }

    Ok(config)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

pub(crate) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "source",
        "destination",
        "scratch",
        "http",
        "url",
        "api_key",
        "path",
        "timeout_secs",
        "user_agent",
    ];

    let mut best: Option<(&str, usize)> = None;
    for &candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
