//! Layered configuration.
//!
//! Defaults, then `$HOME/.tasklist/config.toml` (or `--config`), then
//! environment overrides. Command-line flags are applied last by `main`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

pub const DEFAULT_BASE_URL: &str = "https://6910cb5a7686c0e9c20bb7c5.mockapi.io";
pub const DEFAULT_COLLECTION: &str = "Tasks";
pub const DEFAULT_LOG_FILTER: &str = "warn";

pub const ENV_API_URL: &str = "TASKLIST_API_URL";
pub const ENV_LOG: &str = "TASKLIST_LOG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

/// Where the task collection lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub collection: String,
    /// Whole-request timeout. Unset means requests may wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    /// Full URL of the collection endpoint.
    pub fn collection_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let collection = self.collection.trim_matches('/');
        if collection.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{collection}")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `warn` or `tasklist=debug`.
    pub filter: String,
    /// Log file used by the terminal UI.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            file: None,
        }
    }
}

/// Application directory, `$HOME/.tasklist`.
pub fn app_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".tasklist")
}

pub fn default_config_path() -> PathBuf {
    app_dir().join("config.toml")
}

pub fn default_log_path() -> PathBuf {
    app_dir().join("tasklist.log")
}

/// Load configuration. An explicit path must exist; the default path may not.
///
/// Also returns warnings about ignored environment overrides. Logging is not
/// set up yet at this point, so the caller emits them once it is.
pub fn load(explicit: Option<&Path>) -> Result<(Config, Vec<String>)> {
    let mut config = match explicit {
        Some(path) => read_file(path)?,
        None => {
            let path = default_config_path();
            if path.exists() {
                read_file(&path)?
            } else {
                Config::default()
            }
        }
    };
    let warnings = apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok((config, warnings))
}

fn read_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("failed to read {}: {e}", path.display())))?;
    toml::from_str(&contents).map_err(|e| AppError::Config(format!("failed to parse {}: {e}", path.display())))
}

/// Apply environment overrides using `lookup` to read variables.
/// Returns one warning per variable that was set but ignored.
pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
    let mut warnings = Vec::new();
    if let Some(raw) = lookup(ENV_API_URL) {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            config.api.base_url = raw.to_string();
        } else {
            warnings.push(format!("invalid {ENV_API_URL}, ignoring: {raw}"));
        }
    }
    if let Some(raw) = lookup(ENV_LOG) {
        let raw = raw.trim();
        if raw.is_empty() {
            warnings.push(format!("empty {ENV_LOG}, ignoring"));
        } else {
            config.logging.filter = raw.to_string();
        }
    }
    warnings
}
