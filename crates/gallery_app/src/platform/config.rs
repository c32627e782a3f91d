//! Configuration file loading with precedence handling.
//!
//! Priority (lowest to highest): built-in defaults, the TOML file, the
//! `PIXABAY_API_KEY` environment variable, command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, DEFAULT_LOG_FILE};
use gallery_engine::FetchSettings;
use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Invalid TOML in {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("No API key configured. Pass --api-key, set PIXABAY_API_KEY or add `api_key` to {0}")]
    MissingApiKey(String),
}

/// TOML configuration file structure.
///
/// Corresponds to `~/.config/pixabay-gallery/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: Option<u64>,
    pub log_file: Option<PathBuf>,
}

/// Configuration after applying precedence rules.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub fetch: FetchSettings,
    pub log_file: PathBuf,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pixabay-gallery").join("config.toml"))
}

/// Reads a config file. A missing file yields `Ok(None)`.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.as_ref();
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })
        }
    };

    toml::from_str(&content)
        .map(Some)
        .map_err(|err| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
}

/// Loads the config file named by `--config` (which must exist) or the
/// default one (which may be absent), then layers the CLI on top.
pub fn load(cli: &Cli) -> Result<ResolvedConfig, ConfigError> {
    let (path, file) = match &cli.config {
        Some(path) => match load_config_file(path)? {
            Some(file) => (path.clone(), Some(file)),
            None => {
                return Err(ConfigError::ReadError {
                    path: path.clone(),
                    reason: "file not found".to_string(),
                })
            }
        },
        None => match default_config_path() {
            Some(path) => {
                let file = load_config_file(&path)?;
                (path, file)
            }
            None => (PathBuf::from("config.toml"), None),
        },
    };

    if file.is_some() {
        engine_info!("Loaded config file {}", path.display());
    } else {
        engine_debug!("No config file at {}", path.display());
    }
    resolve(file.unwrap_or_default(), cli, &path)
}

/// Merges file values with CLI values; CLI wins. The `PIXABAY_API_KEY`
/// environment variable arrives through `cli.api_key`.
pub fn resolve(file: ConfigFile, cli: &Cli, source: &Path) -> Result<ResolvedConfig, ConfigError> {
    let defaults = FetchSettings::default();

    let api_key = cli
        .api_key
        .clone()
        .or(file.api_key)
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingApiKey(source.display().to_string()))?;

    let fetch = FetchSettings {
        endpoint: cli.endpoint.clone().or(file.endpoint).unwrap_or(defaults.endpoint),
        api_key,
        connect_timeout: file
            .connect_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.connect_timeout),
        request_timeout: file
            .request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout),
        redirect_limit: defaults.redirect_limit,
        max_bytes: file.max_response_bytes.unwrap_or(defaults.max_bytes),
    };

    let log_file = cli
        .log_file
        .clone()
        .or(file.log_file)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    Ok(ResolvedConfig { fetch, log_file })
}
