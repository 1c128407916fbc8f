//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use super::GridConfig;

/// Errors that can occur during config loading or validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to read config file (permissions, encoding).
    #[error("failed to read config file at {path:?}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("invalid TOML in {path:?}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A configuration value is out of its valid range.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Field that failed validation.
        field: &'static str,
        /// Constraint that was violated.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All sections are optional; unspecified grid keys fall back per-field
/// to the tuned defaults. Corresponds to
/// `~/.config/photogrid/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Grid tuning overrides.
    #[serde(default)]
    pub grid: Option<GridConfig>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Grid tuning parameters.
    pub grid: GridConfig,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// `~/.local/state/photogrid/photogrid.log` on Unix-like systems, the
/// platform equivalent elsewhere, current directory as a last resort.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("photogrid").join("photogrid.log")
    } else {
        PathBuf::from("photogrid.log")
    }
}

/// Resolve default config file path.
///
/// Returns `None` if the platform config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("photogrid").join("config.toml"))
}

/// Load a configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (not an error, defaults
/// apply).
///
/// # Errors
/// Returns an error only if the file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PHOTOGRID_CONFIG` environment variable
/// 3. Default path `~/.config/photogrid/config.toml`
///
/// Missing config files are NOT errors; defaults are used.
///
/// # Errors
/// Returns an error only if a config file exists but cannot be read or
/// parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("PHOTOGRID_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge an optional config file over the defaults.
pub fn merge_config(file: Option<ConfigFile>) -> ResolvedConfig {
    let mut resolved = ResolvedConfig::default();
    if let Some(file) = file {
        if let Some(grid) = file.grid {
            resolved.grid = grid;
        }
        if let Some(path) = file.log_file_path {
            resolved.log_file_path = path;
        }
    }
    resolved
}

/// Apply CLI argument overrides on top of a resolved config.
///
/// `None` leaves the corresponding value untouched.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    column_width: Option<usize>,
    max_columns: Option<usize>,
    log_file: Option<PathBuf>,
) -> ResolvedConfig {
    if let Some(width) = column_width {
        config.grid.target_column_width = width;
    }
    if let Some(max) = max_columns {
        config.grid.max_columns = max;
    }
    if let Some(path) = log_file {
        config.log_file_path = path;
    }
    config
}
