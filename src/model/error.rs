//! Error taxonomy for photogrid.
//!
//! The layout engine itself is total: missing heights fall back to
//! estimates, a zero container width yields the minimum column count, and
//! a stale column assignment is treated as no assignment. Errors only
//! arise at the edges (configuration, logging setup, and the manifest
//! source used by the demo binary) and compose via `?` and `From`
//! conversions.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::photo::InvalidDimensions;

/// Top-level application error for the demo binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file could not be read, parsed, or validated.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber setup failed.
    #[error("logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    /// Photo manifest could not be loaded.
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

/// Failure to load the JSON photo manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest file could not be read.
    #[error("failed to read manifest at {path:?}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Manifest contains invalid JSON.
    #[error("invalid JSON in manifest: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record carries zero-sized intrinsic dimensions.
    #[error(transparent)]
    InvalidPhoto(#[from] InvalidDimensions),
}
