//! Configuration module.
//!
//! Every tuning constant of the layout engine is configuration, not
//! semantics: the relative ordering of buffers and the
//! stability-before-minimum-seeking rule are enforced by code, while the
//! numeric values here are free to vary per deployment.

pub mod loader;

pub use loader::{
    apply_cli_overrides, default_config_path, default_log_path, load_config_with_precedence,
    merge_config, ConfigError, ConfigFile, ResolvedConfig,
};

use serde::Deserialize;

/// Grid tuning parameters.
///
/// Defaults reproduce the production values the engine was tuned with.
/// All pixel fields are whole device pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Target column width used by the column-count resolver.
    pub target_column_width: usize,

    /// Gap between items and between columns.
    pub gap: usize,

    /// Lower clamp for the resolved column count. Must be >= 1.
    pub min_columns: usize,

    /// Upper clamp for the resolved column count.
    pub max_columns: usize,

    /// Tolerance for keeping an item in its previous column: as long as
    /// that column's running height is within this distance of the
    /// shortest column, the item does not jump.
    pub max_height_difference: usize,

    /// Distance from the bottom at which pagination fires.
    pub load_threshold: usize,

    /// Placeholder height for items with no layout data at all.
    pub min_item_height: usize,

    /// Viewport-relative buffer multiplier. Must be in (0, 1].
    pub buffer_multiplier: f64,

    /// Reference item height used to scale the mount budget with the
    /// viewport.
    pub reference_item_height: usize,

    /// Mounted items per reference-height of viewport.
    pub mount_density: usize,

    /// Floor for the mount budget.
    pub min_mounted: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            target_column_width: 280,
            gap: 24,
            min_columns: 1,
            max_columns: 5,
            max_height_difference: 1000,
            load_threshold: 800,
            min_item_height: 300,
            buffer_multiplier: 0.8,
            reference_item_height: 500,
            mount_density: 12,
            min_mounted: 20,
        }
    }
}

impl GridConfig {
    /// Validate cross-field constraints.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_columns == 0 {
            return Err(ConfigError::InvalidValue {
                field: "min_columns",
                reason: "must be >= 1".to_string(),
            });
        }
        if self.min_columns > self.max_columns {
            return Err(ConfigError::InvalidValue {
                field: "max_columns",
                reason: format!(
                    "must be >= min_columns ({} > {})",
                    self.min_columns, self.max_columns
                ),
            });
        }
        if self.target_column_width == 0 {
            return Err(ConfigError::InvalidValue {
                field: "target_column_width",
                reason: "must be > 0".to_string(),
            });
        }
        if !(self.buffer_multiplier > 0.0 && self.buffer_multiplier <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "buffer_multiplier",
                reason: format!("must be in (0, 1], got {}", self.buffer_multiplier),
            });
        }
        if self.reference_item_height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "reference_item_height",
                reason: "must be > 0".to_string(),
            });
        }
        if self.mount_density == 0 {
            return Err(ConfigError::InvalidValue {
                field: "mount_density",
                reason: "must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}
