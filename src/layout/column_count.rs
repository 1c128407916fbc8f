//! Column-count resolution from the container width.

use tracing::debug;

use crate::config::GridConfig;

/// Outcome of a column-count resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved column count, clamped to `[min_columns, max_columns]`.
    pub count: usize,
    /// True when the count differs from the previous resolution.
    /// Column geometry is not comparable across counts, so a change
    /// requires discarding all column assignments.
    pub changed: bool,
}

/// Width-to-column-count resolver with change detection.
///
/// Re-resolving an unchanged width (or any width yielding the same
/// count) reports `changed = false`, so unrelated re-evaluations never
/// reset balancer memory.
#[derive(Debug, Clone, Default)]
pub struct ColumnCountResolver {
    last: Option<usize>,
}

impl ColumnCountResolver {
    /// Create a resolver with no previous resolution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the column count for a container width.
    ///
    /// Usable width is the container minus two outer gaps; the count is
    /// how many `target_column_width + gap` strides fit, clamped. A zero
    /// or too-small width degrades to `min_columns` rather than failing.
    pub fn resolve(&mut self, container_width: usize, config: &GridConfig) -> Resolution {
        let usable = container_width.saturating_sub(config.gap * 2);
        let fit = (usable + config.gap) / (config.target_column_width + config.gap);
        let count = fit.clamp(config.min_columns, config.max_columns);

        let changed = self.last != Some(count);
        if changed {
            debug!(container_width, count, previous = ?self.last, "column count changed");
        }
        self.last = Some(count);

        Resolution { count, changed }
    }

    /// The most recent resolution, if any.
    pub fn current(&self) -> Option<usize> {
        self.last
    }
}

/// Actual column width once the count is fixed: the container split
/// evenly after inter-column gaps.
pub fn column_width_for(container_width: usize, column_count: usize, gap: usize) -> usize {
    if column_count == 0 {
        return 0;
    }
    let gaps = gap * (column_count - 1);
    container_width.saturating_sub(gaps) / column_count
}
