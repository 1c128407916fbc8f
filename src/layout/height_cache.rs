//! Measured-height store with estimate fallback.

use std::collections::HashMap;

use tracing::debug;

use crate::model::{Photo, PhotoId};

/// Per-photo height store.
///
/// Heights come from three places, in order of preference:
/// 1. a measured height reported after the real image decoded,
/// 2. an estimate from the intrinsic aspect ratio scaled to the current
///    column width,
/// 3. a placeholder floor when no column width is known yet (first
///    paint).
///
/// Recording a measurement does not retroactively move anything:
/// consumers observe [`HeightCache::revision`] and re-run the layout
/// pass to see the effect.
#[derive(Debug, Clone)]
pub struct HeightCache {
    measured: HashMap<PhotoId, usize>,
    min_item_height: usize,
    revision: u64,
}

impl HeightCache {
    /// Create an empty cache with the given placeholder floor.
    pub fn new(min_item_height: usize) -> Self {
        Self {
            measured: HashMap::new(),
            min_item_height,
            revision: 0,
        }
    }

    /// Height for a photo at the given column width, in pixels.
    ///
    /// Always >= 1 so every item occupies a non-degenerate interval.
    pub fn height_for(&self, photo: &Photo, column_width: usize) -> usize {
        if let Some(&measured) = self.measured.get(&photo.id()) {
            return measured;
        }
        if column_width == 0 {
            return self.min_item_height;
        }
        let estimate =
            (photo.height() as f64 * column_width as f64 / photo.width() as f64).round() as usize;
        estimate.max(1)
    }

    /// Record a measured height. Last write wins; re-recording the same
    /// value is a no-op and does not bump the revision.
    pub fn record(&mut self, id: PhotoId, height: usize) {
        let height = height.max(1);
        if self.measured.insert(id, height) != Some(height) {
            self.revision += 1;
            debug!(%id, height, revision = self.revision, "measured height recorded");
        }
    }

    /// True if a measured height exists for the id.
    pub fn is_measured(&self, id: PhotoId) -> bool {
        self.measured.contains_key(&id)
    }

    /// Monotonically increasing counter, bumped on every effective
    /// `record`. Callers compare it to decide whether a relayout is
    /// warranted.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of measured entries.
    pub fn measured_count(&self) -> usize {
        self.measured.len()
    }

    /// Drop all measurements (full engine reset only).
    pub fn clear(&mut self) {
        if !self.measured.is_empty() {
            self.measured.clear();
            self.revision += 1;
        }
    }
}
