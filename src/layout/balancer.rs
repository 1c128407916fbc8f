//! Column assignment and the full layout pass.
//!
//! The balancer persists one thing between passes: the id-keyed column
//! assignment map. Running column heights are created fresh for every
//! pass and die with it, so two passes over the same inputs are
//! byte-for-byte identical.

use std::collections::HashMap;

use tracing::trace;

use super::height_cache::HeightCache;
use super::offset_index::OffsetIndex;
use crate::config::GridConfig;
use crate::model::{Photo, PhotoId};

/// One laid-out item. Ephemeral: recomputed each pass, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutItem {
    /// Photo id.
    pub id: PhotoId,
    /// Column the item was assigned to.
    pub column: usize,
    /// Vertical offset within the column, in pixels.
    pub offset: usize,
    /// Item height used for this pass (measured or estimated).
    pub height: usize,
    /// Position in the original item sequence.
    pub sequence: usize,
}

/// One column of a computed layout.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    /// Items in placement order; offsets are strictly increasing.
    pub items: Vec<LayoutItem>,
    /// Prefix-sum index over the items' gap-inclusive slots, for
    /// offset-to-item lookups.
    pub offsets: OffsetIndex,
    /// Running height after the last item (gap included).
    pub height: usize,
}

/// Output of a full layout pass.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Per-column item lists, `column_count` entries.
    pub columns: Vec<ColumnLayout>,
    /// Scroll-area height: tallest column plus one gap, floored by the
    /// viewport and by the placeholder minimum.
    pub total_height: usize,
    /// Column width the pass was computed at.
    pub column_width: usize,
}

impl Layout {
    /// Number of laid-out items across all columns.
    pub fn item_count(&self) -> usize {
        self.columns.iter().map(|c| c.items.len()).sum()
    }

    /// Iterate over all items in column order.
    pub fn items(&self) -> impl Iterator<Item = &LayoutItem> {
        self.columns.iter().flat_map(|c| c.items.iter())
    }
}

/// Assigns items to columns, stable under small height fluctuations.
///
/// Assignment memory is keyed by [`PhotoId`] and survives between
/// passes; it is discarded wholesale when the column count changes
/// (see [`ColumnCountResolver`](super::column_count::ColumnCountResolver)).
#[derive(Debug, Clone, Default)]
pub struct ColumnBalancer {
    assignments: HashMap<PhotoId, usize>,
}

impl ColumnBalancer {
    /// Create a balancer with no assignment memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all column assignments.
    pub fn reset(&mut self) {
        trace!(
            dropped = self.assignments.len(),
            "column assignments discarded"
        );
        self.assignments.clear();
    }

    /// Previous column for an id, if any. Exposed for tests and
    /// diagnostics.
    pub fn assignment_of(&self, id: PhotoId) -> Option<usize> {
        self.assignments.get(&id).copied()
    }

    /// Run one full layout pass over the photo sequence.
    ///
    /// Heights come from the cache (measured or estimated at
    /// `column_width`). The pass is deterministic: same sequence, same
    /// cache snapshot, same column count -> identical output.
    pub fn layout_pass(
        &mut self,
        photos: &[Photo],
        cache: &HeightCache,
        column_count: usize,
        column_width: usize,
        viewport_height: usize,
        config: &GridConfig,
    ) -> Layout {
        let column_count = column_count.max(1);
        let per_column_hint = photos.len() / column_count + 1;

        // Running heights live for exactly one pass.
        let mut running = vec![0usize; column_count];
        let mut columns: Vec<ColumnLayout> = (0..column_count)
            .map(|_| ColumnLayout {
                items: Vec::with_capacity(per_column_hint),
                offsets: OffsetIndex::new(per_column_hint),
                height: 0,
            })
            .collect();

        for (sequence, photo) in photos.iter().enumerate() {
            let height = cache.height_for(photo, column_width);
            let column = self.assign(photo.id(), &running, config.max_height_difference);

            columns[column].items.push(LayoutItem {
                id: photo.id(),
                column,
                offset: running[column],
                height,
                sequence,
            });
            columns[column].offsets.push(height + config.gap);
            running[column] += height + config.gap;
        }

        for (column, &height) in columns.iter_mut().zip(running.iter()) {
            column.height = height;
        }

        let tallest = running.iter().copied().max().unwrap_or(0);
        let placeholder_floor = if photos.is_empty() {
            0
        } else {
            // Guards against a too-short scroll area while early items
            // still use placeholder heights.
            photos.len().div_ceil(column_count) * (config.min_item_height + config.gap)
        };
        let total_height = (tallest + config.gap)
            .max(viewport_height)
            .max(placeholder_floor);

        Layout {
            columns,
            total_height,
            column_width,
        }
    }

    /// Pick a column for one item given the current running heights.
    ///
    /// Stability first: an item keeps its previous column while that
    /// column stays within `tolerance` of the global minimum. A previous
    /// index at or past `running.len()` (column count shrank) counts as
    /// no assignment.
    fn assign(&mut self, id: PhotoId, running: &[usize], tolerance: usize) -> usize {
        let shortest = shortest_column(running);

        if let Some(&previous) = self.assignments.get(&id) {
            if previous < running.len() && running[previous] - running[shortest] <= tolerance {
                return previous;
            }
        }

        self.assignments.insert(id, shortest);
        shortest
    }
}

/// Index of the column with the minimum running height; ties go to the
/// lowest index.
fn shortest_column(running: &[usize]) -> usize {
    running
        .iter()
        .enumerate()
        .min_by_key(|&(_, height)| *height)
        .map(|(index, _)| index)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(id: u64, width: usize, height: usize) -> Photo {
        Photo::new(PhotoId::new(id), width, height).unwrap()
    }

    /// Square photos estimate to exactly the column width.
    fn squares(count: u64) -> Vec<Photo> {
        (0..count).map(|i| photo(i, 100, 100)).collect()
    }

    fn pass(
        balancer: &mut ColumnBalancer,
        photos: &[Photo],
        cache: &HeightCache,
        columns: usize,
    ) -> Layout {
        balancer.layout_pass(photos, cache, columns, 280, 800, &GridConfig::default())
    }

    #[test]
    fn empty_sequence_yields_empty_columns_at_viewport_height() {
        let mut balancer = ColumnBalancer::new();
        let cache = HeightCache::new(300);
        let layout = pass(&mut balancer, &[], &cache, 3);

        assert_eq!(layout.columns.len(), 3);
        assert!(layout.columns.iter().all(|c| c.items.is_empty()));
        assert_eq!(layout.total_height, 800);
    }

    #[test]
    fn single_column_appends_everything_to_column_zero() {
        let mut balancer = ColumnBalancer::new();
        let cache = HeightCache::new(300);
        let photos = squares(6);
        let layout = pass(&mut balancer, &photos, &cache, 1);

        assert_eq!(layout.columns[0].items.len(), 6);
        for item in &layout.columns[0].items {
            assert_eq!(item.column, 0);
        }
    }

    #[test]
    fn fresh_items_fill_shortest_column_first() {
        let mut balancer = ColumnBalancer::new();
        let cache = HeightCache::new(300);
        let photos = squares(3);
        let layout = pass(&mut balancer, &photos, &cache, 3);

        // Uniform heights: one item per column, left to right.
        for (i, column) in layout.columns.iter().enumerate() {
            assert_eq!(column.items.len(), 1, "column {i}");
            assert_eq!(column.items[0].offset, 0);
        }
    }

    #[test]
    fn new_item_goes_to_global_minimum_column() {
        // Running heights [500, 1400, 0] with tolerance 1000: a fresh
        // item must land in column 2.
        let mut balancer = ColumnBalancer::new();
        let running = [500usize, 1400, 0];
        let column = balancer.assign(PhotoId::new(99), &running, 1000);
        assert_eq!(column, 2);
    }

    #[test]
    fn ties_break_to_lowest_column_index() {
        let mut balancer = ColumnBalancer::new();
        assert_eq!(balancer.assign(PhotoId::new(1), &[0, 0, 0], 1000), 0);
    }

    #[test]
    fn previous_column_kept_within_tolerance() {
        let mut balancer = ColumnBalancer::new();
        balancer.assignments.insert(PhotoId::new(7), 1);

        // Column 1 is 900 over the minimum, within the 1000 tolerance.
        let column = balancer.assign(PhotoId::new(7), &[0, 900, 400], 1000);
        assert_eq!(column, 1);
    }

    #[test]
    fn previous_column_abandoned_past_tolerance() {
        let mut balancer = ColumnBalancer::new();
        balancer.assignments.insert(PhotoId::new(7), 1);

        let column = balancer.assign(PhotoId::new(7), &[0, 1500, 400], 1000);
        assert_eq!(column, 0);
        // Reassignment is recorded.
        assert_eq!(balancer.assignment_of(PhotoId::new(7)), Some(0));
    }

    #[test]
    fn stale_assignment_after_column_shrink_is_ignored() {
        let mut balancer = ColumnBalancer::new();
        balancer.assignments.insert(PhotoId::new(7), 4);

        // Only 2 columns now: index 4 is treated as no assignment.
        let column = balancer.assign(PhotoId::new(7), &[100, 0], 1000);
        assert_eq!(column, 1);
    }

    #[test]
    fn offsets_accumulate_height_plus_gap() {
        let mut balancer = ColumnBalancer::new();
        let cache = HeightCache::new(300);
        let photos = squares(4);
        let layout = pass(&mut balancer, &photos, &cache, 2);

        // 100x100 at width 280 estimates to 280px per item.
        let column = &layout.columns[0];
        assert_eq!(column.items[0].offset, 0);
        assert_eq!(column.items[1].offset, 304); // 280 + 24
        assert_eq!(column.height, 608);
        assert_eq!(column.offsets.total(), 608);
    }

    #[test]
    fn two_passes_are_identical() {
        let photos: Vec<Photo> = (0..40).map(|i| photo(i, 100 + i as usize * 7, 100)).collect();
        let mut cache = HeightCache::new(300);
        cache.record(PhotoId::new(3), 450);
        cache.record(PhotoId::new(17), 90);

        let mut first = ColumnBalancer::new();
        let mut second = ColumnBalancer::new();
        let a = pass(&mut first, &photos, &cache, 3);
        let b = pass(&mut second, &photos, &cache, 3);

        for (ca, cb) in a.columns.iter().zip(b.columns.iter()) {
            assert_eq!(ca.items, cb.items);
        }
        assert_eq!(a.total_height, b.total_height);
    }

    #[test]
    fn repeat_pass_with_same_balancer_is_stable() {
        let photos = squares(30);
        let cache = HeightCache::new(300);
        let mut balancer = ColumnBalancer::new();

        let first = pass(&mut balancer, &photos, &cache, 3);
        let second = pass(&mut balancer, &photos, &cache, 3);

        for (ca, cb) in first.columns.iter().zip(second.columns.iter()) {
            assert_eq!(ca.items, cb.items);
        }
    }

    #[test]
    fn total_height_is_tallest_column_plus_gap() {
        let mut balancer = ColumnBalancer::new();
        let mut cache = HeightCache::new(300);
        // One very tall measured item dominates.
        cache.record(PhotoId::new(0), 5000);
        let photos = squares(4);
        let layout = pass(&mut balancer, &photos, &cache, 2);

        assert_eq!(layout.total_height, 5000 + 24 + 24); // item + its gap + trailing gap
    }

    #[test]
    fn total_height_floored_by_viewport() {
        let mut balancer = ColumnBalancer::new();
        let cache = HeightCache::new(300);
        let photos = squares(1);
        let layout = pass(&mut balancer, &photos, &cache, 3);

        assert_eq!(layout.total_height, 800);
    }

    #[test]
    fn total_height_floored_by_placeholder_minimum() {
        let mut balancer = ColumnBalancer::new();
        let mut cache = HeightCache::new(300);
        // Measured tiny: columns are short, but the floor guards the
        // scroll area while estimates settle.
        for i in 0..30 {
            cache.record(PhotoId::new(i), 10);
        }
        let photos = squares(30);
        let layout = pass(&mut balancer, &photos, &cache, 3);

        // ceil(30/3) * (300 + 24) = 3240
        assert_eq!(layout.total_height, 3240);
    }

    #[test]
    fn sequence_order_is_ascending_within_each_column() {
        let photos: Vec<Photo> = (0..50).map(|i| photo(i, 100, 60 + (i as usize * 53) % 200)).collect();
        let mut balancer = ColumnBalancer::new();
        let cache = HeightCache::new(300);
        let layout = pass(&mut balancer, &photos, &cache, 4);

        for column in &layout.columns {
            for pair in column.items.windows(2) {
                assert!(pair[0].sequence < pair[1].sequence);
                assert!(pair[0].offset < pair[1].offset);
            }
        }
    }

    #[test]
    fn reset_discards_assignment_memory() {
        let mut balancer = ColumnBalancer::new();
        let cache = HeightCache::new(300);
        let photos = squares(10);
        pass(&mut balancer, &photos, &cache, 3);
        assert!(balancer.assignment_of(PhotoId::new(0)).is_some());

        balancer.reset();
        assert!(balancer.assignment_of(PhotoId::new(0)).is_none());
    }
}
