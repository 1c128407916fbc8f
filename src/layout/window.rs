//! Windowing: deciding which laid-out items are mounted and visible.

use std::collections::HashSet;

use super::balancer::Layout;
use crate::config::GridConfig;
use crate::model::PhotoId;

/// Mount/visibility decision inputs derived from the viewport height.
///
/// All three buffer distances and the mount budget scale linearly with
/// the viewport height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferParams {
    /// Buffer above the viewport.
    pub top: usize,
    /// Buffer below the viewport. Never exceeds `unmount`.
    pub bottom: usize,
    /// Outer bound on the buffer window, reserved for unmount
    /// hysteresis.
    pub unmount: usize,
    /// Mount budget: in-buffer items always mount, the remainder of the
    /// budget keeps a nearest-to-center lookahead pool warm.
    pub max_mounted: usize,
}

impl BufferParams {
    /// Derive buffer sizes for a viewport height.
    pub fn for_viewport(viewport_height: usize, config: &GridConfig) -> Self {
        let k = config.buffer_multiplier;
        let vh = viewport_height as f64;

        let top = (vh * k).round() as usize;
        let unmount = (vh * 1.5 * k).round() as usize;
        let bottom = ((vh * 1.2 * k).round() as usize).min(unmount);

        let scaled =
            (vh / config.reference_item_height as f64 * config.mount_density as f64).ceil() as usize;
        let max_mounted = scaled.max(config.min_mounted);

        Self {
            top,
            bottom,
            unmount,
            max_mounted,
        }
    }
}

/// An item the renderer should keep mounted.
///
/// `visible` means the item overlaps the buffered window; mounted items
/// with `visible = false` exist only as scroll-ahead placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountedItem {
    /// Photo id.
    pub id: PhotoId,
    /// Vertical offset within its column.
    pub offset: usize,
    /// Item height for this pass.
    pub height: usize,
    /// Whether the item overlaps the buffered window.
    pub visible: bool,
}

/// Compute the mounted subset of a layout, column by column.
///
/// Every in-buffer item mounts unconditionally; the remaining budget is
/// filled with the nearest-to-center out-of-buffer items to avoid
/// pop-in on fast scroll reversal. Column order (ascending sequence) is
/// preserved regardless of filtering.
pub fn compute_window(
    layout: &Layout,
    scroll_top: usize,
    viewport_height: usize,
    params: &BufferParams,
) -> Vec<Vec<MountedItem>> {
    let window_start = scroll_top.saturating_sub(params.top);
    let window_end = scroll_top + viewport_height + params.bottom;
    let viewport_center = scroll_top + viewport_height / 2;

    let in_buffer = |offset: usize, height: usize| offset < window_end && offset + height > window_start;

    // Rank every item: buffered first, then by distance to the viewport
    // center.
    struct Candidate {
        id: PhotoId,
        buffered: bool,
        distance: usize,
    }

    let mut candidates: Vec<Candidate> = layout
        .items()
        .map(|item| {
            let center = item.offset + item.height / 2;
            Candidate {
                id: item.id,
                buffered: in_buffer(item.offset, item.height),
                distance: center.abs_diff(viewport_center),
            }
        })
        .collect();
    candidates.sort_by_key(|c| (!c.buffered, c.distance));

    let buffered_count = candidates.iter().filter(|c| c.buffered).count();
    // Correctness over budget: nothing in the buffer may be dropped.
    let budget = params.max_mounted.max(buffered_count);

    let mounted: HashSet<PhotoId> = candidates.iter().take(budget).map(|c| c.id).collect();

    layout
        .columns
        .iter()
        .map(|column| {
            column
                .items
                .iter()
                .filter(|item| mounted.contains(&item.id))
                .map(|item| MountedItem {
                    id: item.id,
                    offset: item.offset,
                    height: item.height,
                    visible: in_buffer(item.offset, item.height),
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::balancer::ColumnBalancer;
    use crate::layout::height_cache::HeightCache;
    use crate::model::{Photo, PhotoId};

    fn uniform_layout(count: u64, columns: usize) -> Layout {
        let photos: Vec<Photo> = (0..count)
            .map(|i| Photo::new(PhotoId::new(i), 280, 280).unwrap())
            .collect();
        let cache = HeightCache::new(300);
        ColumnBalancer::new().layout_pass(
            &photos,
            &cache,
            columns,
            280,
            800,
            &GridConfig::default(),
        )
    }

    fn default_params() -> BufferParams {
        BufferParams::for_viewport(800, &GridConfig::default())
    }

    #[test]
    fn buffer_params_scale_with_viewport() {
        let params = default_params();
        assert_eq!(params.top, 640); // 800 * 0.8
        assert_eq!(params.bottom, 768); // 800 * 1.2 * 0.8
        assert_eq!(params.unmount, 960); // 800 * 1.5 * 0.8
        assert_eq!(params.max_mounted, 20); // ceil(800/500 * 12) = 20
    }

    #[test]
    fn buffer_params_budget_grows_on_tall_viewports() {
        let params = BufferParams::for_viewport(2000, &GridConfig::default());
        assert_eq!(params.max_mounted, 48); // ceil(2000/500 * 12)
    }

    #[test]
    fn buffer_params_budget_floor_on_short_viewports() {
        let params = BufferParams::for_viewport(100, &GridConfig::default());
        assert_eq!(params.max_mounted, 20);
    }

    #[test]
    fn bottom_buffer_never_exceeds_unmount_distance() {
        let config = GridConfig::default();
        for vh in [0usize, 1, 99, 800, 5000] {
            let params = BufferParams::for_viewport(vh, &config);
            assert!(params.bottom <= params.unmount, "vh = {vh}");
        }
    }

    #[test]
    fn every_buffered_item_is_mounted_and_visible() {
        let layout = uniform_layout(200, 3);
        let params = default_params();
        let scroll_top = 5000;

        let window = compute_window(&layout, scroll_top, 800, &params);

        let window_start = scroll_top - params.top;
        let window_end = scroll_top + 800 + params.bottom;
        for (column, mounted) in layout.columns.iter().zip(window.iter()) {
            for item in &column.items {
                let buffered =
                    item.offset < window_end && item.offset + item.height > window_start;
                if buffered {
                    let found = mounted
                        .iter()
                        .find(|m| m.id == item.id)
                        .expect("buffered item must be mounted");
                    assert!(found.visible);
                }
            }
        }
    }

    #[test]
    fn mounted_count_respects_budget() {
        let layout = uniform_layout(500, 3);
        let params = default_params();

        let window = compute_window(&layout, 10_000, 800, &params);

        let mounted: usize = window.iter().map(|c| c.len()).sum();
        let window_start = 10_000 - params.top;
        let window_end = 10_000 + 800 + params.bottom;
        let buffered = layout
            .items()
            .filter(|i| i.offset < window_end && i.offset + i.height > window_start)
            .count();
        assert!(mounted <= params.max_mounted.max(buffered));
    }

    #[test]
    fn spare_budget_mounts_nearest_to_center_first() {
        let layout = uniform_layout(300, 1);
        let params = default_params();
        let scroll_top = 30_000;

        let window = compute_window(&layout, scroll_top, 800, &params);
        let mounted = &window[0];

        // Some mounted items are outside the buffer (warm pool).
        let placeholders: Vec<_> = mounted.iter().filter(|m| !m.visible).collect();
        assert!(!placeholders.is_empty());

        // Every unmounted item is farther from the center than the
        // farthest mounted placeholder.
        let center = scroll_top + 400;
        let farthest_mounted = placeholders
            .iter()
            .map(|m| (m.offset + m.height / 2).abs_diff(center))
            .max()
            .unwrap();
        let mounted_ids: HashSet<PhotoId> = mounted.iter().map(|m| m.id).collect();
        for item in &layout.columns[0].items {
            if !mounted_ids.contains(&item.id) {
                let distance = (item.offset + item.height / 2).abs_diff(center);
                assert!(distance >= farthest_mounted);
            }
        }
    }

    #[test]
    fn visible_implies_in_buffer() {
        let layout = uniform_layout(200, 3);
        let params = default_params();
        let scroll_top = 8000;

        let window = compute_window(&layout, scroll_top, 800, &params);

        let window_start = scroll_top - params.top;
        let window_end = scroll_top + 800 + params.bottom;
        for mounted in window.iter().flatten() {
            let buffered =
                mounted.offset < window_end && mounted.offset + mounted.height > window_start;
            assert_eq!(mounted.visible, buffered);
        }
    }

    #[test]
    fn column_order_is_preserved_after_filtering() {
        let layout = uniform_layout(400, 4);
        let params = default_params();

        let window = compute_window(&layout, 12_000, 800, &params);

        for column in &window {
            for pair in column.windows(2) {
                assert!(pair[0].offset < pair[1].offset);
            }
        }
    }

    #[test]
    fn scroll_at_top_mounts_leading_items() {
        let layout = uniform_layout(100, 3);
        let params = default_params();

        let window = compute_window(&layout, 0, 800, &params);

        for column in window.iter() {
            assert!(!column.is_empty());
            assert!(column[0].visible);
            assert_eq!(column[0].offset, 0);
        }
    }

    #[test]
    fn empty_layout_yields_empty_columns() {
        let layout = uniform_layout(0, 3);
        let window = compute_window(&layout, 0, 800, &default_params());
        assert_eq!(window.len(), 3);
        assert!(window.iter().all(|c| c.is_empty()));
    }
}
