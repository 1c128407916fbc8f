//! The engine facade wiring the layout components together.
//!
//! Single-threaded and event-driven: every layout recomputation runs
//! synchronously inside whichever trigger caused it (resize, scroll
//! frame, page append, height measurement). Height writes land in the
//! cache immediately, so the next pass always reads them.

use tracing::{debug, info};

use crate::config::GridConfig;
use crate::layout::{
    column_width_for, compute_window, BufferParams, ColumnBalancer, ColumnCountResolver,
    FrameUpdate, HeightCache, Layout, MountedItem, ScrollMetrics, ScrollScheduler,
};
use crate::model::{Photo, PhotoId};

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Container width.
    pub width: usize,
    /// Container height.
    pub height: usize,
}

impl Viewport {
    /// Create viewport dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// Invalidation key for the memoized layout pass.
///
/// Two equal keys would produce identical layouts, so the cached pass
/// can be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LayoutParams {
    column_count: usize,
    column_width: usize,
    viewport_height: usize,
    photo_count: usize,
    height_revision: u64,
}

struct CachedLayout {
    params: LayoutParams,
    layout: Layout,
}

/// Masonry layout and windowing engine.
///
/// Owns the photo sequence (append-only across pagination) and the five
/// layout components. The rendering layer feeds it viewport geometry,
/// scroll notifications, and measured heights; it hands back the
/// mounted subset of a deterministic layout.
pub struct MasonryEngine {
    config: GridConfig,
    photos: Vec<Photo>,
    cache: HeightCache,
    balancer: ColumnBalancer,
    resolver: ColumnCountResolver,
    scheduler: ScrollScheduler,
    viewport: Viewport,
    column_count: usize,
    cached: Option<CachedLayout>,
    last_reported_height: Option<usize>,
    on_total_height: Option<Box<dyn FnMut(usize)>>,
}

impl MasonryEngine {
    /// Create an engine with the given tuning parameters and an empty
    /// photo sequence.
    pub fn new(config: GridConfig) -> Self {
        let column_count = config.min_columns.max(1);
        Self {
            cache: HeightCache::new(config.min_item_height),
            balancer: ColumnBalancer::new(),
            resolver: ColumnCountResolver::new(),
            scheduler: ScrollScheduler::new(config.load_threshold),
            photos: Vec::new(),
            viewport: Viewport::default(),
            column_count,
            cached: None,
            last_reported_height: None,
            on_total_height: None,
            config,
        }
    }

    /// Tuning parameters the engine was built with.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Update the viewport. A resolved column-count change discards all
    /// column assignments; height-only changes keep them.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let resolution = self.resolver.resolve(viewport.width, &self.config);
        if resolution.changed {
            self.balancer.reset();
            debug!(columns = resolution.count, "balancer memory reset");
        }
        self.column_count = resolution.count;
    }

    /// Current column count.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Actual column width at the current viewport.
    pub fn column_width(&self) -> usize {
        column_width_for(self.viewport.width, self.column_count, self.config.gap)
    }

    /// Append the next page of photos. Ids are expected to be unique
    /// across pages (the data-fetching collaborator deduplicates).
    pub fn append_photos(&mut self, photos: impl IntoIterator<Item = Photo>) {
        let before = self.photos.len();
        self.photos.extend(photos);
        info!(
            appended = self.photos.len() - before,
            total = self.photos.len(),
            "photos appended"
        );
    }

    /// Number of photos in the sequence.
    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }

    /// Callback surface for the rendering layer: record an item's real
    /// height once the image decoded. Takes effect on the next layout
    /// pass.
    pub fn report_measured_height(&mut self, id: PhotoId, height: usize) {
        self.cache.record(id, height);
    }

    /// Forward a raw scroll notification to the scheduler.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) {
        self.scheduler.on_scroll(metrics);
    }

    /// Fire one animation frame. Returns the applied update, if a
    /// scroll payload was pending; the caller owns the `load_more` side
    /// effect.
    pub fn on_frame(&mut self, loading: bool) -> Option<FrameUpdate> {
        self.scheduler.on_frame(loading)
    }

    /// The debounced scroll offset.
    pub fn scroll_top(&self) -> usize {
        self.scheduler.scroll_top()
    }

    /// Register the total-height change notification used for
    /// scroll-area sizing. Fired from the next layout pass whose total
    /// differs from the last reported one.
    pub fn set_total_height_callback(&mut self, callback: impl FnMut(usize) + 'static) {
        self.on_total_height = Some(Box::new(callback));
    }

    /// The current layout, recomputing only when an input changed
    /// (column geometry, photo count, or height revision).
    pub fn layout(&mut self) -> &Layout {
        let params = self.current_params();
        let stale = self.cached.as_ref().is_none_or(|c| c.params != params);

        if stale {
            let layout = self.balancer.layout_pass(
                &self.photos,
                &self.cache,
                params.column_count,
                params.column_width,
                params.viewport_height,
                &self.config,
            );
            debug!(
                photos = self.photos.len(),
                columns = params.column_count,
                total_height = layout.total_height,
                "layout recomputed"
            );

            if self.last_reported_height != Some(layout.total_height) {
                self.last_reported_height = Some(layout.total_height);
                if let Some(callback) = self.on_total_height.as_mut() {
                    callback(layout.total_height);
                }
            }

            self.cached = Some(CachedLayout { params, layout });
        }

        match &self.cached {
            Some(cached) => &cached.layout,
            None => unreachable!("layout cache populated when stale"),
        }
    }

    /// Total scroll-area height from the current layout.
    pub fn total_height(&mut self) -> usize {
        self.layout().total_height
    }

    /// The mounted subset of the layout at the debounced scroll
    /// position, per column, each item flagged visible or not.
    pub fn window(&mut self) -> Vec<Vec<MountedItem>> {
        let scroll_top = self.scheduler.scroll_top();
        let viewport_height = self.viewport.height;
        let params = BufferParams::for_viewport(viewport_height, &self.config);
        let layout = self.layout();
        compute_window(layout, scroll_top, viewport_height, &params)
    }

    /// Photo at a content-space point, if any. Points in gaps between
    /// or below items miss.
    pub fn hit_test(&mut self, x: usize, y: usize) -> Option<PhotoId> {
        let gap = self.config.gap;
        let column_width = self.column_width();
        if column_width == 0 {
            return None;
        }
        let stride = column_width + gap;

        let layout = self.layout();
        let column_index = x / stride;
        if column_index >= layout.columns.len() || x % stride >= column_width {
            return None;
        }

        let column = &layout.columns[column_index];
        let slot = column.offsets.item_at(y)?;
        let item = column.items.get(slot)?;
        (y - item.offset < item.height).then_some(item.id)
    }

    /// Full engine reset: drops photos, measured heights, column
    /// assignments, scroll state, and the layout memo. Keeps the config
    /// and viewport.
    pub fn reset(&mut self) {
        self.photos.clear();
        self.cache.clear();
        self.balancer.reset();
        self.scheduler.reset();
        self.cached = None;
        self.last_reported_height = None;
        info!("engine reset");
    }

    fn current_params(&self) -> LayoutParams {
        LayoutParams {
            column_count: self.column_count,
            column_width: self.column_width(),
            viewport_height: self.viewport.height,
            photo_count: self.photos.len(),
            height_revision: self.cache.revision(),
        }
    }
}
