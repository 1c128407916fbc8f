//! Scroll event coalescing and pagination triggering.
//!
//! Raw scroll notifications arrive far faster than frames render. The
//! scheduler keeps a single pending payload per frame: scheduling a new
//! one cancels and replaces the old (single-flight), so only the latest
//! scroll state is ever applied, never a stale one.

use tracing::trace;

/// Raw scroll geometry captured from one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollMetrics {
    /// Scroll offset from the top of the content.
    pub scroll_top: usize,
    /// Total scrollable content height.
    pub scroll_height: usize,
    /// Height of the scroll container itself.
    pub client_height: usize,
}

impl ScrollMetrics {
    /// Distance from the bottom of the content.
    pub fn distance_to_bottom(&self) -> usize {
        self.scroll_height
            .saturating_sub(self.scroll_top + self.client_height)
    }
}

/// Applied state for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameUpdate {
    /// The debounced scroll offset to lay out against.
    pub scroll_top: usize,
    /// Whether the caller should invoke its pagination side effect.
    /// The pagination collaborator guarantees at most one in-flight
    /// request; the scheduler only decides the trigger.
    pub load_more: bool,
}

/// Counters for scheduling behavior, exposed for tests and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchedulerStats {
    /// Notifications received.
    pub scheduled: u64,
    /// Pending payloads replaced before a frame fired.
    pub cancelled: u64,
    /// Frames that applied a payload.
    pub applied: u64,
}

/// Frame-coalescing scroll scheduler.
///
/// `on_scroll` may be called any number of times between frames;
/// `on_frame` applies the latest payload, if any, exactly once.
#[derive(Debug, Clone, Default)]
pub struct ScrollScheduler {
    pending: Option<ScrollMetrics>,
    scroll_top: usize,
    load_threshold: usize,
    stats: SchedulerStats,
}

impl ScrollScheduler {
    /// Create a scheduler with the given pagination threshold.
    pub fn new(load_threshold: usize) -> Self {
        Self {
            load_threshold,
            ..Self::default()
        }
    }

    /// Record a scroll notification, replacing any pending payload.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) {
        if self.pending.is_some() {
            self.stats.cancelled += 1;
            trace!(scroll_top = metrics.scroll_top, "pending scroll payload replaced");
        }
        self.stats.scheduled += 1;
        self.pending = Some(metrics);
    }

    /// Fire one frame: apply the pending payload, if any.
    ///
    /// Pagination triggers when not loading, within `load_threshold` of
    /// the bottom, and actually scrolled. The `scroll_top > 0` guard
    /// matters because a container whose content does not overflow
    /// reports zero and must not count as "scrolled to bottom".
    pub fn on_frame(&mut self, loading: bool) -> Option<FrameUpdate> {
        let metrics = self.pending.take()?;
        self.stats.applied += 1;
        self.scroll_top = metrics.scroll_top;

        let load_more = !loading
            && metrics.scroll_top > 0
            && metrics.distance_to_bottom() < self.load_threshold;

        Some(FrameUpdate {
            scroll_top: metrics.scroll_top,
            load_more,
        })
    }

    /// The debounced scroll offset: the last applied payload's.
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// True if a payload is waiting for the next frame.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Scheduling counters.
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Drop pending work and reset the debounced offset.
    pub fn reset(&mut self) {
        self.pending = None;
        self.scroll_top = 0;
        self.stats = SchedulerStats::default();
    }
}
