//! The masonry layout and windowing core.
//!
//! Data flow: container width -> [`column_count`] -> [`balancer`]
//! (consuming the photo sequence and [`height_cache`]) -> per-column
//! offsets -> [`window`] (consuming the debounced scroll position from
//! [`scheduler`]) -> the mounted subset handed to the renderer.

pub mod balancer;
pub mod column_count;
pub mod height_cache;
pub mod offset_index;
pub mod scheduler;
pub mod window;

pub use balancer::{ColumnBalancer, ColumnLayout, Layout, LayoutItem};
pub use column_count::{column_width_for, ColumnCountResolver, Resolution};
pub use height_cache::HeightCache;
pub use offset_index::OffsetIndex;
pub use scheduler::{FrameUpdate, SchedulerStats, ScrollMetrics, ScrollScheduler};
pub use window::{compute_window, BufferParams, MountedItem};
