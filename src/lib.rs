//! Masonry photo-grid layout and windowing engine.
//!
//! Lays out a photo sequence into balanced columns and decides, for a
//! given scroll position, which items a renderer should keep mounted.
//! The engine is pure geometry: it never fetches, decodes, or paints.
//! Everything is whole pixels, and every pass is deterministic for a
//! given input snapshot.
//!
//! # Architecture
//!
//! - [`model`]: photo identities and the JSON manifest they load from.
//! - [`config`]: tuning parameters with file, environment, and CLI
//!   precedence.
//! - [`layout`]: the core pipeline. Column-count resolution, the
//!   height cache, the stable column balancer, Fenwick-backed offset
//!   indexes, windowing, and the frame-coalescing scroll scheduler.
//! - [`engine`]: the [`MasonryEngine`](engine::MasonryEngine) facade a
//!   rendering layer drives with viewport, scroll, and measurement
//!   events.
//! - [`logging`]: file-backed tracing setup.

pub mod config;
pub mod engine;
pub mod layout;
pub mod logging;
pub mod model;

pub use config::GridConfig;
pub use engine::{MasonryEngine, Viewport};
pub use layout::{FrameUpdate, Layout, MountedItem, ScrollMetrics};
pub use model::{AppError, Photo, PhotoId, PhotoManifest};
