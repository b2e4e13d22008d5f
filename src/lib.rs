//! timeline-rs: headless timeline/Gantt chart engine.
//!
//! Entities are laid out as rows against a time axis split into fixed-duration
//! cells. Point and range events are positioned on a virtualized canvas that
//! only paints rows intersecting the viewport, and wheel/button zoom keeps the
//! pivot under the cursor stationary while accelerating on sustained input.
//!
//! Drawing goes through the [`render::Surface`] trait so the same engine can
//! drive a DOM adapter, a native toolkit, or the in-memory
//! [`render::HeadlessSurface`] used by tests.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;
pub mod virtualization;

pub use api::{ChartConfig, ChartOptions, ChartRenderers, TimelineChart};
pub use error::{ChartError, ChartResult};
