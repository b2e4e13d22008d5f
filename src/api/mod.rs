//! Host-facing chart API.
//!
//! [`TimelineChart`] is split across controller files, each contributing one
//! `impl` block: lifecycle in `engine`, painting in `render_coordinator`,
//! scrolling in `scroll_controller`, zoom in `zoom_controller`.

mod chart_state;
mod engine;
mod options;
mod plugin_dispatch;
mod render_coordinator;
mod renderers;
mod row_painter;
mod scroll_controller;
mod snapshot;
mod validation;
mod zoom_controller;

pub use chart_state::ChartSettings;
pub use engine::TimelineChart;
pub use options::{ChartConfig, ChartOptions};
pub use renderers::{
    ChartRenderers, EventTarget, HeaderCellRenderer, PaneRenderer, PointEventRenderer,
    RangeEventRenderer, RowLabelRenderer, format_header_time,
};
pub use snapshot::ChartSnapshot;
