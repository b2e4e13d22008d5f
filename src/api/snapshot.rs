use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{CanvasSize, EntityAccessor, ScrollPosition, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::ZoomAccelState;
use crate::render::Surface;

use super::TimelineChart;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub viewport: Viewport,
    pub chart_start_time: DateTime<Utc>,
    pub chart_end_time: DateTime<Utc>,
    pub render_start_time: DateTime<Utc>,
    pub render_end_time: DateTime<Utc>,
    pub cell_minutes: f64,
    pub header_cell_count: f64,
    pub cell_width: f64,
    pub cell_height: f64,
    pub base_cell_width: f64,
    pub base_cell_height: f64,
    pub zoom_scale: f64,
    pub zoom: ZoomAccelState,
    pub scroll: ScrollPosition,
    pub canvas: CanvasSize,
    pub canvas_box: CanvasSize,
    pub geometry_epoch: u64,
    pub entity_count: usize,
    pub intersecting_rows: Vec<usize>,
    pub painted_rows: usize,
}

impl<S: Surface, A: EntityAccessor> TimelineChart<S, A> {
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        let window = self.state.window;
        let entity_count = self.entity_count();
        ChartSnapshot {
            viewport: self.state.viewport,
            chart_start_time: window.start(),
            chart_end_time: window.end(),
            render_start_time: window.render_start(),
            render_end_time: window.render_end(),
            cell_minutes: window.cell_minutes(),
            header_cell_count: window.header_cell_count(),
            cell_width: self.state.geometry.cell_width,
            cell_height: self.state.geometry.cell_height,
            base_cell_width: self.state.base_cell_width,
            base_cell_height: self.state.base_cell_height,
            zoom_scale: self.state.zoom_scale,
            zoom: self.interaction.zoom_state(),
            scroll: self.state.scroll,
            canvas: self.state.canvas_size(entity_count),
            canvas_box: self.state.canvas_box_size(),
            geometry_epoch: self.state.geometry_epoch,
            entity_count,
            intersecting_rows: self.rows.intersecting(),
            painted_rows: self.rows.painted_count(),
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
