use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{
    CanvasSize, CellGeometry, CoordinateMapper, ScrollPosition, TimeWindow, Viewport,
};
use crate::error::ChartResult;
use crate::interaction::ZoomAccelConfig;

/// Fully resolved chart configuration.
///
/// [`super::ChartConfig`] patches are merged onto this value; every field
/// always holds a concrete setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    pub chart_start_time: DateTime<Utc>,
    pub chart_end_time: DateTime<Utc>,
    pub padding_cell_count: u32,
    pub main_title: String,
    pub column_title: String,
    pub left_panel_width: f64,
    pub column_title_height: f64,
    pub column_header_height: f64,
    pub side_canvas_height: f64,
    pub side_canvas_content_height_ratio: f64,
    pub scroll_width: f64,
    pub cell_minutes: f64,
    pub cell_width: f64,
    pub cell_height: f64,
    pub main_range_content_ratio: f64,
    pub main_point_content_ratio: f64,
    pub min_zoom_scale: f64,
    pub max_zoom_scale: f64,
    pub zoom_step: f64,
    pub accel_reset_timeout_ms: i64,
    pub has_horizontal_line: bool,
    pub has_vertical_line: bool,
    pub column_auto_width: bool,
    pub h_zoom_enabled: bool,
    pub v_zoom_enabled: bool,
    /// `strftime` pattern for the default header cell label.
    pub header_time_format: String,
    pub button_scroll_step_x: f64,
    pub button_scroll_step_y: f64,
    pub entity_event_search_scroll_offset: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            chart_start_time: DateTime::<Utc>::default(),
            chart_end_time: DateTime::<Utc>::default(),
            padding_cell_count: 2,
            main_title: String::new(),
            column_title: String::new(),
            left_panel_width: 200.0,
            column_title_height: 40.0,
            column_header_height: 40.0,
            side_canvas_height: 40.0,
            side_canvas_content_height_ratio: 0.8,
            scroll_width: 15.0,
            cell_minutes: 30.0,
            cell_width: 40.0,
            cell_height: 40.0,
            main_range_content_ratio: 0.8,
            main_point_content_ratio: 0.6,
            min_zoom_scale: 1.0,
            max_zoom_scale: 5.0,
            zoom_step: 0.1,
            accel_reset_timeout_ms: 300,
            has_horizontal_line: true,
            has_vertical_line: true,
            column_auto_width: false,
            h_zoom_enabled: true,
            v_zoom_enabled: false,
            header_time_format: "%m-%d %H:%M".to_owned(),
            button_scroll_step_x: 400.0,
            button_scroll_step_y: 200.0,
            entity_event_search_scroll_offset: -100.0,
        }
    }
}

impl ChartSettings {
    pub fn time_window(&self) -> ChartResult<TimeWindow> {
        TimeWindow::new(
            self.chart_start_time,
            self.chart_end_time,
            self.cell_minutes,
            self.padding_cell_count,
        )
    }

    #[must_use]
    pub fn zoom_accel_config(&self) -> ZoomAccelConfig {
        ZoomAccelConfig {
            step: self.zoom_step,
            reset_timeout_ms: self.accel_reset_timeout_ms,
        }
    }

    #[must_use]
    pub fn side_canvas_content_height(&self) -> f64 {
        self.side_canvas_content_height_ratio * self.side_canvas_height
    }

    /// Title, header and side canvas stacked above the main canvas.
    #[must_use]
    pub fn column_panel_height(&self) -> f64 {
        self.column_title_height + self.column_header_height + self.side_canvas_height
    }
}

/// Runtime geometry of one chart: resolved settings plus zoom, scroll and
/// the geometry epoch used to detect stale rows.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ChartState {
    pub(super) settings: ChartSettings,
    pub(super) window: TimeWindow,
    pub(super) base_cell_width: f64,
    pub(super) base_cell_height: f64,
    pub(super) geometry: CellGeometry,
    pub(super) zoom_scale: f64,
    pub(super) viewport: Viewport,
    pub(super) scroll: ScrollPosition,
    pub(super) geometry_epoch: u64,
}

impl Default for ChartState {
    fn default() -> Self {
        let settings = ChartSettings::default();
        let geometry = CellGeometry {
            cell_width: settings.cell_width,
            cell_height: settings.cell_height,
            point_content_ratio: settings.main_point_content_ratio,
            range_content_ratio: settings.main_range_content_ratio,
        };
        Self {
            base_cell_width: settings.cell_width,
            base_cell_height: settings.cell_height,
            settings,
            window: TimeWindow::default(),
            geometry,
            zoom_scale: 1.0,
            viewport: Viewport::new(0, 0),
            scroll: ScrollPosition::default(),
            geometry_epoch: 0,
        }
    }
}

impl ChartState {
    /// Installs validated settings. Explicit cell sizes become the new zoom
    /// base and reset the scale to 1.
    pub(super) fn apply_settings(
        &mut self,
        settings: ChartSettings,
        window: TimeWindow,
        cell_size_changed: bool,
    ) {
        if cell_size_changed {
            self.base_cell_width = settings.cell_width;
            self.base_cell_height = settings.cell_height;
            self.zoom_scale = 1.0;
        }
        self.zoom_scale = self
            .zoom_scale
            .clamp(settings.min_zoom_scale, settings.max_zoom_scale);
        self.geometry.point_content_ratio = settings.main_point_content_ratio;
        self.geometry.range_content_ratio = settings.main_range_content_ratio;
        self.settings = settings;
        self.window = window;
        self.apply_zoom_scale(self.zoom_scale);
        self.bump_epoch();
    }

    /// Derives the current cell size from the base size and `scale` on the
    /// axes with zoom enabled.
    pub(super) fn apply_zoom_scale(&mut self, scale: f64) {
        self.zoom_scale = scale;
        self.geometry.cell_width = if self.settings.h_zoom_enabled {
            self.base_cell_width * scale
        } else {
            self.base_cell_width
        };
        self.geometry.cell_height = if self.settings.v_zoom_enabled {
            self.base_cell_height * scale
        } else {
            self.base_cell_height
        };
    }

    /// Fits the base cell width to the canvas box. Returns `false` when the
    /// window or the box is empty.
    pub(super) fn apply_auto_width(&mut self) -> bool {
        let count = self.window.header_cell_count();
        let box_width = self.canvas_box_size().width;
        if count <= 0.0 || box_width <= 0.0 {
            return false;
        }
        self.base_cell_width = box_width / count;
        self.apply_zoom_scale(self.zoom_scale);
        true
    }

    pub(super) fn bump_epoch(&mut self) {
        self.geometry_epoch += 1;
    }

    #[must_use]
    pub(super) fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.window, self.geometry)
    }

    #[must_use]
    pub(super) fn canvas_size(&self, entity_count: usize) -> CanvasSize {
        self.mapper().canvas_size(entity_count)
    }

    /// Visible area of the scrollable main canvas box.
    #[must_use]
    pub(super) fn canvas_box_size(&self) -> CanvasSize {
        let settings = &self.settings;
        CanvasSize::new(
            (f64::from(self.viewport.width) - settings.left_panel_width - settings.scroll_width)
                .max(0.0),
            (f64::from(self.viewport.height)
                - settings.column_panel_height()
                - settings.scroll_width)
                .max(0.0),
        )
    }

    #[must_use]
    pub(super) fn zoom_bounds(&self) -> (f64, f64) {
        (self.settings.min_zoom_scale, self.settings.max_zoom_scale)
    }
}
