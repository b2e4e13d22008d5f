use serde::{Deserialize, Serialize};

use crate::core::time_units::{to_millis, to_minutes};
use crate::core::{CanvasSize, TimeWindow};

/// Border width shared by all bordered elements; vertical placement subtracts
/// it so event content lines up with the row dividers.
pub const BORDER_COMPENSATION_PX: f64 = 1.0;

/// Current cell dimensions and content ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellGeometry {
    pub cell_width: f64,
    pub cell_height: f64,
    pub point_content_ratio: f64,
    pub range_content_ratio: f64,
}

impl Default for CellGeometry {
    fn default() -> Self {
        Self {
            cell_width: 40.0,
            cell_height: 40.0,
            point_content_ratio: 0.6,
            range_content_ratio: 0.8,
        }
    }
}

impl CellGeometry {
    /// Edge length of the square point-event icon.
    #[must_use]
    pub fn point_content_size(self) -> f64 {
        self.cell_height * self.point_content_ratio
    }

    #[must_use]
    pub fn range_content_height(self) -> f64 {
        self.cell_height * self.range_content_ratio
    }

    /// Top of the row band, also the position of the row divider.
    #[must_use]
    pub fn row_top(self, row: usize) -> f64 {
        self.cell_height * row as f64
    }

    /// `canvasWidth = cellWidth * headerCellCount`, `canvasHeight = cellHeight * entityCount`.
    #[must_use]
    pub fn canvas_size(self, header_cell_count: f64, entity_count: usize) -> CanvasSize {
        CanvasSize::new(
            self.cell_width * header_cell_count,
            self.cell_height * entity_count as f64,
        )
    }

    fn content_top(self, row: usize, content_height: f64) -> f64 {
        self.row_top(row) + (self.cell_height - content_height) / 2.0 - BORDER_COMPENSATION_PX
    }
}

/// Placement of a point event icon, centered on its instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointPlacement {
    pub left: f64,
    pub top: f64,
    pub size: f64,
}

/// Placement of a range bar clipped to the render window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangePlacement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Maps event times to canvas pixel offsets.
///
/// Horizontal offsets are measured from the padded render start, so the
/// canvas origin corresponds to `render_start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    window: TimeWindow,
    geometry: CellGeometry,
}

impl CoordinateMapper {
    #[must_use]
    pub fn new(window: TimeWindow, geometry: CellGeometry) -> Self {
        Self { window, geometry }
    }

    #[must_use]
    pub fn window(self) -> TimeWindow {
        self.window
    }

    #[must_use]
    pub fn geometry(self) -> CellGeometry {
        self.geometry
    }

    /// Unclipped horizontal pixel offset of `time`.
    #[must_use]
    pub fn x_at(self, time: i64) -> f64 {
        let (render_start, _) = self.window.render_millis();
        to_minutes(time - render_start) * self.geometry.cell_width / self.window.cell_minutes()
    }

    /// Inverse of [`Self::x_at`], in epoch milliseconds.
    #[must_use]
    pub fn time_at_x(self, x: f64) -> f64 {
        let (render_start, _) = self.window.render_millis();
        render_start as f64 + to_millis(x * self.window.cell_minutes() / self.geometry.cell_width)
    }

    #[must_use]
    pub fn canvas_size(self, entity_count: usize) -> CanvasSize {
        self.geometry
            .canvas_size(self.window.header_cell_count(), entity_count)
    }

    /// Point event placement in entity row `row`.
    #[must_use]
    pub fn point(self, time: i64, row: usize) -> PointPlacement {
        let size = self.geometry.point_content_size();
        let center = self.x_at(self.window.truncate_point(time));
        PointPlacement {
            left: center - size / 2.0,
            top: self.geometry.content_top(row, size),
            size,
        }
    }

    /// Range event placement in entity row `row`. Degenerate ranges yield
    /// `width <= 0` and are not special-cased.
    #[must_use]
    pub fn range(self, start: i64, end: i64, row: usize) -> RangePlacement {
        let height = self.geometry.range_content_height();
        let (left, width) = self.horizontal_span(start, end);
        RangePlacement {
            left,
            top: self.geometry.content_top(row, height),
            width,
            height,
        }
    }

    /// Point placement in the side canvas band, vertically centered.
    #[must_use]
    pub fn side_point(self, time: i64, band_height: f64, content_height: f64) -> PointPlacement {
        let center = self.x_at(self.window.truncate_point(time));
        PointPlacement {
            left: center - content_height / 2.0,
            top: (band_height - content_height) / 2.0,
            size: content_height,
        }
    }

    /// Global range backdrop spanning `canvas_height` from the canvas top.
    #[must_use]
    pub fn global_range(self, start: i64, end: i64, canvas_height: f64) -> RangePlacement {
        let (left, width) = self.horizontal_span(start, end);
        RangePlacement {
            left,
            top: 0.0,
            width,
            height: canvas_height,
        }
    }

    fn horizontal_span(self, start: i64, end: i64) -> (f64, f64) {
        let (start, end) = self.window.truncate_range(start, end);
        let (render_start, _) = self.window.render_millis();
        let scale = self.geometry.cell_width / self.window.cell_minutes();
        (
            to_minutes(start - render_start) * scale,
            to_minutes(end - start) * scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{CellGeometry, CoordinateMapper};
    use crate::core::TimeWindow;

    const HOUR: i64 = 60 * 60 * 1000;

    fn mapper() -> CoordinateMapper {
        let window = TimeWindow::from_millis(0, 24 * HOUR, 30.0, 0).expect("window");
        CoordinateMapper::new(
            window,
            CellGeometry {
                cell_width: 50.0,
                cell_height: 50.0,
                ..CellGeometry::default()
            },
        )
    }

    #[test]
    fn range_maps_to_cell_offsets() {
        let placement = mapper().range(HOUR, 2 * HOUR, 0);
        assert_eq!(placement.left, 100.0);
        assert_eq!(placement.width, 100.0);
        assert_eq!(placement.height, 40.0);
        assert_eq!(placement.top, 4.0);
    }

    #[test]
    fn point_is_centered_on_its_instant() {
        let placement = mapper().point(HOUR, 2);
        assert_eq!(placement.size, 30.0);
        assert_eq!(placement.left, 100.0 - 15.0);
        assert_eq!(placement.top, 100.0 + 10.0 - 1.0);
    }

    #[test]
    fn canvas_covers_every_cell_and_row() {
        let mapper = mapper();
        assert_eq!(mapper.window().header_cell_count(), 48.0);

        let canvas = mapper.canvas_size(20);
        assert_eq!(canvas.width, 2400.0);
        assert_eq!(canvas.height, 1000.0);
        assert_eq!(mapper.geometry().row_top(5), 250.0);
    }

    #[test]
    fn degenerate_range_has_non_positive_width() {
        let placement = mapper().range(2 * HOUR, HOUR, 0);
        assert!(placement.width < 0.0);
    }

    #[test]
    fn time_at_x_inverts_x_at() {
        let mapper = mapper();
        let x = mapper.x_at(5 * HOUR + 1234);
        assert!((mapper.time_at_x(x) - (5 * HOUR + 1234) as f64).abs() < 1e-6);
    }
}
