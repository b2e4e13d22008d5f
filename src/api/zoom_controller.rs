use tracing::debug;

use crate::core::{EntityAccessor, PixelPoint, ScrollPosition};
use crate::error::ChartResult;
use crate::extensions::ChartEvent;
use crate::interaction::ZoomDirection;
use crate::render::Surface;

use super::TimelineChart;

impl<S: Surface, A: EntityAccessor> TimelineChart<S, A> {
    pub fn zoom_in(&mut self, pivot: Option<PixelPoint>) -> ChartResult<bool> {
        self.zoom(ZoomDirection::In, pivot)
    }

    pub fn zoom_out(&mut self, pivot: Option<PixelPoint>) -> ChartResult<bool> {
        self.zoom(ZoomDirection::Out, pivot)
    }

    /// Applies one accelerated zoom step around `pivot` (canvas-local
    /// pixels).
    ///
    /// Velocity accumulates while requests keep the same direction within the
    /// reset timeout. The resulting scale is clamped to the configured
    /// bounds; when clamping leaves it unchanged nothing is mutated and
    /// `Ok(false)` is returned. Without a pivot the scroll position is kept.
    pub fn zoom(&mut self, direction: ZoomDirection, pivot: Option<PixelPoint>) -> ChartResult<bool> {
        self.require_created()?;
        let now = self.clock.now();
        let step = self.interaction.propose_zoom_step(direction, now);

        let current = self.state.zoom_scale;
        let (min_scale, max_scale) = self.state.zoom_bounds();
        let candidate = (current + step.velocity).clamp(min_scale, max_scale);
        if (candidate - current).abs() <= f64::EPSILON * current.abs().max(1.0) {
            debug!(
                ?direction,
                scale = current,
                velocity = step.velocity,
                "zoom clamped at bound; skipped"
            );
            return Ok(false);
        }
        self.interaction.commit_zoom_step(step, now);

        let old_geometry = self.state.geometry;
        self.state.apply_zoom_scale(candidate);
        let new_geometry = self.state.geometry;
        let scroll = compensate_scroll(
            self.state.scroll,
            pivot,
            (old_geometry.cell_width, new_geometry.cell_width),
            (old_geometry.cell_height, new_geometry.cell_height),
        );

        self.state.bump_epoch();
        self.refresh_geometry()?;
        self.apply_scroll(scroll);
        self.sync_visibility()?;

        debug!(
            ?direction,
            scale = candidate,
            velocity = step.velocity,
            reset = step.reset,
            cell_width = new_geometry.cell_width,
            cell_height = new_geometry.cell_height,
            "zoom applied"
        );
        self.emit_chart_event(ChartEvent::Zoomed {
            direction,
            scale: candidate,
            velocity: step.velocity,
        });
        Ok(true)
    }

    /// Canvas wheel handler: only ctrl+wheel zooms; `delta_y > 0` zooms out.
    pub fn on_canvas_wheel(
        &mut self,
        delta_y: f64,
        ctrl_key: bool,
        pivot: PixelPoint,
    ) -> ChartResult<bool> {
        if !ctrl_key {
            return Ok(false);
        }
        self.zoom(ZoomDirection::from_wheel_delta(delta_y), Some(pivot))
    }

    /// Controller button zoom around the center of the visible canvas box.
    pub fn zoom_at_center(&mut self, direction: ZoomDirection) -> ChartResult<bool> {
        let pivot = self.canvas_box_center();
        self.zoom(direction, Some(pivot))
    }

    /// Canvas-local coordinate at the center of the visible canvas box.
    #[must_use]
    pub fn canvas_box_center(&self) -> PixelPoint {
        let view = self.state.canvas_box_size();
        let scroll = self.state.scroll;
        PixelPoint::new(scroll.left + view.width / 2.0, scroll.top + view.height / 2.0)
    }
}

/// Keeps the content under `pivot` at the same viewport offset:
/// `new_scroll = pivot * new / old - (pivot - scroll)` per axis whose size
/// changed.
fn compensate_scroll(
    scroll: ScrollPosition,
    pivot: Option<PixelPoint>,
    (old_width, new_width): (f64, f64),
    (old_height, new_height): (f64, f64),
) -> ScrollPosition {
    let Some(pivot) = pivot else {
        return scroll;
    };
    let axis = |position: f64, offset: f64, old: f64, new: f64| {
        if old <= 0.0 || old == new {
            return offset;
        }
        position * new / old - (position - offset)
    };
    ScrollPosition::new(
        axis(pivot.x, scroll.left, old_width, new_width),
        axis(pivot.y, scroll.top, old_height, new_height),
    )
}

#[cfg(test)]
mod tests {
    use super::compensate_scroll;
    use crate::core::{PixelPoint, ScrollPosition};

    #[test]
    fn pivot_keeps_viewport_offset() {
        let scroll = ScrollPosition::new(100.0, 0.0);
        let pivot = PixelPoint::new(300.0, 50.0);
        let next = compensate_scroll(scroll, Some(pivot), (40.0, 44.0), (40.0, 40.0));

        assert!((next.left - (330.0 - 200.0)).abs() < 1e-9);
        assert_eq!(next.top, 0.0);
    }

    #[test]
    fn missing_pivot_keeps_scroll() {
        let scroll = ScrollPosition::new(12.0, 34.0);
        assert_eq!(
            compensate_scroll(scroll, None, (40.0, 80.0), (40.0, 80.0)),
            scroll
        );
    }
}
