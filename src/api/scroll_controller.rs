use tracing::{debug, trace};

use crate::core::{EntityAccessor, ScrollPosition, Viewport, first_visible_event_time};
use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartEvent;
use crate::interaction::{InteractionMode, ScrollDirection};
use crate::render::{Pane, ScrollAxis, Surface};
use crate::virtualization::VisibilityChange;

use super::TimelineChart;
use super::validation::validate_viewport;

impl<S: Surface, A: EntityAccessor> TimelineChart<S, A> {
    /// Main canvas scroll handler. The main canvas is the single source of
    /// scroll truth: the header and side canvas follow `left`, the entity
    /// list follows `top`.
    ///
    /// Returns the clamped position actually applied.
    pub fn scroll_to(&mut self, position: ScrollPosition) -> ChartResult<ScrollPosition> {
        self.require_created()?;
        let applied = self.apply_scroll(position);
        self.sync_visibility()?;
        self.emit_chart_event(ChartEvent::Scrolled {
            left: applied.left,
            top: applied.top,
        });
        Ok(applied)
    }

    pub fn scroll_by(&mut self, delta_x: f64, delta_y: f64) -> ChartResult<ScrollPosition> {
        let current = self.state.scroll;
        self.scroll_to(ScrollPosition::new(
            current.left + delta_x,
            current.top + delta_y,
        ))
    }

    pub fn on_pointer_down(&mut self) {
        self.interaction.on_pan_start();
    }

    pub fn on_pointer_up(&mut self) {
        self.interaction.on_pan_end();
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    /// Drag panning: while the primary button is held, pointer movement
    /// scrolls the canvas in the opposite direction.
    ///
    /// Returns `Ok(None)` when the button is not pressed.
    pub fn on_pointer_move(
        &mut self,
        movement_x: f64,
        movement_y: f64,
        primary_pressed: bool,
    ) -> ChartResult<Option<ScrollPosition>> {
        self.require_created()?;
        let Some((delta_x, delta_y)) =
            self.interaction
                .drag_scroll_delta(movement_x, movement_y, primary_pressed)
        else {
            return Ok(None);
        };
        self.scroll_by(delta_x, delta_y).map(Some)
    }

    /// Wheel over the entity list scrolls the main canvas vertically.
    pub fn on_entity_list_wheel(&mut self, delta_y: f64) -> ChartResult<ScrollPosition> {
        self.scroll_by(0.0, delta_y)
    }

    /// Controller button press: one full step.
    pub fn step_scroll(&mut self, direction: ScrollDirection) -> ChartResult<ScrollPosition> {
        let settings = &self.state.settings;
        let (unit_x, unit_y) = direction.unit();
        let (delta_x, delta_y) = (
            unit_x * settings.button_scroll_step_x,
            unit_y * settings.button_scroll_step_y,
        );
        self.scroll_by(delta_x, delta_y)
    }

    /// Auto-repeat tick while a controller button is held: half a step.
    pub fn step_scroll_repeat(
        &mut self,
        direction: ScrollDirection,
    ) -> ChartResult<ScrollPosition> {
        let settings = &self.state.settings;
        let (unit_x, unit_y) = direction.unit();
        let (delta_x, delta_y) = (
            unit_x * settings.button_scroll_step_x / 2.0,
            unit_y * settings.button_scroll_step_y / 2.0,
        );
        self.scroll_by(delta_x, delta_y)
    }

    /// Row label click: scrolls horizontally to the entity's earliest
    /// visible event plus the configured search offset.
    ///
    /// Returns `Ok(None)` when the entity has no visible event.
    pub fn focus_entity(&mut self, row: usize) -> ChartResult<Option<ScrollPosition>> {
        self.require_created()?;
        let data = self.data.as_ref().ok_or(ChartError::MissingData)?;
        let len = data.entities.len();
        let entity = data
            .entities
            .get(row)
            .ok_or(ChartError::InvalidRow { index: row, len })?;

        let window = self.state.window;
        let Some(time) = first_visible_event_time(&self.accessor, entity, window) else {
            trace!(row, "focus requested for entity without visible events");
            return Ok(None);
        };
        let left = self.state.mapper().x_at(window.truncate_point(time))
            + self.state.settings.entity_event_search_scroll_offset;
        let top = self.state.scroll.top;
        self.scroll_to(ScrollPosition::new(left, top)).map(Some)
    }

    /// Explicit "geometry changed" event for a new outer size.
    ///
    /// With auto column width the base cell width is refitted to the canvas
    /// box and the current zoom scale re-applied.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.require_created()?;
        let viewport = validate_viewport(viewport)?;
        self.state.viewport = viewport;

        if self.state.settings.column_auto_width && self.state.apply_auto_width() {
            self.state.bump_epoch();
        }
        self.refresh_geometry()?;
        self.apply_scroll(self.state.scroll);
        self.sync_visibility()?;

        debug!(
            width = viewport.width,
            height = viewport.height,
            cell_width = self.state.geometry.cell_width,
            "chart resized"
        );
        self.emit_chart_event(ChartEvent::Resized { viewport });
        Ok(())
    }

    /// Host-driven visibility notifications, for hosts running their own
    /// intersection observer.
    pub fn on_visibility_changed(&mut self, changes: &[VisibilityChange]) -> ChartResult<()> {
        self.apply_visibility_changes(changes)
    }

    /// Clamps `requested` to the canvas and mirrors it onto the synchronized
    /// panes.
    pub(super) fn apply_scroll(&mut self, requested: ScrollPosition) -> ScrollPosition {
        let canvas = self.state.canvas_size(self.entity_count());
        let view = self.state.canvas_box_size();
        let applied = canvas.clamp_scroll(view, requested);
        self.state.scroll = applied;

        for (pane, axis, offset) in [
            (Pane::MainCanvas, ScrollAxis::Horizontal, applied.left),
            (Pane::MainCanvas, ScrollAxis::Vertical, applied.top),
            (Pane::ColumnHeader, ScrollAxis::Horizontal, applied.left),
            (Pane::SideCanvas, ScrollAxis::Horizontal, applied.left),
            (Pane::EntityList, ScrollAxis::Vertical, applied.top),
        ] {
            self.surface.set_scroll(pane, axis, offset);
        }
        applied
    }
}
