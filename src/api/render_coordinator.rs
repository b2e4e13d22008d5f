use tracing::{debug, trace};

use crate::core::EntityAccessor;
use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartEvent;
use crate::render::Surface;
use crate::virtualization::{RowAction, VisibilityChange, visible_row_range};

use super::TimelineChart;
use super::row_painter::Painter;

impl<S: Surface, A: EntityAccessor> TimelineChart<S, A> {
    /// Full render pipeline.
    ///
    /// Order: layout variables, titles, column header, pane sizes, side
    /// canvas, main canvas, row pool. Later stages read geometry set by
    /// earlier ones. Rows inside the viewport are painted before returning.
    pub fn render(&mut self) -> ChartResult<()> {
        let panes = self.require_created()?;
        let data = self.data.as_ref().ok_or(ChartError::MissingData)?;
        let entity_count = data.entities.len();

        if self.state.settings.column_auto_width {
            self.state.apply_auto_width();
        }
        self.state.bump_epoch();

        let mut painter = Painter::new(
            &mut self.surface,
            &mut self.renderers,
            &self.accessor,
            &self.state,
            panes,
        );
        painter.publish_layout_variables();
        painter.paint_titles();
        painter.paint_column_header(&mut self.layers);
        painter.size_panes(entity_count);
        painter.paint_side_canvas(&data.side_point_events, &mut self.layers);
        painter.paint_main_canvas(&data.global_range_events, entity_count, &mut self.layers);
        self.rows = painter.mount_row_pool(entity_count);

        let header_cell_count = self.layers.header_cells.len();
        debug!(
            entities = entity_count,
            header_cells = header_cell_count,
            cell_width = self.state.geometry.cell_width,
            "chart rendered"
        );

        self.apply_scroll(self.state.scroll);
        self.sync_visibility()?;
        self.emit_chart_event(ChartEvent::Rendered {
            entity_count,
            header_cell_count,
        });
        Ok(())
    }

    /// Redraws canvas-dependent layers only: pane sizes, side canvas, grid
    /// lines, global events and visible rows. Titles, header cells and the
    /// row pool are kept.
    ///
    /// Falls back to [`Self::render`] when the entity count no longer matches
    /// the row pool.
    pub fn render_canvas(&mut self) -> ChartResult<()> {
        let panes = self.require_created()?;
        let data = self.data.as_ref().ok_or(ChartError::MissingData)?;
        let entity_count = data.entities.len();
        if entity_count != self.rows.len() || self.layers.header_border.is_none() {
            debug!(
                entities = entity_count,
                pooled_rows = self.rows.len(),
                "row pool out of date; falling back to full render"
            );
            return self.render();
        }

        self.state.bump_epoch();
        let mut painter = Painter::new(
            &mut self.surface,
            &mut self.renderers,
            &self.accessor,
            &self.state,
            panes,
        );
        painter.reposition_column_header(&self.layers);
        painter.size_panes(entity_count);
        painter.paint_side_canvas(&data.side_point_events, &mut self.layers);
        painter.paint_main_canvas(&data.global_range_events, entity_count, &mut self.layers);
        self.rows.reset_paint_state();

        self.apply_scroll(self.state.scroll);
        self.sync_visibility()?;
        self.emit_chart_event(ChartEvent::CanvasRendered);
        Ok(())
    }

    /// Repositions every mounted element for the current geometry without
    /// creating new ones, then paints rows that became visible.
    pub fn refresh(&mut self) -> ChartResult<()> {
        let repositioned = self.refresh_geometry()?;
        self.apply_scroll(self.state.scroll);
        self.sync_visibility()?;
        self.emit_chart_event(ChartEvent::Refreshed {
            repositioned_rows: repositioned,
        });
        Ok(())
    }

    /// Reposition pass shared by refresh, zoom and resize. Only intersecting
    /// rows are touched; the rest are repositioned when they next show up.
    pub(super) fn refresh_geometry(&mut self) -> ChartResult<usize> {
        let panes = self.require_created()?;
        let entity_count = self.entity_count();
        let now = self.clock.now();

        let mut painter = Painter::new(
            &mut self.surface,
            &mut self.renderers,
            &self.accessor,
            &self.state,
            panes,
        );
        painter.publish_layout_variables();
        painter.size_panes(entity_count);
        painter.reposition_column_header(&self.layers);
        painter.reposition_side_canvas(&self.layers);
        painter.reposition_main_canvas(entity_count, &self.layers);

        let intersecting = self.rows.intersecting();
        let mut repositioned = 0;
        for index in &intersecting {
            if let Some(row) = self.rows.row_mut(*index) {
                if row.last_render.is_some() {
                    painter.reposition_row(row, now);
                    repositioned += 1;
                }
            }
        }
        trace!(
            rows = repositioned,
            epoch = self.state.geometry_epoch,
            "intersecting rows repositioned"
        );
        Ok(repositioned)
    }

    /// Evaluates row visibility from the current scroll position and applies
    /// the resulting transitions.
    pub(super) fn sync_visibility(&mut self) -> ChartResult<()> {
        let view = self.state.canvas_box_size();
        let visible = visible_row_range(
            self.state.scroll.top,
            view.height,
            self.state.geometry.cell_height,
            self.rows.len(),
        );
        let changes = self.rows.visibility_changes(visible);
        if changes.is_empty() {
            return Ok(());
        }
        self.apply_visibility_changes(&changes)
    }

    pub(super) fn apply_visibility_changes(
        &mut self,
        changes: &[VisibilityChange],
    ) -> ChartResult<()> {
        let panes = self.require_created()?;
        let now = self.clock.now();
        let epoch = self.state.geometry_epoch;
        let entities = self
            .data
            .as_ref()
            .map_or(&[][..], |data| data.entities.as_slice());

        let mut painter = Painter::new(
            &mut self.surface,
            &mut self.renderers,
            &self.accessor,
            &self.state,
            panes,
        );
        let mut events = Vec::new();
        for change in changes {
            if change.is_intersecting && entities.get(change.row).is_none() {
                // Pool outlived its data; the next render rebuilds it.
                trace!(row = change.row, "row without entity left unpainted");
                continue;
            }
            let Some(action) = self.rows.apply_visibility(*change, epoch) else {
                trace!(row = change.row, "visibility change for unknown row ignored");
                continue;
            };
            match action {
                RowAction::FirstPaint => {
                    let (Some(entity), Some(row)) =
                        (entities.get(change.row), self.rows.row_mut(change.row))
                    else {
                        continue;
                    };
                    painter.paint_row(entity, row, now);
                    events.push(ChartEvent::RowPainted { row: change.row });
                }
                RowAction::Repaint => {
                    if let Some(row) = self.rows.row_mut(change.row) {
                        painter.reposition_row(row, now);
                        events.push(ChartEvent::RowRepainted { row: change.row });
                    }
                }
                RowAction::Keep | RowAction::Hide => {}
            }
        }
        trace!(
            changes = changes.len(),
            painted = events.len(),
            intersecting = self.rows.intersecting_count(),
            "visibility applied"
        );

        for event in events {
            self.emit_chart_event(event);
        }
        Ok(())
    }
}
