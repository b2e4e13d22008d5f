use chrono::{DateTime, Utc};
use tracing::trace;

use crate::core::{EntityAccessor, datetime_to_millis, millis_to_datetime};
use crate::render::{ElementId, ElementKind, LayoutVariable, PaneHandles, Surface};
use crate::virtualization::{EntityRow, MountedPoint, MountedRange, RenderStamp, RowPool};

use super::renderers::format_header_time;
use super::{ChartRenderers, EventTarget, chart_state::ChartState};

/// Elements owned by the chart outside the row pool, kept so refreshes can
/// reposition them in place.
#[derive(Debug, Clone, Default)]
pub(super) struct MountedLayers {
    pub(super) header_cells: Vec<ElementId>,
    pub(super) header_border: Option<ElementId>,
    pub(super) side_grid_lines: Vec<ElementId>,
    pub(super) side_points: Vec<MountedPoint>,
    pub(super) main_grid_lines: Vec<ElementId>,
    pub(super) global_ranges: Vec<MountedRange>,
}

impl MountedLayers {
    pub(super) fn clear_side_canvas(&mut self) {
        self.side_grid_lines.clear();
        self.side_points.clear();
    }

    pub(super) fn clear_main_canvas(&mut self) {
        self.main_grid_lines.clear();
        self.global_ranges.clear();
    }
}

/// Borrowed view of everything needed to draw: the surface, the host
/// callbacks and the current geometry.
pub(super) struct Painter<'a, S: Surface, A: EntityAccessor> {
    surface: &'a mut S,
    renderers: &'a mut ChartRenderers<S, A>,
    accessor: &'a A,
    state: &'a ChartState,
    panes: PaneHandles,
}

impl<'a, S: Surface, A: EntityAccessor> Painter<'a, S, A> {
    pub(super) fn new(
        surface: &'a mut S,
        renderers: &'a mut ChartRenderers<S, A>,
        accessor: &'a A,
        state: &'a ChartState,
        panes: PaneHandles,
    ) -> Self {
        Self {
            surface,
            renderers,
            accessor,
            state,
            panes,
        }
    }

    pub(super) fn publish_layout_variables(&mut self) {
        let settings = &self.state.settings;
        let geometry = self.state.geometry;
        for (variable, value) in [
            (LayoutVariable::ChartWidth, f64::from(self.state.viewport.width)),
            (LayoutVariable::ChartHeight, f64::from(self.state.viewport.height)),
            (LayoutVariable::LeftPanelWidth, settings.left_panel_width),
            (LayoutVariable::ColumnTitleHeight, settings.column_title_height),
            (LayoutVariable::ColumnHeaderHeight, settings.column_header_height),
            (LayoutVariable::SideCanvasHeight, settings.side_canvas_height),
            (
                LayoutVariable::SideCanvasContentHeight,
                settings.side_canvas_content_height(),
            ),
            (LayoutVariable::CellHeight, geometry.cell_height),
            (
                LayoutVariable::MainRangeContentHeight,
                geometry.range_content_height(),
            ),
            (
                LayoutVariable::MainPointContentHeight,
                geometry.point_content_size(),
            ),
            (LayoutVariable::ScrollWidth, settings.scroll_width),
        ] {
            self.surface.set_variable(variable, value);
        }
    }

    pub(super) fn paint_titles(&mut self) {
        let panes = self.panes;

        self.surface.clear(panes.main_title);
        match self.renderers.main_title.as_mut() {
            Some(render) => render(&mut *self.surface, panes.main_title),
            None => self
                .surface
                .set_text(panes.main_title, &self.state.settings.main_title),
        }

        self.surface.clear(panes.table_column);
        if let Some(render) = self.renderers.table_column.as_mut() {
            render(&mut *self.surface, panes.table_column);
        }

        self.surface.clear(panes.column_title);
        match self.renderers.column_title.as_mut() {
            Some(render) => render(&mut *self.surface, panes.column_title),
            None => self
                .surface
                .set_text(panes.column_title, &self.state.settings.column_title),
        }
    }

    /// One header cell per time bucket of the padded window, plus the right
    /// border after the last cell.
    pub(super) fn paint_column_header(&mut self, layers: &mut MountedLayers) {
        let pane = self.panes.column_header;
        let window = self.state.window;
        let cell_width = self.state.geometry.cell_width;

        self.surface.clear(pane);
        layers.header_cells.clear();
        for index in 0..window.header_cell_slots() {
            let cell = self.surface.create_element(ElementKind::HeaderCell);
            self.surface.set_position(cell, index as f64 * cell_width, 0.0);
            self.surface.set_size(cell, Some(cell_width), None);
            self.surface.append(pane, cell);

            let time = millis_to_datetime(window.cell_start_millis(index));
            match self.renderers.header_cell.as_mut() {
                Some(render) => render(&mut *self.surface, time, cell),
                None => {
                    let label = format_header_time(time, &self.state.settings.header_time_format);
                    self.surface.set_text(cell, &label);
                }
            }
            layers.header_cells.push(cell);
        }

        let border = self.surface.create_element(ElementKind::HeaderBorder);
        self.surface
            .set_position(border, window.header_cell_count() * cell_width, 0.0);
        self.surface.set_size(border, Some(1.0), None);
        self.surface.append(pane, border);
        layers.header_border = Some(border);
    }

    pub(super) fn reposition_column_header(&mut self, layers: &MountedLayers) {
        let cell_width = self.state.geometry.cell_width;
        for (index, cell) in layers.header_cells.iter().enumerate() {
            self.surface.set_position(*cell, index as f64 * cell_width, 0.0);
            self.surface.set_size(*cell, Some(cell_width), None);
        }
        if let Some(border) = layers.header_border {
            self.surface.set_position(
                border,
                self.state.window.header_cell_count() * cell_width,
                0.0,
            );
        }
    }

    /// Header and side canvas get an extra scrollbar width so their scroll
    /// range matches the main canvas box.
    pub(super) fn size_panes(&mut self, entity_count: usize) {
        let canvas = self.state.canvas_size(entity_count);
        let settings = &self.state.settings;
        self.surface.set_size(
            self.panes.column_header,
            Some(canvas.width + settings.scroll_width),
            None,
        );
        self.surface.set_size(
            self.panes.side_canvas,
            Some(canvas.width + settings.scroll_width),
            Some(settings.side_canvas_height),
        );
        self.surface
            .set_size(self.panes.main_canvas, Some(canvas.width), Some(canvas.height));
    }

    pub(super) fn paint_side_canvas(
        &mut self,
        events: &[A::PointEvent],
        layers: &mut MountedLayers,
    ) {
        let pane = self.panes.side_canvas;
        self.surface.clear(pane);
        layers.clear_side_canvas();

        if self.state.settings.has_vertical_line {
            for index in 0..self.side_grid_line_count() {
                let line = self.surface.create_element(ElementKind::SideGridLine);
                self.place_side_grid_line(line, index);
                self.surface.append(pane, line);
                layers.side_grid_lines.push(line);
            }
        }

        let window = self.state.window;
        for event in events {
            let time = datetime_to_millis(self.accessor.point_time(event));
            if !window.contains(time) {
                continue;
            }
            let element = self.surface.create_element(ElementKind::SidePointEvent);
            self.place_side_point(element, time);
            self.surface.append(pane, element);
            if let Some(render) = self.renderers.side_point_event.as_mut() {
                render(
                    &mut *self.surface,
                    event,
                    EventTarget {
                        canvas: pane,
                        container: element,
                    },
                );
            }
            layers.side_points.push(MountedPoint { time, element });
        }
    }

    pub(super) fn reposition_side_canvas(&mut self, layers: &MountedLayers) {
        for (index, line) in layers.side_grid_lines.iter().enumerate() {
            self.place_side_grid_line(*line, index);
        }
        for point in &layers.side_points {
            self.place_side_point(point.element, point.time);
        }
    }

    /// Vertical grid lines between cells plus global range backdrops.
    pub(super) fn paint_main_canvas(
        &mut self,
        global_events: &[A::RangeEvent],
        entity_count: usize,
        layers: &mut MountedLayers,
    ) {
        let pane = self.panes.main_canvas;
        self.surface.clear(pane);
        layers.clear_main_canvas();

        if self.state.settings.has_vertical_line {
            let count = self.state.window.header_cell_slots().saturating_sub(1);
            for index in 0..count {
                let line = self.surface.create_element(ElementKind::MainGridLine);
                self.place_main_grid_line(line, index, entity_count);
                self.surface.append(pane, line);
                layers.main_grid_lines.push(line);
            }
        }

        let window = self.state.window;
        for event in global_events {
            let start = datetime_to_millis(self.accessor.range_start(event));
            let end = datetime_to_millis(self.accessor.range_end(event));
            if !window.overlaps(start, end) {
                continue;
            }
            let element = self.surface.create_element(ElementKind::GlobalRangeEvent);
            self.place_global_range(element, start, end, entity_count);
            self.surface.append(pane, element);
            if let Some(render) = self.renderers.global_range_event.as_mut() {
                render(
                    &mut *self.surface,
                    event,
                    EventTarget {
                        canvas: pane,
                        container: element,
                    },
                );
            }
            layers.global_ranges.push(MountedRange {
                start,
                end,
                element,
            });
        }
    }

    pub(super) fn reposition_main_canvas(&mut self, entity_count: usize, layers: &MountedLayers) {
        for (index, line) in layers.main_grid_lines.iter().enumerate() {
            self.place_main_grid_line(*line, index, entity_count);
        }
        for range in &layers.global_ranges {
            self.place_global_range(range.element, range.start, range.end, entity_count);
        }
    }

    /// Creates one empty row container per entity; rows paint on demand.
    pub(super) fn mount_row_pool(&mut self, entity_count: usize) -> RowPool {
        let pane = self.panes.entity_list;
        self.surface.clear(pane);
        let containers: Vec<ElementId> = (0..entity_count)
            .map(|row| {
                let container = self.surface.create_element(ElementKind::EntityRow);
                self.place_row_container(container, row);
                self.surface.append(pane, container);
                container
            })
            .collect();
        RowPool::new(containers)
    }

    /// First paint of a row: label, visible events, divider.
    pub(super) fn paint_row(&mut self, entity: &A::Entity, row: &mut EntityRow, at: DateTime<Utc>) {
        let canvas = self.panes.main_canvas;
        let container = row.container;
        let window = self.state.window;
        let mapper = self.state.mapper();

        // The row may have been mounted under an older cell height.
        self.place_row_container(container, row.index);
        self.surface.clear(container);
        match self.renderers.row_label.as_mut() {
            Some(render) => render(&mut *self.surface, entity, container),
            None => self.surface.set_text(container, self.accessor.name(entity)),
        }

        row.point_events.clear();
        for event in self.accessor.point_events(entity) {
            let time = datetime_to_millis(self.accessor.point_time(event));
            if !window.contains(time) {
                continue;
            }
            let element = self.surface.create_element(ElementKind::EntityPointEvent);
            let placement = mapper.point(time, row.index);
            self.surface.set_position(element, placement.left, placement.top);
            self.surface
                .set_size(element, Some(placement.size), Some(placement.size));
            self.surface.append(canvas, element);
            if let Some(render) = self.renderers.entity_point_event.as_mut() {
                render(
                    &mut *self.surface,
                    event,
                    EventTarget {
                        canvas,
                        container: element,
                    },
                );
            }
            row.point_events.push(MountedPoint { time, element });
        }

        row.range_events.clear();
        for event in self.accessor.range_events(entity) {
            let start = datetime_to_millis(self.accessor.range_start(event));
            let end = datetime_to_millis(self.accessor.range_end(event));
            if !window.overlaps(start, end) {
                continue;
            }
            let element = self.surface.create_element(ElementKind::EntityRangeEvent);
            let placement = mapper.range(start, end, row.index);
            self.surface.set_position(element, placement.left, placement.top);
            self.surface
                .set_size(element, Some(placement.width), Some(placement.height));
            self.surface.append(canvas, element);
            if let Some(render) = self.renderers.entity_range_event.as_mut() {
                render(
                    &mut *self.surface,
                    event,
                    EventTarget {
                        canvas,
                        container: element,
                    },
                );
            }
            row.range_events.push(MountedRange {
                start,
                end,
                element,
            });
        }

        row.divider = None;
        if self.state.settings.has_horizontal_line {
            let divider = self.surface.create_element(ElementKind::RowDivider);
            self.place_divider(divider, row.index);
            self.surface.append(canvas, divider);
            row.divider = Some(divider);
        }

        row.last_render = Some(self.stamp(at));
        trace!(
            row = row.index,
            points = row.point_events.len(),
            ranges = row.range_events.len(),
            "row first paint"
        );
    }

    /// Moves the row's existing elements to the current geometry.
    pub(super) fn reposition_row(&mut self, row: &mut EntityRow, at: DateTime<Utc>) {
        let mapper = self.state.mapper();

        self.place_row_container(row.container, row.index);
        for point in &row.point_events {
            let placement = mapper.point(point.time, row.index);
            self.surface
                .set_position(point.element, placement.left, placement.top);
            self.surface
                .set_size(point.element, Some(placement.size), Some(placement.size));
        }
        for range in &row.range_events {
            let placement = mapper.range(range.start, range.end, row.index);
            self.surface
                .set_position(range.element, placement.left, placement.top);
            self.surface.set_size(
                range.element,
                Some(placement.width),
                Some(placement.height),
            );
        }
        if let Some(divider) = row.divider {
            self.place_divider(divider, row.index);
        }
        row.last_render = Some(self.stamp(at));
    }

    fn stamp(&self, at: DateTime<Utc>) -> RenderStamp {
        RenderStamp {
            epoch: self.state.geometry_epoch,
            at,
        }
    }

    fn side_grid_line_count(&self) -> usize {
        let cell_width = self.state.geometry.cell_width;
        let width = self.state.canvas_size(0).width + self.state.settings.scroll_width;
        (width / cell_width).ceil().max(0.0) as usize
    }

    fn place_side_grid_line(&mut self, line: ElementId, index: usize) {
        let cell_width = self.state.geometry.cell_width;
        self.surface
            .set_position(line, (index + 1) as f64 * cell_width, 0.0);
        self.surface
            .set_size(line, None, Some(self.state.settings.side_canvas_height));
    }

    fn place_side_point(&mut self, element: ElementId, time: i64) {
        let settings = &self.state.settings;
        let placement = self.state.mapper().side_point(
            time,
            settings.side_canvas_height,
            settings.side_canvas_content_height(),
        );
        self.surface.set_position(element, placement.left, placement.top);
        self.surface
            .set_size(element, Some(placement.size), Some(placement.size));
    }

    fn place_main_grid_line(&mut self, line: ElementId, index: usize, entity_count: usize) {
        let canvas = self.state.canvas_size(entity_count);
        let cell_width = self.state.geometry.cell_width;
        self.surface
            .set_position(line, (index + 1) as f64 * cell_width, 0.0);
        self.surface.set_size(line, None, Some(canvas.height));
    }

    fn place_global_range(&mut self, element: ElementId, start: i64, end: i64, entity_count: usize) {
        let canvas = self.state.canvas_size(entity_count);
        let placement = self.state.mapper().global_range(start, end, canvas.height);
        self.surface.set_position(element, placement.left, placement.top);
        self.surface
            .set_size(element, Some(placement.width), Some(placement.height));
    }

    fn place_row_container(&mut self, container: ElementId, row: usize) {
        let geometry = self.state.geometry;
        self.surface.set_position(container, 0.0, geometry.row_top(row));
        self.surface
            .set_size(container, None, Some(geometry.cell_height));
    }

    fn place_divider(&mut self, divider: ElementId, row: usize) {
        let geometry = self.state.geometry;
        let width = self.state.canvas_size(0).width;
        self.surface.set_position(divider, 0.0, geometry.row_top(row));
        self.surface.set_size(divider, Some(width), None);
    }
}
