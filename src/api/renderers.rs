use std::fmt;

use chrono::{DateTime, Utc};

use crate::core::EntityAccessor;
use crate::render::{ElementId, Surface};

/// Elements handed to an event renderer: the canvas the event lives on and
/// the positioned container the renderer fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTarget {
    pub canvas: ElementId,
    pub container: ElementId,
}

pub type HeaderCellRenderer<S> = Box<dyn FnMut(&mut S, DateTime<Utc>, ElementId)>;
pub type PaneRenderer<S> = Box<dyn FnMut(&mut S, ElementId)>;
pub type RowLabelRenderer<S, A> =
    Box<dyn FnMut(&mut S, &<A as EntityAccessor>::Entity, ElementId)>;
pub type PointEventRenderer<S, A> =
    Box<dyn FnMut(&mut S, &<A as EntityAccessor>::PointEvent, EventTarget)>;
pub type RangeEventRenderer<S, A> =
    Box<dyn FnMut(&mut S, &<A as EntityAccessor>::RangeEvent, EventTarget)>;

/// Host render callbacks.
///
/// Title, header cell and row label callbacks fall back to plain text when
/// unset. Event callbacks have no fallback: without one, the event container
/// is still positioned but stays empty.
pub struct ChartRenderers<S: Surface, A: EntityAccessor> {
    pub main_title: Option<PaneRenderer<S>>,
    pub column_title: Option<PaneRenderer<S>>,
    pub table_column: Option<PaneRenderer<S>>,
    pub header_cell: Option<HeaderCellRenderer<S>>,
    pub row_label: Option<RowLabelRenderer<S, A>>,
    pub side_point_event: Option<PointEventRenderer<S, A>>,
    pub entity_point_event: Option<PointEventRenderer<S, A>>,
    pub entity_range_event: Option<RangeEventRenderer<S, A>>,
    pub global_range_event: Option<RangeEventRenderer<S, A>>,
}

impl<S: Surface, A: EntityAccessor> Default for ChartRenderers<S, A> {
    fn default() -> Self {
        Self {
            main_title: None,
            column_title: None,
            table_column: None,
            header_cell: None,
            row_label: None,
            side_point_event: None,
            entity_point_event: None,
            entity_range_event: None,
            global_range_event: None,
        }
    }
}

impl<S: Surface, A: EntityAccessor> fmt::Debug for ChartRenderers<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartRenderers")
            .field("main_title", &self.main_title.is_some())
            .field("column_title", &self.column_title.is_some())
            .field("table_column", &self.table_column.is_some())
            .field("header_cell", &self.header_cell.is_some())
            .field("row_label", &self.row_label.is_some())
            .field("side_point_event", &self.side_point_event.is_some())
            .field("entity_point_event", &self.entity_point_event.is_some())
            .field("entity_range_event", &self.entity_range_event.is_some())
            .field("global_range_event", &self.global_range_event.is_some())
            .finish()
    }
}

impl<S: Surface, A: EntityAccessor> ChartRenderers<S, A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_main_title(mut self, render: impl FnMut(&mut S, ElementId) + 'static) -> Self {
        self.main_title = Some(Box::new(render));
        self
    }

    #[must_use]
    pub fn with_column_title(mut self, render: impl FnMut(&mut S, ElementId) + 'static) -> Self {
        self.column_title = Some(Box::new(render));
        self
    }

    #[must_use]
    pub fn with_table_column(mut self, render: impl FnMut(&mut S, ElementId) + 'static) -> Self {
        self.table_column = Some(Box::new(render));
        self
    }

    #[must_use]
    pub fn with_header_cell(
        mut self,
        render: impl FnMut(&mut S, DateTime<Utc>, ElementId) + 'static,
    ) -> Self {
        self.header_cell = Some(Box::new(render));
        self
    }

    #[must_use]
    pub fn with_row_label(
        mut self,
        render: impl FnMut(&mut S, &A::Entity, ElementId) + 'static,
    ) -> Self {
        self.row_label = Some(Box::new(render));
        self
    }

    #[must_use]
    pub fn with_side_point_event(
        mut self,
        render: impl FnMut(&mut S, &A::PointEvent, EventTarget) + 'static,
    ) -> Self {
        self.side_point_event = Some(Box::new(render));
        self
    }

    #[must_use]
    pub fn with_entity_point_event(
        mut self,
        render: impl FnMut(&mut S, &A::PointEvent, EventTarget) + 'static,
    ) -> Self {
        self.entity_point_event = Some(Box::new(render));
        self
    }

    #[must_use]
    pub fn with_entity_range_event(
        mut self,
        render: impl FnMut(&mut S, &A::RangeEvent, EventTarget) + 'static,
    ) -> Self {
        self.entity_range_event = Some(Box::new(render));
        self
    }

    #[must_use]
    pub fn with_global_range_event(
        mut self,
        render: impl FnMut(&mut S, &A::RangeEvent, EventTarget) + 'static,
    ) -> Self {
        self.global_range_event = Some(Box::new(render));
        self
    }

    /// Replaces every callback that `patch` sets.
    pub fn merge(&mut self, patch: Self) {
        let Self {
            main_title,
            column_title,
            table_column,
            header_cell,
            row_label,
            side_point_event,
            entity_point_event,
            entity_range_event,
            global_range_event,
        } = patch;
        if main_title.is_some() {
            self.main_title = main_title;
        }
        if column_title.is_some() {
            self.column_title = column_title;
        }
        if table_column.is_some() {
            self.table_column = table_column;
        }
        if header_cell.is_some() {
            self.header_cell = header_cell;
        }
        if row_label.is_some() {
            self.row_label = row_label;
        }
        if side_point_event.is_some() {
            self.side_point_event = side_point_event;
        }
        if entity_point_event.is_some() {
            self.entity_point_event = entity_point_event;
        }
        if entity_range_event.is_some() {
            self.entity_range_event = entity_range_event;
        }
        if global_range_event.is_some() {
            self.global_range_event = global_range_event;
        }
    }
}

/// Default header cell label.
///
/// The pattern is validated on `set_options`; a formatting failure still
/// degrades to RFC 3339 instead of panicking.
#[must_use]
pub fn format_header_time(time: DateTime<Utc>, pattern: &str) -> String {
    use std::fmt::Write as _;

    let mut label = String::new();
    if write!(label, "{}", time.format(pattern)).is_err() {
        return time.to_rfc3339();
    }
    label
}
