use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::time_units::{datetime_to_millis, millis_to_datetime, to_millis};
use crate::error::{ChartError, ChartResult};

/// Chart time window with its padded render window.
///
/// `start..=end` is the nominal range requested by the host.
/// `render_start..=render_end` extends it by `padding_cell_count` cells on
/// each side so events just outside the nominal range still partially render.
/// Invariant: `render_start <= start <= end <= render_end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    start: i64,
    end: i64,
    render_start: i64,
    render_end: i64,
    cell_minutes: f64,
    padding_cell_count: u32,
}

impl Default for TimeWindow {
    /// Empty window at the Unix epoch: 30-minute cells, two padding cells.
    fn default() -> Self {
        let cell_minutes = 30.0;
        let padding_cell_count = 2;
        let padding = to_millis(cell_minutes * f64::from(padding_cell_count)) as i64;
        Self {
            start: 0,
            end: 0,
            render_start: -padding,
            render_end: padding,
            cell_minutes,
            padding_cell_count,
        }
    }
}

impl TimeWindow {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        cell_minutes: f64,
        padding_cell_count: u32,
    ) -> ChartResult<Self> {
        Self::from_millis(
            datetime_to_millis(start),
            datetime_to_millis(end),
            cell_minutes,
            padding_cell_count,
        )
    }

    /// Builds a window from epoch milliseconds.
    pub fn from_millis(
        start: i64,
        end: i64,
        cell_minutes: f64,
        padding_cell_count: u32,
    ) -> ChartResult<Self> {
        if !cell_minutes.is_finite() || cell_minutes <= 0.0 {
            return Err(ChartError::InvalidData(
                "cell minutes must be finite and > 0".to_owned(),
            ));
        }
        if end < start {
            return Err(ChartError::InvalidData(
                "chart end time must not precede chart start time".to_owned(),
            ));
        }

        let padding = to_millis(cell_minutes * f64::from(padding_cell_count)).round() as i64;
        Ok(Self {
            start,
            end,
            render_start: start.saturating_sub(padding),
            render_end: end.saturating_add(padding),
            cell_minutes,
            padding_cell_count,
        })
    }

    #[must_use]
    pub fn start(self) -> DateTime<Utc> {
        millis_to_datetime(self.start)
    }

    #[must_use]
    pub fn end(self) -> DateTime<Utc> {
        millis_to_datetime(self.end)
    }

    #[must_use]
    pub fn render_start(self) -> DateTime<Utc> {
        millis_to_datetime(self.render_start)
    }

    #[must_use]
    pub fn render_end(self) -> DateTime<Utc> {
        millis_to_datetime(self.render_end)
    }

    #[must_use]
    pub fn nominal_millis(self) -> (i64, i64) {
        (self.start, self.end)
    }

    #[must_use]
    pub fn render_millis(self) -> (i64, i64) {
        (self.render_start, self.render_end)
    }

    #[must_use]
    pub fn cell_minutes(self) -> f64 {
        self.cell_minutes
    }

    #[must_use]
    pub fn padding_cell_count(self) -> u32 {
        self.padding_cell_count
    }

    /// Number of cells covering the padded window. May be fractional when the
    /// window is not a whole multiple of `cell_minutes`.
    #[must_use]
    pub fn header_cell_count(self) -> f64 {
        (self.render_end - self.render_start) as f64 / to_millis(self.cell_minutes)
    }

    /// Number of header cells materialized for the padded window.
    #[must_use]
    pub fn header_cell_slots(self) -> usize {
        self.header_cell_count().ceil().max(0.0) as usize
    }

    /// Start time of the header cell at `index`.
    #[must_use]
    pub fn cell_start_millis(self, index: usize) -> i64 {
        self.render_start + (to_millis(self.cell_minutes) * index as f64).round() as i64
    }

    /// Point visibility: inclusive on both padded bounds.
    #[must_use]
    pub fn contains(self, time: i64) -> bool {
        self.render_start <= time && time <= self.render_end
    }

    /// Range visibility: any overlap with the padded window.
    #[must_use]
    pub fn overlaps(self, start: i64, end: i64) -> bool {
        start <= self.render_end && end >= self.render_start
    }

    #[must_use]
    pub fn truncate_point(self, time: i64) -> i64 {
        time.max(self.render_start)
    }

    /// Clips a range to the padded window. The result keeps `end - start`
    /// negative for inverted input ranges.
    #[must_use]
    pub fn truncate_range(self, start: i64, end: i64) -> (i64, i64) {
        (start.max(self.render_start), end.min(self.render_end))
    }
}
