//! Row virtualization state machine.
//!
//! A pool of row containers is bound 1:1 to entity indices. Rows paint
//! lazily the first time they intersect the viewport and repaint on the next
//! intersection once a zoom or resize made their geometry stale:
//!
//! ```text
//! Unmounted --visible--> Painted --zoom/resize--> Stale --visible--> Painted
//! ```
//!
//! Leaving the viewport only drops a row from the intersecting set; its
//! elements stay mounted.

use std::ops::Range;

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::render::ElementId;

/// When a row was last painted, in geometry epochs and wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStamp {
    pub epoch: u64,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountedPoint {
    pub time: i64,
    pub element: ElementId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountedRange {
    pub start: i64,
    pub end: i64,
    pub element: ElementId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowPhase {
    Unmounted,
    Painted,
    Stale,
}

/// Work the engine must do for a row after a visibility change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowAction {
    FirstPaint,
    Repaint,
    Keep,
    Hide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityChange {
    pub row: usize,
    pub is_intersecting: bool,
}

impl VisibilityChange {
    #[must_use]
    pub fn entered(row: usize) -> Self {
        Self {
            row,
            is_intersecting: true,
        }
    }

    #[must_use]
    pub fn left(row: usize) -> Self {
        Self {
            row,
            is_intersecting: false,
        }
    }
}

/// Rendering cache of one entity row.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRow {
    pub index: usize,
    pub container: ElementId,
    pub divider: Option<ElementId>,
    pub last_render: Option<RenderStamp>,
    pub point_events: SmallVec<[MountedPoint; 4]>,
    pub range_events: SmallVec<[MountedRange; 4]>,
}

impl EntityRow {
    #[must_use]
    pub fn new(index: usize, container: ElementId) -> Self {
        Self {
            index,
            container,
            divider: None,
            last_render: None,
            point_events: SmallVec::new(),
            range_events: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn phase(&self, geometry_epoch: u64) -> RowPhase {
        match self.last_render {
            None => RowPhase::Unmounted,
            Some(stamp) if stamp.epoch < geometry_epoch => RowPhase::Stale,
            Some(_) => RowPhase::Painted,
        }
    }

    /// Forgets mounted canvas elements; the container handle survives.
    pub fn reset_paint(&mut self) {
        self.divider = None;
        self.last_render = None;
        self.point_events.clear();
        self.range_events.clear();
    }
}

/// Fixed pool of row containers plus the currently intersecting subset.
#[derive(Debug, Clone, Default)]
pub struct RowPool {
    rows: Vec<EntityRow>,
    intersecting: IndexSet<usize>,
}

impl RowPool {
    /// Binds `containers[i]` to entity index `i`.
    #[must_use]
    pub fn new(containers: Vec<ElementId>) -> Self {
        Self {
            rows: containers
                .into_iter()
                .enumerate()
                .map(|(index, container)| EntityRow::new(index, container))
                .collect(),
            intersecting: IndexSet::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&EntityRow> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut EntityRow> {
        self.rows.get_mut(index)
    }

    #[must_use]
    pub fn rows(&self) -> &[EntityRow] {
        &self.rows
    }

    /// Row index owning `container`, if any.
    #[must_use]
    pub fn index_of_container(&self, container: ElementId) -> Option<usize> {
        self.rows.iter().position(|row| row.container == container)
    }

    /// Intersecting rows in the order they became visible.
    #[must_use]
    pub fn intersecting(&self) -> Vec<usize> {
        self.intersecting.iter().copied().collect()
    }

    #[must_use]
    pub fn intersecting_count(&self) -> usize {
        self.intersecting.len()
    }

    #[must_use]
    pub fn is_intersecting(&self, index: usize) -> bool {
        self.intersecting.contains(&index)
    }

    /// Applies one observer notification and returns the work to perform.
    ///
    /// Returns `None` for indices outside the pool.
    pub fn apply_visibility(
        &mut self,
        change: VisibilityChange,
        geometry_epoch: u64,
    ) -> Option<RowAction> {
        let row = self.rows.get(change.row)?;
        if !change.is_intersecting {
            self.intersecting.shift_remove(&change.row);
            return Some(RowAction::Hide);
        }

        let action = match row.phase(geometry_epoch) {
            RowPhase::Unmounted => RowAction::FirstPaint,
            RowPhase::Stale => RowAction::Repaint,
            RowPhase::Painted => RowAction::Keep,
        };
        self.intersecting.insert(change.row);
        Some(action)
    }

    /// Notifications needed to move the intersecting set to `visible`.
    #[must_use]
    pub fn visibility_changes(&self, visible: Range<usize>) -> Vec<VisibilityChange> {
        let mut changes: Vec<VisibilityChange> = self
            .intersecting
            .iter()
            .copied()
            .filter(|row| !visible.contains(row))
            .map(VisibilityChange::left)
            .collect();
        changes.extend(
            visible
                .filter(|row| *row < self.rows.len() && !self.intersecting.contains(row))
                .map(VisibilityChange::entered),
        );
        changes
    }

    /// Marks every row unpainted and empties the intersecting set.
    pub fn reset_paint_state(&mut self) {
        for row in &mut self.rows {
            row.reset_paint();
        }
        self.intersecting.clear();
    }

    #[must_use]
    pub fn painted_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.last_render.is_some())
            .count()
    }
}

/// Rows overlapping a vertical viewport `[scroll_top, scroll_top + viewport_height)`.
#[must_use]
pub fn visible_row_range(
    scroll_top: f64,
    viewport_height: f64,
    cell_height: f64,
    row_count: usize,
) -> Range<usize> {
    if row_count == 0
        || !cell_height.is_finite()
        || cell_height <= 0.0
        || !viewport_height.is_finite()
        || viewport_height <= 0.0
    {
        return 0..0;
    }
    let top = scroll_top.max(0.0);
    let first = (top / cell_height).floor() as usize;
    let last = ((top + viewport_height) / cell_height).ceil() as usize;
    first.min(row_count)..last.min(row_count)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{RenderStamp, RowAction, RowPhase, RowPool, VisibilityChange, visible_row_range};
    use crate::render::ElementId;

    fn pool(len: u64) -> RowPool {
        RowPool::new((0..len).map(ElementId::from_raw).collect())
    }

    #[test]
    fn first_visibility_requests_first_paint_then_keep() {
        let mut pool = pool(3);
        assert_eq!(
            pool.apply_visibility(VisibilityChange::entered(1), 0),
            Some(RowAction::FirstPaint)
        );
        pool.row_mut(1).expect("row").last_render = Some(RenderStamp {
            epoch: 0,
            at: Utc.timestamp_opt(0, 0).single().expect("time"),
        });
        assert_eq!(
            pool.apply_visibility(VisibilityChange::entered(1), 0),
            Some(RowAction::Keep)
        );
        assert_eq!(pool.intersecting(), vec![1]);
    }

    #[test]
    fn painted_row_becomes_stale_after_epoch_bump() {
        let mut pool = pool(2);
        pool.row_mut(0).expect("row").last_render = Some(RenderStamp {
            epoch: 3,
            at: Utc.timestamp_opt(0, 0).single().expect("time"),
        });
        assert_eq!(pool.row(0).expect("row").phase(3), RowPhase::Painted);
        assert_eq!(pool.row(0).expect("row").phase(4), RowPhase::Stale);
        assert_eq!(
            pool.apply_visibility(VisibilityChange::entered(0), 4),
            Some(RowAction::Repaint)
        );
    }

    #[test]
    fn leaving_keeps_row_mounted() {
        let mut pool = pool(2);
        pool.apply_visibility(VisibilityChange::entered(0), 0);
        assert_eq!(
            pool.apply_visibility(VisibilityChange::left(0), 0),
            Some(RowAction::Hide)
        );
        assert!(pool.intersecting().is_empty());
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn out_of_pool_index_is_ignored() {
        let mut pool = pool(1);
        assert_eq!(pool.apply_visibility(VisibilityChange::entered(5), 0), None);
    }

    #[test]
    fn visible_range_counts_partially_visible_rows() {
        assert_eq!(visible_row_range(0.0, 100.0, 40.0, 10), 0..3);
        assert_eq!(visible_row_range(50.0, 100.0, 40.0, 10), 1..4);
        assert_eq!(visible_row_range(0.0, 1000.0, 40.0, 5), 0..5);
        assert_eq!(visible_row_range(0.0, 0.0, 40.0, 5), 0..0);
    }

    #[test]
    fn visibility_changes_diff_against_current_set() {
        let mut pool = pool(6);
        pool.apply_visibility(VisibilityChange::entered(0), 0);
        pool.apply_visibility(VisibilityChange::entered(1), 0);

        let changes = pool.visibility_changes(1..3);
        assert_eq!(
            changes,
            vec![VisibilityChange::left(0), VisibilityChange::entered(2)]
        );
    }
}
