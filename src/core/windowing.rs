use crate::core::time_units::datetime_to_millis;
use crate::core::{EntityAccessor, TimeWindow};

/// Times of point events inside the padded window, ascending.
#[must_use]
pub fn visible_point_times<A: EntityAccessor>(
    accessor: &A,
    events: &[A::PointEvent],
    window: TimeWindow,
) -> Vec<i64> {
    let mut times: Vec<i64> = events
        .iter()
        .map(|event| datetime_to_millis(accessor.point_time(event)))
        .filter(|time| window.contains(*time))
        .collect();
    times.sort_unstable();
    times
}

/// Start times of range events that begin inside the padded window, ascending.
#[must_use]
pub fn visible_range_starts<A: EntityAccessor>(
    accessor: &A,
    events: &[A::RangeEvent],
    window: TimeWindow,
) -> Vec<i64> {
    let mut starts: Vec<i64> = events
        .iter()
        .map(|event| datetime_to_millis(accessor.range_start(event)))
        .filter(|start| window.contains(*start))
        .collect();
    starts.sort_unstable();
    starts
}

/// Earliest visible event time of an entity, point or range.
#[must_use]
pub fn first_visible_event_time<A: EntityAccessor>(
    accessor: &A,
    entity: &A::Entity,
    window: TimeWindow,
) -> Option<i64> {
    let range_start = visible_range_starts(accessor, accessor.range_events(entity), window)
        .first()
        .copied();
    let point_time = visible_point_times(accessor, accessor.point_events(entity), window)
        .first()
        .copied();

    match (range_start, point_time) {
        (Some(range), Some(point)) => Some(range.min(point)),
        (range, point) => range.or(point),
    }
}
