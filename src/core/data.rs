use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Typed adapter between host domain objects and the chart.
///
/// Hosts whose entities and events use their own field names implement this
/// trait instead of reshaping their data. [`StandardAccessor`] covers the
/// built-in [`Entity`]/[`PointEvent`]/[`RangeEvent`] shapes.
pub trait EntityAccessor {
    type Entity;
    type PointEvent;
    type RangeEvent;

    fn name<'a>(&self, entity: &'a Self::Entity) -> &'a str;
    fn point_events<'a>(&self, entity: &'a Self::Entity) -> &'a [Self::PointEvent];
    fn range_events<'a>(&self, entity: &'a Self::Entity) -> &'a [Self::RangeEvent];
    fn point_time(&self, event: &Self::PointEvent) -> DateTime<Utc>;
    fn range_start(&self, event: &Self::RangeEvent) -> DateTime<Utc>;
    fn range_end(&self, event: &Self::RangeEvent) -> DateTime<Utc>;
}

/// Instant event with caller-defined payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointEvent<T = ()> {
    pub time: DateTime<Utc>,
    pub payload: T,
}

impl PointEvent<()> {
    #[must_use]
    pub fn at(time: DateTime<Utc>) -> Self {
        Self { time, payload: () }
    }
}

impl<T> PointEvent<T> {
    #[must_use]
    pub fn new(time: DateTime<Utc>, payload: T) -> Self {
        Self { time, payload }
    }
}

/// Interval event with caller-defined payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeEvent<T = ()> {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub payload: T,
}

impl RangeEvent<()> {
    #[must_use]
    pub fn between(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time,
            payload: (),
        }
    }
}

impl<T> RangeEvent<T> {
    #[must_use]
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>, payload: T) -> Self {
        Self {
            start_time,
            end_time,
            payload,
        }
    }
}

/// One chart row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity<P = (), R = ()> {
    pub name: String,
    #[serde(default)]
    pub point_events: Vec<PointEvent<P>>,
    #[serde(default)]
    pub range_events: Vec<RangeEvent<R>>,
}

impl<P, R> Entity<P, R> {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            point_events: Vec::new(),
            range_events: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_point_event(mut self, event: PointEvent<P>) -> Self {
        self.point_events.push(event);
        self
    }

    #[must_use]
    pub fn with_range_event(mut self, event: RangeEvent<R>) -> Self {
        self.range_events.push(event);
        self
    }
}

/// Accessor for the built-in data shapes.
pub struct StandardAccessor<P = (), R = ()> {
    _payloads: PhantomData<fn() -> (P, R)>,
}

impl<P, R> StandardAccessor<P, R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _payloads: PhantomData,
        }
    }
}

impl<P, R> Default for StandardAccessor<P, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, R> fmt::Debug for StandardAccessor<P, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StandardAccessor")
    }
}

impl<P, R> EntityAccessor for StandardAccessor<P, R> {
    type Entity = Entity<P, R>;
    type PointEvent = PointEvent<P>;
    type RangeEvent = RangeEvent<R>;

    fn name<'a>(&self, entity: &'a Self::Entity) -> &'a str {
        &entity.name
    }

    fn point_events<'a>(&self, entity: &'a Self::Entity) -> &'a [Self::PointEvent] {
        &entity.point_events
    }

    fn range_events<'a>(&self, entity: &'a Self::Entity) -> &'a [Self::RangeEvent] {
        &entity.range_events
    }

    fn point_time(&self, event: &Self::PointEvent) -> DateTime<Utc> {
        event.time
    }

    fn range_start(&self, event: &Self::RangeEvent) -> DateTime<Utc> {
        event.start_time
    }

    fn range_end(&self, event: &Self::RangeEvent) -> DateTime<Utc> {
        event.end_time
    }
}

/// Full chart dataset. Entity order defines row order.
pub struct ChartData<A: EntityAccessor> {
    pub entities: Vec<A::Entity>,
    pub side_point_events: Vec<A::PointEvent>,
    pub global_range_events: Vec<A::RangeEvent>,
}

impl<A: EntityAccessor> ChartData<A> {
    #[must_use]
    pub fn new(entities: Vec<A::Entity>) -> Self {
        Self {
            entities,
            side_point_events: Vec::new(),
            global_range_events: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_side_point_events(mut self, events: Vec<A::PointEvent>) -> Self {
        self.side_point_events = events;
        self
    }

    #[must_use]
    pub fn with_global_range_events(mut self, events: Vec<A::RangeEvent>) -> Self {
        self.global_range_events = events;
        self
    }
}

impl<A: EntityAccessor> Default for ChartData<A> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<A: EntityAccessor> fmt::Debug for ChartData<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartData")
            .field("entities", &self.entities.len())
            .field("side_point_events", &self.side_point_events.len())
            .field("global_range_events", &self.global_range_events.len())
            .finish()
    }
}
