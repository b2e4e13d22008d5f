use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};

use crate::core::time_units::millis_to_datetime;

/// Wall-clock source used for zoom acceleration timing.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic clock advanced by hand. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Rc<Cell<i64>>,
}

impl ManualClock {
    #[must_use]
    pub fn starting_at(time: DateTime<Utc>) -> Self {
        Self {
            millis: Rc::new(Cell::new(time.timestamp_millis())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.millis.set(self.millis.get() + by.num_milliseconds());
    }

    pub fn advance_millis(&self, millis: i64) {
        self.millis.set(self.millis.get() + millis);
    }

    pub fn set(&self, time: DateTime<Utc>) {
        self.millis.set(time.timestamp_millis());
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        millis_to_datetime(self.millis.get())
    }
}
