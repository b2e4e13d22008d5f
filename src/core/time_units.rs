use chrono::{DateTime, Utc};

const MILLIS_PER_MINUTE: f64 = 60.0 * 1000.0;

/// Converts a millisecond duration into minutes.
#[must_use]
pub fn to_minutes(millis: i64) -> f64 {
    millis as f64 / MILLIS_PER_MINUTE
}

/// Converts minutes into a millisecond duration.
#[must_use]
pub fn to_millis(minutes: f64) -> f64 {
    minutes * MILLIS_PER_MINUTE
}

/// Unix epoch milliseconds of a UTC timestamp.
#[must_use]
pub fn datetime_to_millis(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

/// Inverse of [`datetime_to_millis`]. Out-of-range values saturate to the epoch.
#[must_use]
pub fn millis_to_datetime(millis: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default()
}
