//! Shared parsing utilities for Takeout documents.
//!
//! Takeout exports have changed encoding over the years: old files carry
//! epoch-millisecond strings (`timestampMs`), newer ones RFC 3339 strings
//! (`timestamp`). Coordinates are integers scaled by 1e7 in both.

use chrono::{DateTime, TimeZone as _, Utc};

/// Parses an epoch-milliseconds string (legacy `timestampMs` field).
#[must_use]
pub fn parse_epoch_ms(s: &str) -> Option<DateTime<Utc>> {
    let millis = s.parse::<i64>().ok()?;
    Utc.timestamp_millis_opt(millis).single()
}

/// Parses an RFC 3339 timestamp string (newer `timestamp` field).
#[must_use]
pub fn parse_rfc3339(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Resolves a timestamp from whichever encoding the entry carries,
/// preferring the legacy field when both are present.
#[must_use]
pub fn resolve_timestamp(epoch_ms: Option<&str>, rfc3339: Option<&str>) -> Option<DateTime<Utc>> {
    epoch_ms
        .and_then(parse_epoch_ms)
        .or_else(|| rfc3339.and_then(parse_rfc3339))
}

/// Converts an E7-scaled integer coordinate to degrees.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn coordinate_from_e7(value: i64) -> f64 {
    value as f64 / 1e7
}
