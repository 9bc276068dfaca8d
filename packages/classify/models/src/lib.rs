#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Data types for day classification and year reporting.
//!
//! These are pure values passed between the Takeout reader, the day
//! classifier, and the report renderer. None of them are mutated after
//! creation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use state_days_geometry::Point;

/// A single time-stamped position from the location history.
///
/// Ordering across samples is not guaranteed by the source; consumers must
/// tolerate unordered input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSample {
    /// Absolute instant the position was recorded.
    pub timestamp: DateTime<Utc>,
    /// Recorded position.
    pub point: Point,
}

impl LocationSample {
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, point: Point) -> Self {
        Self { timestamp, point }
    }
}

/// Presence verdict for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    /// At least one sample that day fell inside the target state.
    InState,
    /// Samples exist for the day but none fell inside the target state.
    NotInState,
    /// No usable sample exists for the day.
    NoData,
}

impl Verdict {
    /// Short code used in the CSV detail export.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InState => "Y",
            Self::NotInState => "N",
            Self::NoData => "",
        }
    }
}

/// A calendar date (in the run's reference time zone) with its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    /// Calendar date the verdict applies to.
    pub date: NaiveDate,
    /// Presence verdict for that date.
    pub verdict: Verdict,
}

impl DayRecord {
    #[must_use]
    pub const fn new(date: NaiveDate, verdict: Verdict) -> Self {
        Self { date, verdict }
    }
}

/// Per-year presence summary for one target state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearReport {
    /// Target state name.
    pub state: String,
    /// Calendar year the report covers.
    pub year: i32,
    /// Days with at least one sample inside the state.
    pub days_in_state: u32,
    /// Days with samples, none inside the state.
    pub days_not_in_state: u32,
    /// Days without any usable sample.
    pub days_no_data: u32,
}

impl YearReport {
    /// Total days accounted for; equals the year length for a valid report.
    #[must_use]
    pub const fn days_accounted(&self) -> u32 {
        self.days_in_state + self.days_not_in_state + self.days_no_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_csv_codes() {
        assert_eq!(Verdict::InState.code(), "Y");
        assert_eq!(Verdict::NotInState.code(), "N");
        assert_eq!(Verdict::NoData.code(), "");
    }

    #[test]
    fn report_days_accounted_sums_counts() {
        let report = YearReport {
            state: "New York".to_string(),
            year: 2019,
            days_in_state: 205,
            days_not_in_state: 44,
            days_no_data: 116,
        };
        assert_eq!(report.days_accounted(), 365);
    }
}
