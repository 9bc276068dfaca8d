#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Day classification engine.
//!
//! Reduces a year of location samples to one presence verdict per calendar
//! day ([`aggregator`]) and tallies the verdicts into a [`YearReport`]
//! ([`report`]). Both steps are pure with respect to I/O; the boundary store
//! is consulted read-only.
//!
//! [`YearReport`]: state_days_classify_models::YearReport

pub mod aggregator;
pub mod report;

pub use aggregator::classify;
pub use report::build_report;

use chrono::{Datelike as _, NaiveDate};
use thiserror::Error;

/// Errors that can occur during day classification.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Boundary lookup failed (typically an unknown target state).
    #[error("Boundary error: {0}")]
    Boundary(#[from] state_days_boundary::BoundaryError),

    /// The year falls outside the representable calendar range.
    #[error("Year {year} is outside the supported calendar range")]
    UnsupportedYear {
        /// The requested year.
        year: i32,
    },
}

/// Errors that can occur while building a year report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The day-record sequence does not cover the year exactly. This is a
    /// defect signal from the aggregator, not a user-recoverable condition.
    #[error("Incomplete year {year}: expected {expected} day records, got {actual}")]
    IncompleteYear {
        /// The year being reported.
        year: i32,
        /// Day count the calendar requires.
        expected: u32,
        /// Day records actually supplied.
        actual: usize,
    },

    /// The year falls outside the representable calendar range.
    #[error("Year {year} is outside the supported calendar range")]
    UnsupportedYear {
        /// The requested year.
        year: i32,
    },
}

/// Number of calendar days in `year` (365, or 366 in leap years).
///
/// Returns `None` for years outside chrono's representable range.
#[must_use]
pub fn days_in_year(year: i32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, 12, 31).map(NaiveDate::ordinal)
}
