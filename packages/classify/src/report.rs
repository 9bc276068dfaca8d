//! Year report building.
//!
//! Pure reduction of a day-record sequence into per-verdict totals. The
//! record count is checked against the calendar before tallying so an
//! aggregator bug that drops or duplicates days cannot produce a plausible
//! looking report.

use state_days_classify_models::{DayRecord, Verdict, YearReport};

use crate::{ReportError, days_in_year};

/// Tallies day records into a [`YearReport`] for the target state.
///
/// # Errors
///
/// Returns [`ReportError::IncompleteYear`] if `records` does not contain
/// exactly one entry per calendar day of `year`, and
/// [`ReportError::UnsupportedYear`] if `year` is outside the calendar range.
pub fn build_report(
    records: &[DayRecord],
    state: &str,
    year: i32,
) -> Result<YearReport, ReportError> {
    let expected = days_in_year(year).ok_or(ReportError::UnsupportedYear { year })?;

    if records.len() != expected as usize {
        return Err(ReportError::IncompleteYear {
            year,
            expected,
            actual: records.len(),
        });
    }

    let mut days_in_state = 0;
    let mut days_not_in_state = 0;
    let mut days_no_data = 0;

    for record in records {
        match record.verdict {
            Verdict::InState => days_in_state += 1,
            Verdict::NotInState => days_not_in_state += 1,
            Verdict::NoData => days_no_data += 1,
        }
    }

    Ok(YearReport {
        state: state.to_string(),
        year,
        days_in_state,
        days_not_in_state,
        days_no_data,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn records_for_year(year: i32, verdict: Verdict) -> Vec<DayRecord> {
        let last = NaiveDate::from_ymd_opt(year, 12, 31).unwrap();
        let mut records = Vec::new();
        let mut cursor = Some(NaiveDate::from_ymd_opt(year, 1, 1).unwrap());
        while let Some(date) = cursor {
            if date > last {
                break;
            }
            records.push(DayRecord::new(date, verdict));
            cursor = date.succ_opt();
        }
        records
    }

    #[test]
    fn tallies_verdicts() {
        let mut records = records_for_year(2019, Verdict::NoData);
        for record in records.iter_mut().take(205) {
            record.verdict = Verdict::InState;
        }
        for record in records.iter_mut().skip(205).take(44) {
            record.verdict = Verdict::NotInState;
        }

        let report = build_report(&records, "New York", 2019).unwrap();

        assert_eq!(report.state, "New York");
        assert_eq!(report.year, 2019);
        assert_eq!(report.days_in_state, 205);
        assert_eq!(report.days_not_in_state, 44);
        assert_eq!(report.days_no_data, 116);
        assert_eq!(report.days_accounted(), 365);
    }

    #[test]
    fn leap_year_report_accounts_for_366_days() {
        let records = records_for_year(2020, Verdict::NoData);
        let report = build_report(&records, "New York", 2020).unwrap();
        assert_eq!(report.days_accounted(), 366);
    }

    #[test]
    fn missing_day_is_an_incomplete_year() {
        let mut records = records_for_year(2019, Verdict::NoData);
        records.pop();

        let err = build_report(&records, "New York", 2019).unwrap_err();
        assert!(matches!(
            err,
            ReportError::IncompleteYear {
                year: 2019,
                expected: 365,
                actual: 364,
            }
        ));
    }

    #[test]
    fn wrong_year_length_is_an_incomplete_year() {
        // 365 records handed to a leap year.
        let records = records_for_year(2019, Verdict::NoData);
        let err = build_report(&records, "New York", 2020).unwrap_err();
        assert!(matches!(err, ReportError::IncompleteYear { .. }));
    }
}
