//! Per-day sample aggregation.
//!
//! Consumes the sample sequence once, groups samples by calendar date in the
//! caller's reference time zone, and reduces each date to a single presence
//! verdict: a single confirmed sighting inside the target state is sufficient
//! evidence for that day, regardless of how many samples fell outside.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, TimeZone};
use state_days_boundary::BoundaryStore;
use state_days_classify_models::{DayRecord, LocationSample, Verdict};

use crate::ClassifyError;

/// Classifies every calendar day of `year` against the target state.
///
/// Returns one [`DayRecord`] per date from Jan 1 to Dec 31 in ascending
/// order with no gaps. Sample dates are derived via `time_zone`. Input may
/// be unordered; samples outside `year` are ignored; samples with
/// out-of-range coordinates are skipped (logged) and do not count as data
/// for their date.
///
/// # Errors
///
/// Returns [`ClassifyError::Boundary`] if `state_name` is not in the store
/// (surfaced before any sample is consumed) and
/// [`ClassifyError::UnsupportedYear`] if `year` is outside the calendar
/// range.
pub fn classify<Tz: TimeZone>(
    samples: impl IntoIterator<Item = LocationSample>,
    store: &BoundaryStore,
    state_name: &str,
    year: i32,
    time_zone: &Tz,
) -> Result<Vec<DayRecord>, ClassifyError> {
    let state = store.state(state_name)?;

    let first = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or(ClassifyError::UnsupportedYear { year })?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or(ClassifyError::UnsupportedYear { year })?;

    // date -> whether any sample that day fell inside the target state
    let mut sighted: BTreeMap<NaiveDate, bool> = BTreeMap::new();

    for sample in samples {
        if !sample.point.in_valid_range() {
            log::warn!(
                "Skipping sample at {} with out-of-range coordinates ({}, {})",
                sample.timestamp,
                sample.point.lat,
                sample.point.lon
            );
            continue;
        }

        let date = sample.timestamp.with_timezone(time_zone).date_naive();
        if date.year() != year {
            continue;
        }

        let inside = sighted.entry(date).or_insert(false);
        if !*inside && state.contains(sample.point) {
            *inside = true;
        }
    }

    let mut records = Vec::with_capacity(last.ordinal() as usize);
    let mut cursor = Some(first);
    while let Some(date) = cursor {
        if date > last {
            break;
        }
        let verdict = match sighted.get(&date) {
            Some(true) => Verdict::InState,
            Some(false) => Verdict::NotInState,
            None => Verdict::NoData,
        };
        records.push(DayRecord::new(date, verdict));
        cursor = date.succ_opt();
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};
    use state_days_geometry::Point;

    use super::*;

    const NY_GEOJSON: &str = r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"NAME":"New York"},"geometry":{"type":"Polygon","coordinates":[[[-80.0,40.0],[-80.0,45.0],[-71.0,45.0],[-71.0,40.0],[-80.0,40.0]]]}}]}"#;

    const INSIDE: (f64, f64) = (42.5, -75.0);
    const OUTSIDE: (f64, f64) = (39.0, -75.0);

    fn ny_store() -> BoundaryStore {
        BoundaryStore::from_geojson_str(NY_GEOJSON, "NAME").unwrap()
    }

    fn sample_on(date: NaiveDate, (lat, lon): (f64, f64)) -> LocationSample {
        let timestamp = date.and_hms_opt(12, 0, 0).unwrap().and_utc();
        LocationSample::new(timestamp, Point::new(lat, lon))
    }

    fn date(year: i32, ordinal: u32) -> NaiveDate {
        NaiveDate::from_yo_opt(year, ordinal).unwrap()
    }

    fn verdicts(records: &[DayRecord]) -> (usize, usize, usize) {
        let in_state = records
            .iter()
            .filter(|r| r.verdict == Verdict::InState)
            .count();
        let not_in_state = records
            .iter()
            .filter(|r| r.verdict == Verdict::NotInState)
            .count();
        let no_data = records
            .iter()
            .filter(|r| r.verdict == Verdict::NoData)
            .count();
        (in_state, not_in_state, no_data)
    }

    #[test]
    fn covers_every_day_of_the_year_in_order() {
        let records = classify(vec![], &ny_store(), "New York", 2019, &Utc).unwrap();

        assert_eq!(records.len(), 365);
        assert_eq!(records[0].date, date(2019, 1));
        assert_eq!(records[364].date, date(2019, 365));
        for pair in records.windows(2) {
            assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
        }
        assert!(records.iter().all(|r| r.verdict == Verdict::NoData));
    }

    #[test]
    fn leap_year_covers_366_days() {
        let records = classify(vec![], &ny_store(), "New York", 2020, &Utc).unwrap();
        assert_eq!(records.len(), 366);
    }

    #[test]
    fn classifies_year_of_samples() {
        // 205 days inside, then 44 days outside, remainder without samples.
        let mut samples = Vec::new();
        for ordinal in 1..=205 {
            samples.push(sample_on(date(2019, ordinal), INSIDE));
        }
        for ordinal in 206..=249 {
            samples.push(sample_on(date(2019, ordinal), OUTSIDE));
        }

        let records = classify(samples, &ny_store(), "New York", 2019, &Utc).unwrap();

        assert_eq!(verdicts(&records), (205, 44, 116));
    }

    #[test]
    fn any_positive_sighting_wins_the_day() {
        let day = date(2019, 100);
        let samples = vec![
            sample_on(day, OUTSIDE),
            sample_on(day, INSIDE),
            sample_on(day, OUTSIDE),
        ];

        let records = classify(samples, &ny_store(), "New York", 2019, &Utc).unwrap();

        assert_eq!(records[99].verdict, Verdict::InState);
    }

    #[test]
    fn tolerates_unordered_input() {
        let mut samples = vec![
            sample_on(date(2019, 300), INSIDE),
            sample_on(date(2019, 2), OUTSIDE),
            sample_on(date(2019, 150), INSIDE),
        ];
        let sorted = classify(samples.clone(), &ny_store(), "New York", 2019, &Utc).unwrap();
        samples.reverse();
        let reversed = classify(samples, &ny_store(), "New York", 2019, &Utc).unwrap();

        assert_eq!(sorted, reversed);
        assert_eq!(sorted[299].verdict, Verdict::InState);
        assert_eq!(sorted[1].verdict, Verdict::NotInState);
    }

    #[test]
    fn classify_is_idempotent() {
        let samples = vec![
            sample_on(date(2019, 10), INSIDE),
            sample_on(date(2019, 20), OUTSIDE),
        ];
        let first = classify(samples.clone(), &ny_store(), "New York", 2019, &Utc).unwrap();
        let second = classify(samples, &ny_store(), "New York", 2019, &Utc).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn samples_outside_year_are_ignored() {
        let samples = vec![
            sample_on(NaiveDate::from_ymd_opt(2018, 12, 31).unwrap(), INSIDE),
            sample_on(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), INSIDE),
        ];

        let records = classify(samples, &ny_store(), "New York", 2019, &Utc).unwrap();

        assert!(records.iter().all(|r| r.verdict == Verdict::NoData));
    }

    #[test]
    fn out_of_range_coordinates_do_not_count_as_data() {
        let day = date(2019, 50);
        let invalid_only = vec![sample_on(day, (95.0, -75.0))];
        let records = classify(invalid_only, &ny_store(), "New York", 2019, &Utc).unwrap();
        assert_eq!(records[49].verdict, Verdict::NoData);

        // An invalid sample must never change a date's verdict relative to
        // the same run without it.
        let mixed = vec![sample_on(day, (95.0, -75.0)), sample_on(day, INSIDE)];
        let without_invalid = vec![sample_on(day, INSIDE)];
        let with = classify(mixed, &ny_store(), "New York", 2019, &Utc).unwrap();
        let without = classify(without_invalid, &ny_store(), "New York", 2019, &Utc).unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn reference_time_zone_shifts_sample_dates() {
        // 02:00 UTC on Jan 1 is still Dec 31 in UTC-05:00.
        let timestamp = NaiveDate::from_ymd_opt(2019, 1, 1)
            .unwrap()
            .and_hms_opt(2, 0, 0)
            .unwrap()
            .and_utc();
        let samples = vec![LocationSample::new(
            timestamp,
            Point::new(INSIDE.0, INSIDE.1),
        )];

        let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
        let records = classify(samples.clone(), &ny_store(), "New York", 2019, &eastern).unwrap();
        assert_eq!(records[0].verdict, Verdict::NoData);

        let utc_records = classify(samples, &ny_store(), "New York", 2019, &Utc).unwrap();
        assert_eq!(utc_records[0].verdict, Verdict::InState);
    }

    #[test]
    fn unknown_state_surfaces_immediately() {
        let err = classify(vec![], &ny_store(), "New Jersey", 2019, &Utc).unwrap_err();
        assert!(matches!(err, ClassifyError::Boundary(_)));
    }
}
