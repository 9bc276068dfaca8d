//! Report rendering.
//!
//! Text summary to stdout plus an optional per-day CSV detail export in a
//! pivot layout: one row per day-of-month, one column per month, cell =
//! verdict code.

use std::path::Path;

use chrono::Datelike as _;
use state_days_classify_models::{DayRecord, YearReport};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Renders the year summary. No-data days get their own line rather than
/// being folded into "not working".
#[must_use]
pub fn render_report(report: &YearReport) -> String {
    format!(
        "Report for year {year} in {state}:\n\
         \tDays Working in {state}: {in_state}\n\
         \tDays Not Working in {state}: {not_in_state}\n\
         \tDays with No Location Data: {no_data}\n",
        year = report.year,
        state = report.state,
        in_state = report.days_in_state,
        not_in_state = report.days_not_in_state,
        no_data = report.days_no_data,
    )
}

/// Lays day records out as a 31-row by 12-month grid of verdict codes.
///
/// Cells for dates that do not exist (Feb 30 and friends) stay empty, the
/// same as no-data days.
fn detail_grid(records: &[DayRecord]) -> [[&'static str; 12]; 31] {
    let mut grid = [[""; 12]; 31];
    for record in records {
        let month = record.date.month0() as usize;
        let day = record.date.day0() as usize;
        grid[day][month] = record.verdict.code();
    }
    grid
}

/// Writes the per-day detail CSV.
///
/// # Errors
///
/// Returns a `csv::Error` if the file cannot be created or written.
pub fn write_csv(path: &Path, records: &[DayRecord]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["Day".to_string()];
    header.extend(MONTHS.iter().map(ToString::to_string));
    writer.write_record(&header)?;

    for (day_index, row) in detail_grid(records).iter().enumerate() {
        let mut cells = vec![(day_index + 1).to_string()];
        cells.extend(row.iter().map(ToString::to_string));
        writer.write_record(&cells)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use state_days_classify_models::Verdict;

    use super::*;

    #[test]
    fn renders_reference_report_text() {
        let report = YearReport {
            state: "New York".to_string(),
            year: 2019,
            days_in_state: 205,
            days_not_in_state: 44,
            days_no_data: 116,
        };

        assert_eq!(
            render_report(&report),
            "Report for year 2019 in New York:\n\
             \tDays Working in New York: 205\n\
             \tDays Not Working in New York: 44\n\
             \tDays with No Location Data: 116\n"
        );
    }

    #[test]
    fn grid_places_verdicts_by_day_and_month() {
        let records = vec![
            DayRecord::new(
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                Verdict::InState,
            ),
            DayRecord::new(
                NaiveDate::from_ymd_opt(2020, 2, 29).unwrap(),
                Verdict::NotInState,
            ),
            DayRecord::new(
                NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
                Verdict::NoData,
            ),
        ];

        let grid = detail_grid(&records);

        assert_eq!(grid[0][0], "Y");
        assert_eq!(grid[28][1], "N");
        assert_eq!(grid[30][11], "");
        assert_eq!(grid[15][5], "");
    }
}
