//! Flat location history files.
//!
//! Covers both generations of the flat export: `Location History.json`
//! (legacy, `timestampMs`) and `Records.json` (newer, RFC 3339 `timestamp`).
//! Entries with missing or unparseable fields are skipped; one bad GPS fix
//! must not invalidate a year of data.

use serde::Deserialize;
use state_days_classify_models::LocationSample;
use state_days_geometry::Point;

use crate::parsing::{coordinate_from_e7, resolve_timestamp};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlatHistory {
    #[serde(default)]
    locations: Vec<FlatLocation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlatLocation {
    #[serde(default)]
    timestamp_ms: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    latitude_e7: Option<i64>,
    #[serde(default)]
    longitude_e7: Option<i64>,
}

impl FlatLocation {
    fn to_sample(&self) -> Option<LocationSample> {
        let timestamp = resolve_timestamp(self.timestamp_ms.as_deref(), self.timestamp.as_deref())?;
        let point = Point::new(
            coordinate_from_e7(self.latitude_e7?),
            coordinate_from_e7(self.longitude_e7?),
        );
        Some(LocationSample::new(timestamp, point))
    }
}

/// Parses a flat location history document into samples.
///
/// # Errors
///
/// Returns a `serde_json::Error` if the document as a whole is not valid
/// JSON of the expected shape. Individually incomplete entries are skipped
/// and logged, not fatal.
pub fn parse_flat_history(data: &str) -> Result<Vec<LocationSample>, serde_json::Error> {
    let history: FlatHistory = serde_json::from_str(data)?;
    let total = history.locations.len();

    let samples: Vec<LocationSample> = history
        .locations
        .iter()
        .filter_map(FlatLocation::to_sample)
        .collect();

    let skipped = total - samples.len();
    if skipped > 0 {
        log::warn!("Skipped {skipped} of {total} flat history records with missing fields");
    }

    Ok(samples)
}
