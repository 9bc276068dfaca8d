#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Google Takeout location history reader.
//!
//! Walks a Takeout export directory and yields time-stamped location
//! samples for a requested year, from two sources:
//!
//! - the flat history file (`Location History/Records.json`, or the legacy
//!   `Location History/Location History.json`)
//! - the Semantic Location History monthly files
//!   (`Location History/Semantic Location History/<year>/<year>_<MONTH>.json`)
//!
//! The on-disk formats are loose and have changed between export
//! generations; individually malformed entries are skipped and logged rather
//! than failing the run. Sample ordering is not guaranteed.

pub mod parsing;
pub mod records;
pub mod semantic;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use state_days_classify_models::LocationSample;
use thiserror::Error;

/// Flat history file names, newest export generation first.
const FLAT_HISTORY_FILES: &[&str] = &["Records.json", "Location History.json"];

/// Errors that can occur while reading a Takeout export.
#[derive(Debug, Error)]
pub enum TakeoutError {
    /// A history file or directory could not be read.
    #[error("Failed to read location history: {0}")]
    Io(#[from] std::io::Error),

    /// A history file is not valid JSON of the expected shape.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Neither a flat history file nor a semantic directory for the year
    /// exists under the export.
    #[error("No location data found under {path} for year {year}")]
    NoLocationData {
        /// Takeout root that was searched.
        path: PathBuf,
        /// Year that was requested.
        year: i32,
    },
}

/// Reader over a Google Takeout export directory.
#[derive(Debug, Clone)]
pub struct TakeoutReader {
    root: PathBuf,
}

impl TakeoutReader {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Reads all location samples relevant to `year`, unordered.
    ///
    /// Samples are kept for the year plus one calendar day on either side;
    /// the classifier applies the reference time zone precisely, and a fixed
    /// offset can move a sample across the year boundary by at most a day.
    ///
    /// # Errors
    ///
    /// Returns [`TakeoutError::NoLocationData`] when the export has no
    /// usable source for the year, [`TakeoutError::Parse`] when a present
    /// history file is not valid JSON, and [`TakeoutError::Io`] on read
    /// failures.
    pub fn read_year(&self, year: i32) -> Result<Vec<LocationSample>, TakeoutError> {
        let history_dir = self.root.join("Location History");
        let mut samples = Vec::new();
        let mut found_source = false;

        for file_name in FLAT_HISTORY_FILES {
            let path = history_dir.join(file_name);
            if path.is_file() {
                let parsed = parse_file(&path, records::parse_flat_history)?;
                log::info!("Parsed {} samples from {}", parsed.len(), path.display());
                samples.extend(parsed);
                found_source = true;
                break;
            }
        }

        let semantic_dir = history_dir
            .join("Semantic Location History")
            .join(year.to_string());
        if semantic_dir.is_dir() {
            found_source = true;
            for path in month_files(&semantic_dir, year)? {
                let parsed = parse_file(&path, semantic::parse_semantic_month)?;
                log::info!("Parsed {} samples from {}", parsed.len(), path.display());
                samples.extend(parsed);
            }
        }

        if !found_source {
            return Err(TakeoutError::NoLocationData {
                path: self.root.clone(),
                year,
            });
        }

        if let (Some(lower), Some(upper)) = (
            NaiveDate::from_ymd_opt(year - 1, 12, 31),
            NaiveDate::from_ymd_opt(year + 1, 1, 1),
        ) {
            samples.retain(|sample| {
                let date = sample.timestamp.date_naive();
                date >= lower && date <= upper
            });
        }

        Ok(samples)
    }
}

fn parse_file(
    path: &Path,
    parser: fn(&str) -> Result<Vec<LocationSample>, serde_json::Error>,
) -> Result<Vec<LocationSample>, TakeoutError> {
    let data = std::fs::read_to_string(path)?;
    parser(&data).map_err(|source| TakeoutError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Monthly semantic files for the year (`<year>_JANUARY.json`, ...), sorted
/// for deterministic read order.
fn month_files(semantic_dir: &Path, year: i32) -> Result<Vec<PathBuf>, TakeoutError> {
    let prefix = format!("{year}_");
    let mut files = Vec::new();

    for entry in std::fs::read_dir(semantic_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if name.starts_with(&prefix) && name.ends_with(".json") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
