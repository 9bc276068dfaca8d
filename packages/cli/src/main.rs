#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the state presence audit tool.
//!
//! Wires the pipeline: read the Takeout export, classify every calendar day
//! of the year against the target state, tally the year report, and render
//! it (text summary to stdout, optional per-day CSV detail).
//!
//! Uses `indicatif-log-bridge` (via [`logging::init_logger`]) to route `log`
//! output through `indicatif::MultiProgress` so that log lines and spinners
//! never fight for the terminal.

mod logging;
mod render;

use std::path::PathBuf;

use chrono::FixedOffset;
use clap::Parser;
use state_days_boundary::{BoundaryStore, DEFAULT_NAME_PROPERTY};
use state_days_classify::{build_report, classify};
use state_days_takeout::TakeoutReader;

#[derive(Parser)]
#[command(
    name = "state_days",
    about = "Counts days spent inside a US state from a Google Takeout export"
)]
struct Cli {
    /// Path to the "Google Takeout" directory
    #[arg(long)]
    takeout_dir: PathBuf,

    /// Path to a US states GeoJSON file (one feature per state)
    #[arg(long)]
    states_geojson: PathBuf,

    /// State performing the audit, as named in the boundary data (e.g. "New York")
    #[arg(long)]
    state: String,

    /// Calendar year to audit
    #[arg(long)]
    year: i32,

    /// Fixed UTC offset used to assign samples to calendar days
    #[arg(long, default_value = "-05:00")]
    utc_offset: String,

    /// Optional CSV output for the per-day detail
    #[arg(long)]
    csv_out: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = logging::init_logger();
    let cli = Cli::parse();

    let offset: FixedOffset = cli
        .utc_offset
        .parse()
        .map_err(|err| format!("Invalid --utc-offset \"{}\": {err}", cli.utc_offset))?;

    let bar = logging::spinner(&multi, "Loading state boundaries...");
    let store = BoundaryStore::from_geojson_file(&cli.states_geojson, DEFAULT_NAME_PROPERTY)?;
    bar.finish_with_message(format!("Loaded {} state boundaries", store.len()));

    let bar = logging::spinner(&multi, "Reading location history...");
    let samples = TakeoutReader::new(&cli.takeout_dir).read_year(cli.year)?;
    bar.finish_with_message(format!("Read {} location samples", samples.len()));

    let records = classify(samples, &store, &cli.state, cli.year, &offset)?;
    let report = build_report(&records, &cli.state, cli.year)?;

    print!("{}", render::render_report(&report));

    if let Some(csv_out) = &cli.csv_out {
        render::write_csv(csv_out, &records)?;
        log::info!("Wrote per-day detail to {}", csv_out.display());
    }

    Ok(())
}
