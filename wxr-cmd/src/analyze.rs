//! Analyze and periods commands.

use crate::report::{render_report, render_series};
use crate::SeriesArgs;
use log::{info, warn};
use wxr_data::{
    aggregate, analyze, filter, AggregationMode, Analysis, Direction, FilterKey, Request,
};
use wxr_obs::{observation::read_observations_path, Observation, Station};

const NO_DATA_MESSAGE: &str =
    "There is no data that fits the parameters you provided. This program will now finish";

/// Filter key for the command line options: product code, optional
/// station, optional month and optional quality flag.
pub fn build_filter(args: &SeriesArgs) -> anyhow::Result<FilterKey> {
    match (args.mode, args.month) {
        (AggregationMode::SpecificMonthAcrossYears, None) => {
            anyhow::bail!("--month is required for the specific-month aggregation mode")
        }
        (AggregationMode::SpecificMonthAcrossYears, Some(_)) | (_, None) => {}
        (mode, Some(_)) => {
            anyhow::bail!("--month only applies to the specific-month mode, not {mode}")
        }
    }

    let mut key = FilterKey::wildcard().product_code(args.kind);
    if let Some(station_id) = Station::resolve(&args.station)? {
        key = key.station(station_id);
    }
    if let Some(month) = args.month {
        key = key.month(month);
    }
    if args.quality_assured {
        key = key.quality("Y");
    }
    Ok(key)
}

pub fn build_request(
    args: &SeriesArgs,
    frequency: u32,
    direction: Direction,
) -> anyhow::Result<Request> {
    Ok(Request {
        filter: build_filter(args)?,
        kind: args.kind,
        mode: args.mode,
        frequency,
        direction,
    })
}

/// Run the full pipeline over already-read records and render the outcome.
pub fn analyze_records(
    records: &[Observation],
    request: &Request,
    json: bool,
) -> anyhow::Result<String> {
    match analyze(records, request)? {
        Analysis::NoMatchingRecords => Ok(NO_DATA_MESSAGE.to_string()),
        Analysis::NoUsablePeriods { series } => {
            warn!("{} periods aggregated, none complete", series.len());
            Ok(NO_DATA_MESSAGE.to_string())
        }
        Analysis::Complete(report) => {
            if json {
                Ok(serde_json::to_string_pretty(&report)?)
            } else {
                Ok(render_report(&report))
            }
        }
    }
}

/// Filter and aggregate only, rendering the period series.
pub fn series_records(records: &[Observation], args: &SeriesArgs) -> anyhow::Result<String> {
    let key = build_filter(args)?;
    let matched = filter(records, &key);
    if matched.is_empty() {
        return Ok(NO_DATA_MESSAGE.to_string());
    }
    let series = aggregate(&matched, args.kind, args.mode);
    if args.json {
        Ok(serde_json::to_string_pretty(&series)?)
    } else {
        Ok(render_series(&series, args.kind))
    }
}

pub fn run_analyze(args: &SeriesArgs, frequency: u32, direction: Direction) -> anyhow::Result<()> {
    let request = build_request(args, frequency, direction)?;
    let records = read_observations_path(&args.file)?;
    info!(
        "Analyzing {} {} observations, 1 in {} {}",
        records.len(),
        args.kind,
        frequency,
        direction
    );
    println!("{}", analyze_records(&records, &request, args.json)?);
    Ok(())
}

pub fn run_periods(args: &SeriesArgs) -> anyhow::Result<()> {
    let records = read_observations_path(&args.file)?;
    println!("{}", series_records(&records, args)?);
    Ok(())
}
