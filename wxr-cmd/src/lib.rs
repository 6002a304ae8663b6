//! Command implementations for WXR CLI.
//!
//! Provides subcommands for aggregating daily station exports into period
//! series and estimating how extreme a 1 in F period event is.

use clap::{Args, Subcommand};
use wxr_data::{AggregationMode, Direction};
use wxr_obs::ProductCode;

pub mod analyze;
pub mod report;

/// Options shared by every command that reads observations.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct SeriesArgs {
    /// Path to a daily rainfall or temperature CSV export
    #[arg(short = 'i', long)]
    pub file: String,

    /// Rainfall or Temperature (or the raw product code)
    #[arg(short = 'k', long)]
    pub kind: ProductCode,

    /// Station name, alias or number; `all` for every station
    #[arg(short = 's', long, default_value = "all")]
    pub station: String,

    /// 1 monthly, 2 specific month across years, 3 yearly, 4 daily
    #[arg(short = 'm', long)]
    pub mode: AggregationMode,

    /// Month to keep; required for the specific-month mode
    #[arg(long, value_parser = parse_month_arg)]
    pub month: Option<u32>,

    /// Only use quality-assured observations
    #[arg(short = 'q', long)]
    pub quality_assured: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

fn parse_month_arg(s: &str) -> Result<u32, String> {
    wxr_utils::dates::parse_month(s).map_err(|e| e.to_string())
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Estimate the 1 in F period threshold with both methods
    Analyze {
        #[command(flatten)]
        series: SeriesArgs,

        /// How rare the event is: 1 in FREQUENCY periods
        #[arg(short = 'f', long, value_parser = clap::value_parser!(u32).range(1..2000))]
        frequency: u32,

        /// Whether the rare event is a high or a low
        #[arg(short = 'd', long)]
        direction: Direction,
    },

    /// Print the aggregated period series only
    Periods {
        #[command(flatten)]
        series: SeriesArgs,
    },

    /// List the known stations
    Stations,
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Analyze {
            series,
            frequency,
            direction,
        } => analyze::run_analyze(&series, frequency, direction),
        Command::Periods { series } => analyze::run_periods(&series),
        Command::Stations => report::run_stations(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn test_parse_analyze() {
        let cli = TestCli::try_parse_from([
            "wxr-cli", "analyze", "--file", "rain.csv", "--kind", "rain", "--station", "Canberra",
            "--mode", "2", "--month", "September", "-f", "20", "-d", "high", "-q",
        ])
        .unwrap();
        let Command::Analyze {
            series,
            frequency,
            direction,
        } = cli.command
        else {
            panic!("expected analyze");
        };
        assert_eq!(series.file, "rain.csv");
        assert_eq!(series.kind, ProductCode::Rainfall);
        assert_eq!(series.station, "Canberra");
        assert_eq!(series.mode, AggregationMode::SpecificMonthAcrossYears);
        assert_eq!(series.month, Some(9));
        assert!(series.quality_assured);
        assert!(!series.json);
        assert_eq!(frequency, 20);
        assert_eq!(direction, Direction::High);
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        fn with(extra: &[&str]) -> Result<TestCli, clap::Error> {
            let mut args = vec![
                "wxr-cli", "analyze", "--file", "t.csv", "--kind", "temp", "--mode", "3",
            ];
            args.extend_from_slice(extra);
            TestCli::try_parse_from(args)
        }
        assert!(with(&["-f", "20", "-d", "low"]).is_ok());
        assert!(with(&["-f", "0", "-d", "low"]).is_err());
        assert!(with(&["-f", "2000", "-d", "low"]).is_err());
        assert!(with(&["-f", "20", "-d", "sideways"]).is_err());
        assert!(with(&["-f", "20", "-d", "low", "--month", "13"]).is_err());
    }

    #[test]
    fn test_parse_periods_defaults_to_all_stations() {
        let cli = TestCli::try_parse_from([
            "wxr-cli", "periods", "-i", "t.csv", "-k", "IDCJAC0010", "-m", "daily", "--json",
        ])
        .unwrap();
        let Command::Periods { series } = cli.command else {
            panic!("expected periods");
        };
        assert_eq!(series.station, "all");
        assert_eq!(series.kind, ProductCode::Temperature);
        assert!(series.json);
    }
}
