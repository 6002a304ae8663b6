//! Plain-text rendering of period series and threshold reports.

use std::fmt::Write;
use wxr_data::{PeriodKey, PeriodSeries, Report, ThresholdResult};
use wxr_obs::{ProductCode, Station};

fn join_periods(periods: &[PeriodKey]) -> String {
    periods
        .iter()
        .map(PeriodKey::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_threshold(label: &str, threshold: &ThresholdResult, unit: &str) -> String {
    format!(
        "{label}: {:.2} {unit} ({})",
        threshold.value,
        join_periods(&threshold.periods)
    )
}

/// One line per period, `-` marking a period that failed its completeness
/// check.
pub fn render_series(series: &PeriodSeries, kind: ProductCode) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<12} {:>10}", "Period", kind.unit());
    for (key, value) in series {
        let _ = writeln!(out, "{:<12} {:>10}", key.to_string(), value.to_string());
    }
    let _ = write!(
        out,
        "{} periods, {} complete",
        series.len(),
        series.valid_count()
    );
    out
}

pub fn render_report(report: &Report) -> String {
    let unit = report.kind.unit();
    let mut out = render_series(&report.series, report.kind);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "\n{} {} series, 1 in {} {} event",
        report.kind, report.mode, report.frequency, report.direction
    );
    match &report.spacing {
        Some(threshold) => {
            let _ = writeln!(out, "{}", render_threshold("Spacing threshold", threshold, unit));
        }
        None => {
            let _ = writeln!(
                out,
                "Spacing threshold: no value in the series satisfies this condition"
            );
        }
    }
    let _ = write!(out, "{}", render_threshold("Quantile threshold", &report.quantile, unit));
    out
}

pub fn run_stations() -> anyhow::Result<()> {
    for station in Station::get_station_vector()? {
        println!("{:>6}  {:<12} {}", station.station_id, station.name, station.alias);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wxr_data::{AggregationMode, Direction, PeriodValue};

    fn series() -> PeriodSeries {
        vec![
            (PeriodKey::Yearly { year: 2015 }, PeriodValue::Value(10.0)),
            (PeriodKey::Yearly { year: 2016 }, PeriodValue::Invalid),
            (PeriodKey::Yearly { year: 2017 }, PeriodValue::Value(5.5)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_render_series() {
        let out = render_series(&series(), ProductCode::Rainfall);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Period"));
        assert!(lines[1].starts_with("2015") && lines[1].ends_with("10.00"));
        assert!(lines[2].starts_with("2016") && lines[2].ends_with('-'));
        assert!(lines[3].ends_with("5.50"));
        assert_eq!(lines[4], "3 periods, 2 complete");
    }

    #[test]
    fn test_render_report() {
        let report = Report {
            kind: ProductCode::Temperature,
            mode: AggregationMode::YearlySeries,
            frequency: 2,
            direction: Direction::Low,
            series: series(),
            spacing: None,
            quantile: ThresholdResult {
                value: 5.5,
                periods: vec![PeriodKey::Yearly { year: 2017 }],
            },
        };
        let out = render_report(&report);
        assert!(out.contains("Temperature yearly series, 1 in 2 low event"));
        assert!(out.contains("Spacing threshold: no value in the series satisfies this condition"));
        assert!(out.ends_with("Quantile threshold: 5.50 °C (2017)"));

        let report = Report {
            spacing: Some(ThresholdResult {
                value: 10.0,
                periods: vec![PeriodKey::Yearly { year: 2015 }, PeriodKey::Yearly { year: 2019 }],
            }),
            ..report
        };
        assert!(render_report(&report).contains("Spacing threshold: 10.00 °C (2015, 2019)"));
    }
}
