//! Filter, aggregate and estimate in one call.

use crate::aggregate::aggregate;
use crate::error::Result;
use crate::filter::{filter, FilterKey};
use crate::period::{AggregationMode, PeriodSeries};
use crate::threshold::{estimate_quantile, estimate_spacing, Direction, ThresholdResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use wxr_obs::{Observation, ProductCode};

/// Everything needed to turn a list of observations into thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub filter: FilterKey,
    pub kind: ProductCode,
    pub mode: AggregationMode,
    pub frequency: u32,
    pub direction: Direction,
}

/// Outcome of a complete run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub kind: ProductCode,
    pub mode: AggregationMode,
    pub frequency: u32,
    pub direction: Direction,
    pub series: PeriodSeries,
    /// `None` when no value satisfies the spacing condition.
    pub spacing: Option<ThresholdResult>,
    pub quantile: ThresholdResult,
}

/// Result of [`analyze`]. The first two variants are expected outcomes for
/// narrow filters or patchy records, not failures.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    /// Nothing passed the filter.
    NoMatchingRecords,
    /// Records were found but every period failed its completeness check.
    NoUsablePeriods { series: PeriodSeries },
    Complete(Report),
}

/// Filter `records`, aggregate what remains and estimate both thresholds.
pub fn analyze(records: &[Observation], request: &Request) -> Result<Analysis> {
    let matched = filter(records, &request.filter);
    if matched.is_empty() {
        warn!("No observations match the filter");
        return Ok(Analysis::NoMatchingRecords);
    }

    let series = aggregate(&matched, request.kind, request.mode);
    if series.is_all_invalid() {
        warn!("None of the {} periods are complete", series.len());
        return Ok(Analysis::NoUsablePeriods { series });
    }

    let spacing = estimate_spacing(&series, request.frequency, request.direction)?;
    let quantile = estimate_quantile(&series, request.frequency, request.direction)?;
    info!(
        "1 in {} {} thresholds: spacing {:?}, quantile {}",
        request.frequency,
        request.direction,
        spacing.as_ref().map(|t| t.value),
        quantile.value
    );
    Ok(Analysis::Complete(Report {
        kind: request.kind,
        mode: request.mode,
        frequency: request.frequency,
        direction: request.direction,
        series,
        spacing,
        quantile,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AnalysisError, ConfigError};
    use crate::period::{PeriodKey, PeriodValue};

    fn january(
        year: i32,
        station_id: i64,
        total: f64,
        missing_day: Option<u32>,
    ) -> Vec<Observation> {
        (1..=31)
            .map(|day| Observation {
                product_code: ProductCode::Rainfall,
                station_id,
                year,
                month: 1,
                day,
                value: match (missing_day, day) {
                    (Some(m), d) if m == d => None,
                    (_, 15) => Some(total),
                    _ => Some(0.0),
                },
                accumulation_days: None,
                quality: Some("Y".to_string()),
            })
            .collect()
    }

    fn request(filter: FilterKey, frequency: u32) -> Request {
        Request {
            filter,
            kind: ProductCode::Rainfall,
            mode: AggregationMode::SpecificMonthAcrossYears,
            frequency,
            direction: Direction::High,
        }
    }

    #[test]
    fn test_complete_run() {
        let mut records = Vec::new();
        for (year, total) in [(2015, 10.0), (2016, 40.0), (2017, 5.0), (2018, 40.0), (2019, 8.0)] {
            records.extend(january(year, 70247, total, None));
        }
        records.extend(january(2015, 66062, 99.0, None));
        let key = FilterKey::wildcard().station(70247).month(1);

        let Analysis::Complete(report) = analyze(&records, &request(key, 2)).unwrap() else {
            panic!("expected a complete report");
        };
        assert_eq!(report.series.len(), 5);
        assert_eq!(
            report.series.get(&PeriodKey::Yearly { year: 2016 }),
            Some(PeriodValue::Value(40.0))
        );
        assert_eq!(report.quantile.value, 10.0);
        assert_eq!(report.quantile.periods, vec![PeriodKey::Yearly { year: 2015 }]);
        let spacing = report.spacing.unwrap();
        assert_eq!(spacing.value, 40.0);
        assert_eq!(spacing.periods.len(), 2);
    }

    #[test]
    fn test_spacing_may_find_nothing() {
        let mut records = Vec::new();
        for (year, total) in [(2015, 10.0), (2016, 40.0), (2017, 40.0)] {
            records.extend(january(year, 70247, total, None));
        }
        let outcome = analyze(&records, &request(FilterKey::wildcard(), 3)).unwrap();
        let Analysis::Complete(report) = outcome else {
            panic!("expected a complete report");
        };
        assert_eq!(report.spacing, None);
        assert_eq!(report.quantile.value, 40.0);
    }

    #[test]
    fn test_no_matching_records() {
        let records = january(2020, 70247, 50.0, None);
        let key = FilterKey::wildcard().station(66062);
        assert_eq!(analyze(&records, &request(key, 2)).unwrap(), Analysis::NoMatchingRecords);
    }

    #[test]
    fn test_no_usable_periods() {
        let records = january(2020, 70247, 50.0, Some(10));
        let outcome = analyze(&records, &request(FilterKey::wildcard(), 2)).unwrap();
        match outcome {
            Analysis::NoUsablePeriods { series } => {
                assert_eq!(
                    series.get(&PeriodKey::Yearly { year: 2020 }),
                    Some(PeriodValue::Invalid)
                );
            }
            other => panic!("expected no usable periods, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_frequency() {
        let records = january(2020, 70247, 50.0, None);
        assert_eq!(
            analyze(&records, &request(FilterKey::wildcard(), 0)),
            Err(AnalysisError::Config(ConfigError::InvalidFrequency("0".to_string())))
        );
    }

    #[test]
    fn test_report_serializes() {
        let records = january(2020, 70247, 50.0, None);
        let outcome = analyze(&records, &request(FilterKey::wildcard(), 1)).unwrap();
        let Analysis::Complete(report) = outcome else {
            panic!("expected a complete report");
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["quantile"]["value"], 50.0);
        assert_eq!(json["direction"], "high");
        let back: Report = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }
}
