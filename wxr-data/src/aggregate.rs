//! Grouping observations into periods and reducing each complete period to
//! a single value.

use crate::period::{AggregationMode, PeriodKey, PeriodSeries, PeriodValue};
use log::{debug, info};
use std::collections::HashMap;
use wxr_obs::{Observation, ProductCode};
use wxr_utils::dates::{canonical_days_in_month, simple_days_in_year};

/// Observation-days a complete period must account for, or `None` when the
/// mode has no completeness requirement.
///
/// Monthly periods ignore leap years (February is always 28 days), yearly
/// periods use the divisible-by-4 rule with no century exception.
pub fn required_days(mode: AggregationMode, year: i32, month: u32) -> Option<u32> {
    match mode {
        AggregationMode::MonthlySeries | AggregationMode::SpecificMonthAcrossYears => {
            // an impossible month can never be satisfied
            Some(canonical_days_in_month(month).unwrap_or(u32::MAX))
        }
        AggregationMode::YearlySeries => Some(simple_days_in_year(year)),
        AggregationMode::DailySeries => None,
    }
}

/// Running totals for one period.
#[derive(Debug, Default, Clone, PartialEq)]
struct Tally {
    sum: f64,
    observed_days: u32,
    overflowed: bool,
}

impl Tally {
    /// Missing readings add nothing. A present reading adds its
    /// accumulation length, one day when that is blank.
    fn add(&mut self, record: &Observation) {
        if let Some(value) = record.value {
            self.sum += value;
            let days = record.accumulation_days.unwrap_or(1);
            match self.observed_days.checked_add(days) {
                Some(total) => self.observed_days = total,
                None => self.overflowed = true,
            }
        }
    }

    fn reduce(&self, kind: ProductCode) -> f64 {
        match kind {
            ProductCode::Rainfall => self.sum,
            ProductCode::Temperature => self.sum / f64::from(self.observed_days),
        }
    }
}

/// All records of a period share the date part the mode groups on.
fn is_homogeneous(mode: AggregationMode, records: &[&Observation]) -> bool {
    let Some(first) = records.first() else {
        return false;
    };
    match mode {
        AggregationMode::MonthlySeries | AggregationMode::SpecificMonthAcrossYears => {
            records.iter().all(|r| r.month == first.month)
        }
        AggregationMode::YearlySeries => records.iter().all(|r| r.year == first.year),
        AggregationMode::DailySeries => true,
    }
}

fn reduce_period(
    key: &PeriodKey,
    records: &[&Observation],
    kind: ProductCode,
    mode: AggregationMode,
) -> PeriodValue {
    let mut tally = Tally::default();
    for record in records {
        tally.add(record);
    }
    if !is_homogeneous(mode, records) {
        debug!("{key}: mixed dates in one period");
        return PeriodValue::Invalid;
    }
    if tally.overflowed {
        debug!("{key}: accumulation lengths overflow the day count");
        return PeriodValue::Invalid;
    }
    // records is non-empty once is_homogeneous holds
    let first = records[0];
    if let Some(required) = required_days(mode, first.year, first.month) {
        if tally.observed_days != required {
            debug!(
                "{key}: {} observation days, {} required",
                tally.observed_days, required
            );
            return PeriodValue::Invalid;
        }
    }
    if tally.observed_days == 0 {
        debug!("{key}: no readings");
        return PeriodValue::Invalid;
    }
    PeriodValue::Value(tally.reduce(kind))
}

/// Group `records` into periods under `mode` and reduce each one.
///
/// Rainfall periods are summed, temperature periods averaged over their
/// observation days. A period that mixes months (or years) or does not
/// account for exactly the required number of days is `Invalid`. Periods
/// appear in the order their first record was seen.
pub fn aggregate(
    records: &[Observation],
    kind: ProductCode,
    mode: AggregationMode,
) -> PeriodSeries {
    let mut order: Vec<PeriodKey> = Vec::new();
    let mut grouped: HashMap<PeriodKey, Vec<&Observation>> = HashMap::new();
    for record in records {
        let key = mode.period_key(record.year, record.month, record.day);
        grouped
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(record);
    }

    let mut series = PeriodSeries::new();
    for key in order {
        let members = grouped.get(&key).map(Vec::as_slice).unwrap_or_default();
        series.push(key, reduce_period(&key, members, kind, mode));
    }
    info!(
        "Aggregated {} observations into {} {} periods ({} valid)",
        records.len(),
        series.len(),
        mode,
        series.valid_count()
    );
    series
}
