//! Period identities and the ordered series of reduced period values.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// How daily observations are grouped into periods.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum AggregationMode {
    /// One period per calendar month: a monthly timeseries.
    MonthlySeries,
    /// One period per year, each holding a single month. Records are
    /// expected to be filtered to that month beforehand.
    SpecificMonthAcrossYears,
    /// One period per calendar year.
    YearlySeries,
    /// One period per day, no completeness requirement.
    DailySeries,
}

impl AggregationMode {
    pub const ALL: [AggregationMode; 4] = [
        AggregationMode::MonthlySeries,
        AggregationMode::SpecificMonthAcrossYears,
        AggregationMode::YearlySeries,
        AggregationMode::DailySeries,
    ];

    /// The period a record belongs to under this mode.
    pub fn period_key(&self, year: i32, month: u32, day: u32) -> PeriodKey {
        match self {
            AggregationMode::MonthlySeries => PeriodKey::Monthly { year, month },
            AggregationMode::SpecificMonthAcrossYears | AggregationMode::YearlySeries => {
                PeriodKey::Yearly { year }
            }
            AggregationMode::DailySeries => PeriodKey::Daily { year, month, day },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AggregationMode::MonthlySeries => "monthly",
            AggregationMode::SpecificMonthAcrossYears => "specific-month",
            AggregationMode::YearlySeries => "yearly",
            AggregationMode::DailySeries => "daily",
        }
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AggregationMode {
    type Err = ConfigError;

    /// Accepts the menu numbers `1`..`4` or the mode names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "monthly" | "monthly-series" => Ok(AggregationMode::MonthlySeries),
            "2" | "specific-month" | "specific-month-across-years" => {
                Ok(AggregationMode::SpecificMonthAcrossYears)
            }
            "3" | "yearly" | "yearly-series" => Ok(AggregationMode::YearlySeries),
            "4" | "daily" | "daily-series" => Ok(AggregationMode::DailySeries),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// Grouping identity of a period. Each variant carries every date part it
/// depends on, so distinct periods never share a key.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "period", rename_all = "snake_case")]
pub enum PeriodKey {
    Monthly { year: i32, month: u32 },
    Yearly { year: i32 },
    Daily { year: i32, month: u32, day: u32 },
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Monthly { year, month } => write!(f, "{year:04}-{month:02}"),
            PeriodKey::Yearly { year } => write!(f, "{year:04}"),
            PeriodKey::Daily { year, month, day } => write!(f, "{year:04}-{month:02}-{day:02}"),
        }
    }
}

/// The reduced value of a period, or a marker that the period failed its
/// completeness check. `Invalid` is never the same as a zero total.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodValue {
    Value(f64),
    Invalid,
}

impl PeriodValue {
    pub fn as_option(&self) -> Option<f64> {
        match self {
            PeriodValue::Value(v) => Some(*v),
            PeriodValue::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, PeriodValue::Value(_))
    }
}

impl fmt::Display for PeriodValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodValue::Value(v) => write!(f, "{v:.2}"),
            PeriodValue::Invalid => write!(f, "-"),
        }
    }
}

/// Periods in the order their first record was seen.
///
/// Threshold estimators treat this order as the time order of the series,
/// so records should be chronological before aggregation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PeriodSeries {
    entries: Vec<(PeriodKey, PeriodValue)>,
}

impl PeriodSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a period. Keys are expected to be unique; the aggregator
    /// guarantees this.
    pub fn push(&mut self, key: PeriodKey, value: PeriodValue) {
        self.entries.push((key, value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &PeriodKey) -> Option<PeriodValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(PeriodKey, PeriodValue)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &PeriodKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Values in series order, `None` where the period is invalid.
    pub fn values(&self) -> Vec<Option<f64>> {
        self.entries.iter().map(|(_, v)| v.as_option()).collect()
    }

    /// Numeric values only, in series order.
    pub fn valid_values(&self) -> Vec<f64> {
        self.entries.iter().filter_map(|(_, v)| v.as_option()).collect()
    }

    pub fn valid_count(&self) -> usize {
        self.entries.iter().filter(|(_, v)| v.is_valid()).count()
    }

    pub fn is_all_invalid(&self) -> bool {
        self.valid_count() == 0
    }

    /// Every key whose value is exactly `value`, in series order.
    pub fn keys_with_value(&self, value: f64) -> Vec<PeriodKey> {
        self.entries
            .iter()
            .filter(|(_, v)| v.as_option() == Some(value))
            .map(|(k, _)| *k)
            .collect()
    }
}

impl FromIterator<(PeriodKey, PeriodValue)> for PeriodSeries {
    fn from_iter<T: IntoIterator<Item = (PeriodKey, PeriodValue)>>(iter: T) -> Self {
        PeriodSeries {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PeriodSeries {
    type Item = &'a (PeriodKey, PeriodValue);
    type IntoIter = std::slice::Iter<'a, (PeriodKey, PeriodValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
