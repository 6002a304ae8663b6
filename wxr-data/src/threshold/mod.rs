//! Two ways of answering "how extreme is a 1 in F period event".
//!
//! - [`spacing`] finds the loosest bound whose exceedances are at least F
//!   positions apart in the series.
//! - [`quantile`] reads the 1/F quantile off the sorted values.
//!
//! Both agree on well-behaved series but can diverge on short or irregular
//! ones.

pub mod quantile;
pub mod spacing;

pub use quantile::estimate_quantile;
pub use spacing::estimate_spacing;

use crate::error::ConfigError;
use crate::period::PeriodKey;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Which tail of the distribution is rare.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    High,
    Low,
}

impl Direction {
    /// True if `other` is at least as extreme as `bound`.
    pub fn reaches(&self, bound: f64, other: f64) -> bool {
        match self {
            Direction::High => other >= bound,
            Direction::Low => other <= bound,
        }
    }

    /// The least extreme of two bounds: the lower for `High`, the higher
    /// for `Low`.
    pub fn loosest(&self, a: f64, b: f64) -> f64 {
        match self {
            Direction::High => a.min(b),
            Direction::Low => a.max(b),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::High => write!(f, "high"),
            Direction::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "h" => Ok(Direction::High),
            "low" | "l" => Ok(Direction::Low),
            other => Err(ConfigError::UnknownDirection(other.to_string())),
        }
    }
}

/// A threshold and every period whose value equals it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdResult {
    pub value: f64,
    pub periods: Vec<PeriodKey>,
}

/// Rarity must be a positive number of periods.
pub(crate) fn check_frequency(frequency: u32) -> Result<usize, ConfigError> {
    if frequency == 0 {
        return Err(ConfigError::InvalidFrequency(frequency.to_string()));
    }
    Ok(frequency as usize)
}
