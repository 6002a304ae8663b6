//! Period aggregation and rarity thresholds for daily station observations.
//!
//! Observations flow through four stages:
//!
//! 1. [`filter::filter`] keeps records matching a partial [`FilterKey`].
//! 2. [`aggregate::aggregate`] groups them into periods, checks each period
//!    is complete and reduces it to a total (rainfall) or mean (temperature).
//! 3. [`threshold::estimate_spacing`] and [`threshold::estimate_quantile`]
//!    each answer "how extreme is a 1 in F period event".
//!
//! [`pipeline::analyze`] runs all of them.
//!
//! # Usage
//!
//! ```rust
//! use wxr_data::{analyze, AggregationMode, Analysis, Direction, FilterKey, Request};
//! use wxr_obs::{Observation, ProductCode};
//!
//! let records: Vec<Observation> = (1..=31)
//!     .map(|day| Observation {
//!         product_code: ProductCode::Rainfall,
//!         station_id: 70247,
//!         year: 2020,
//!         month: 1,
//!         day,
//!         value: Some(if day == 15 { 50.0 } else { 0.0 }),
//!         accumulation_days: None,
//!         quality: Some("Y".to_string()),
//!     })
//!     .collect();
//!
//! let request = Request {
//!     filter: FilterKey::wildcard().station(70247),
//!     kind: ProductCode::Rainfall,
//!     mode: AggregationMode::MonthlySeries,
//!     frequency: 1,
//!     direction: Direction::High,
//! };
//! match analyze(&records, &request).unwrap() {
//!     Analysis::Complete(report) => assert_eq!(report.quantile.value, 50.0),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod period;
pub mod pipeline;
pub mod threshold;

pub use aggregate::{aggregate, required_days};
pub use error::{AnalysisError, ConfigError};
pub use filter::{filter, FilterKey};
pub use period::{AggregationMode, PeriodKey, PeriodSeries, PeriodValue};
pub use pipeline::{analyze, Analysis, Report, Request};
pub use threshold::{estimate_quantile, estimate_spacing, Direction, ThresholdResult};
