//! Column-wise record selection.

use crate::error::ConfigError;
use log::info;
use wxr_obs::{Field, Observation, ProductCode, FIELD_COUNT};

/// A partial observation: one slot per column, `None` meaning "any value".
///
/// A concrete slot must equal the record's column exactly, so
/// `Some(Field::Null)` selects only rows where that column is blank.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterKey(Vec<Option<Field>>);

impl FilterKey {
    /// A key that matches every record.
    pub fn wildcard() -> Self {
        FilterKey(vec![None; FIELD_COUNT])
    }

    /// Build a key from positional columns. Fails unless exactly one column
    /// per observation field is given.
    pub fn from_columns(columns: Vec<Option<Field>>) -> Result<Self, ConfigError> {
        if columns.len() != FIELD_COUNT {
            return Err(ConfigError::FilterKeyLength {
                expected: FIELD_COUNT,
                found: columns.len(),
            });
        }
        Ok(FilterKey(columns))
    }

    pub fn product_code(self, code: ProductCode) -> Self {
        self.with(0, Field::from(code.as_code()))
    }

    pub fn station(self, station_id: i64) -> Self {
        self.with(1, Field::Integer(station_id))
    }

    pub fn month(self, month: u32) -> Self {
        self.with(3, Field::Integer(i64::from(month)))
    }

    pub fn quality(self, flag: &str) -> Self {
        self.with(7, Field::from(flag))
    }

    pub fn columns(&self) -> &[Option<Field>] {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// True if every concrete slot equals the record's column.
    pub fn matches(&self, record: &Observation) -> bool {
        self.0
            .iter()
            .zip(record.fields().iter())
            .all(|(want, have)| want.as_ref().map_or(true, |w| w == have))
    }

    fn with(mut self, index: usize, field: Field) -> Self {
        self.0[index] = Some(field);
        self
    }
}

impl Default for FilterKey {
    fn default() -> Self {
        FilterKey::wildcard()
    }
}

/// Records matching `key`, in their original order.
pub fn filter(records: &[Observation], key: &FilterKey) -> Vec<Observation> {
    let matched: Vec<Observation> = records
        .iter()
        .filter(|record| key.matches(record))
        .cloned()
        .collect();
    info!(
        "Filter kept {} of {} observations",
        matched.len(),
        records.len()
    );
    matched
}
