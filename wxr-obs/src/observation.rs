use crate::error::{ObservationError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::info;
use serde::{Deserialize, Serialize};
use std::{fmt, io::Read, path::Path, str::FromStr};
use wxr_utils::dates::is_calendar_date;

/// Number of columns in a daily station export, and so the length of
/// every filter key.
pub const FIELD_COUNT: usize = 8;

/// Column names in export order, used in error messages.
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "product code",
    "station number",
    "year",
    "month",
    "day",
    "value",
    "accumulation days",
    "quality",
];

/// The product an export was produced from. The product decides what the
/// value column measures and how a period of values is reduced.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum ProductCode {
    /// Daily rainfall in millimetres; periods are summed.
    Rainfall,
    /// Daily maximum temperature in degrees C; periods are averaged.
    Temperature,
}

impl ProductCode {
    pub const RAINFALL_CODE: &'static str = "IDCJAC0009";
    pub const TEMPERATURE_CODE: &'static str = "IDCJAC0010";

    /// The code as it appears in the first column of an export.
    pub fn as_code(&self) -> &'static str {
        match self {
            ProductCode::Rainfall => Self::RAINFALL_CODE,
            ProductCode::Temperature => Self::TEMPERATURE_CODE,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            ProductCode::Rainfall => "mm",
            ProductCode::Temperature => "°C",
        }
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductCode::Rainfall => write!(f, "Rainfall"),
            ProductCode::Temperature => write!(f, "Temperature"),
        }
    }
}

impl FromStr for ProductCode {
    type Err = ObservationError;

    /// Accepts the raw product code or a plain-English name.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed == Self::RAINFALL_CODE {
            return Ok(ProductCode::Rainfall);
        }
        if trimmed == Self::TEMPERATURE_CODE {
            return Ok(ProductCode::Temperature);
        }
        match trimmed.to_lowercase().as_str() {
            "rainfall" | "rain" => Ok(ProductCode::Rainfall),
            "temperature" | "temp" => Ok(ProductCode::Temperature),
            _ => Err(ObservationError::UnknownProductCode(trimmed.to_string())),
        }
    }
}

/// A single column value of an [`Observation`], typed so that filter
/// comparisons are exact: `Integer(5)` never equals `Float(5.0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Field {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::Text(value.to_string())
    }
}

impl From<i64> for Field {
    fn from(value: i64) -> Self {
        Field::Integer(value)
    }
}

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        Field::Float(value)
    }
}

impl<T: Into<Field>> From<Option<T>> for Field {
    fn from(value: Option<T>) -> Self {
        value.map_or(Field::Null, Into::into)
    }
}

/// One row of a daily station export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub product_code: ProductCode,
    pub station_id: i64,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// `None` is a missing reading.
    pub value: Option<f64>,
    /// Days the reading was accumulated over. `None` counts as one day.
    pub accumulation_days: Option<u32>,
    /// Quality assurance flag, `Y` once checked.
    pub quality: Option<String>,
}

impl Observation {
    /// The row's columns in export order.
    pub fn fields(&self) -> [Field; FIELD_COUNT] {
        [
            Field::from(self.product_code.as_code()),
            Field::Integer(self.station_id),
            Field::Integer(i64::from(self.year)),
            Field::Integer(i64::from(self.month)),
            Field::Integer(i64::from(self.day)),
            Field::from(self.value),
            Field::from(self.accumulation_days.map(i64::from)),
            Field::from(self.quality.as_deref()),
        ]
    }

    /// Build an observation from one CSV record. `row` is the 1-based data
    /// row (header excluded) and only used for error messages.
    pub fn from_record(row: usize, record: &StringRecord) -> Result<Observation> {
        if record.len() != FIELD_COUNT {
            return Err(ObservationError::ColumnCount {
                row,
                expected: FIELD_COUNT,
                found: record.len(),
            });
        }
        let cell = |i: usize| record.get(i).unwrap_or("").trim();

        let product_code: ProductCode = cell(0).parse()?;
        let station_id = parse_required::<i64>(row, 1, cell(1))?;
        let year = parse_required::<i32>(row, 2, cell(2))?;
        let month = parse_required::<u32>(row, 3, cell(3))?;
        let day = parse_required::<u32>(row, 4, cell(4))?;
        if !is_calendar_date(year, month, day) {
            return Err(ObservationError::InvalidDate {
                row,
                year,
                month,
                day,
            });
        }
        let value = parse_optional::<f64>(row, 5, cell(5))?;
        if value.is_some_and(|v| !v.is_finite()) {
            return Err(ObservationError::InvalidCell {
                row,
                column: FIELD_NAMES[5],
                value: cell(5).to_string(),
            });
        }
        let accumulation_days = parse_optional::<u32>(row, 6, cell(6))?;
        let quality = match cell(7) {
            "" => None,
            q => Some(q.to_string()),
        };

        Ok(Observation {
            product_code,
            station_id,
            year,
            month,
            day,
            value,
            accumulation_days,
            quality,
        })
    }
}

fn parse_required<T: FromStr>(row: usize, column: usize, raw: &str) -> Result<T> {
    raw.parse::<T>().map_err(|_| ObservationError::InvalidCell {
        row,
        column: FIELD_NAMES[column],
        value: raw.to_string(),
    })
}

fn parse_optional<T: FromStr>(row: usize, column: usize, raw: &str) -> Result<Option<T>> {
    if raw.is_empty() {
        return Ok(None);
    }
    parse_required(row, column, raw).map(Some)
}

/// Read every observation from a daily station export. The first line is
/// a header and is skipped.
pub fn read_observations<R: Read>(reader: R) -> Result<Vec<Observation>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let mut observations = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        observations.push(Observation::from_record(i + 1, &record)?);
    }
    Ok(observations)
}

/// Open `path` and read it with [`read_observations`].
pub fn read_observations_path<P: AsRef<Path>>(path: P) -> Result<Vec<Observation>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| ObservationError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let observations = read_observations(file)?;
    info!(
        "Read {} observations from {}",
        observations.len(),
        path.display()
    );
    Ok(observations)
}
