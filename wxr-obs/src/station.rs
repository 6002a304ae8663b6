use crate::error::{ObservationError, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// Embedded CSV data for the known observation stations.
pub static CSV_OBJECT: &str = include_str!("../../fixtures/stations.csv");

/// A weather station with a short alias for typing at the command line.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Bureau station number (e.g. 70247 for Canberra)
    pub station_id: i64,
    /// Human-readable name of the station
    pub name: String,
    /// Short name accepted in place of `name`
    pub alias: String,
}

impl Station {
    /// Parse a CSV string of station data into a vector of Stations.
    ///
    /// Expected CSV columns: station_id, name, alias
    pub fn parse_station_csv(csv_object: &str) -> Result<Vec<Station>> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .from_reader(csv_object.as_bytes());
        let mut station_list = Vec::new();
        for row in rdr.deserialize() {
            let station: Station = row?;
            station_list.push(station);
        }
        Ok(station_list)
    }

    /// All stations in the embedded registry.
    pub fn get_station_vector() -> Result<Vec<Station>> {
        Station::parse_station_csv(CSV_OBJECT)
    }

    /// Resolve user input to a station number.
    ///
    /// `all` and `any` mean "every station" and resolve to `None`. Otherwise
    /// the input may be a name or alias (any case) or a station number; a
    /// number resolves even when it is not in the registry.
    pub fn resolve(input: &str) -> Result<Option<i64>> {
        let needle = input.trim().to_lowercase();
        if needle == "all" || needle == "any" {
            return Ok(None);
        }
        let stations = Station::get_station_vector()?;
        if let Some(station) = stations
            .iter()
            .find(|s| s.name.to_lowercase() == needle || s.alias.to_lowercase() == needle)
        {
            return Ok(Some(station.station_id));
        }
        needle
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ObservationError::UnknownStation(input.trim().to_string()))
    }
}
