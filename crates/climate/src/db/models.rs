//! Database row models for the measurement and station tables.
//!
//! These structs map directly to SQLite result rows and convert into the
//! domain types in `crate::types`. Column names follow the dataset schema:
//!
//! ```text
//! measurement(id, station, date, prcp, tobs)
//! station(id, station, name, latitude, longitude, elevation)
//! ```

use crate::types::{PrecipitationRecord, Station, TemperatureObservation, TemperatureSummary};
use sqlx::FromRow;

/// Tables the store requires at open time.
pub const REQUIRED_TABLES: [&str; 2] = ["measurement", "station"];

#[derive(Debug, Clone, FromRow)]
pub struct PrecipitationRow {
    pub date: String,
    pub prcp: Option<f64>,
}

impl PrecipitationRow {
    pub fn to_domain(self) -> PrecipitationRecord {
        PrecipitationRecord {
            date: self.date,
            precipitation: self.prcp,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct StationRow {
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl StationRow {
    pub fn to_domain(self) -> Station {
        Station {
            station_id: self.station,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            elevation: self.elevation,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct TobsRow {
    pub date: String,
    pub tobs: f64,
}

impl TobsRow {
    pub fn to_domain(self) -> TemperatureObservation {
        TemperatureObservation {
            date: self.date,
            temperature_observation: self.tobs,
        }
    }
}

/// Result of a MIN/AVG/MAX aggregate. SQL returns NULLs for an empty set.
#[derive(Debug, Clone, FromRow)]
pub struct SummaryRow {
    pub minimum: Option<f64>,
    pub average: Option<f64>,
    pub maximum: Option<f64>,
}

impl SummaryRow {
    pub fn to_domain(self) -> TemperatureSummary {
        TemperatureSummary {
            minimum: self.minimum,
            average: self.average,
            maximum: self.maximum,
        }
    }
}
