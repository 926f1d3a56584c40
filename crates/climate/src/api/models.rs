//! API response models.
//!
//! Field names are part of the public JSON contract and are fixed by serde
//! renames: `Date`, `Precipitation`, `Station`, `Name`, `Latitude`,
//! `Longitude`, `Elevation`, `tobs`, `Minimum`, `Average`, `Maximum`.

use crate::types::{PrecipitationRecord, Station, TemperatureObservation, TemperatureSummary};
use serde::{Deserialize, Serialize};

/// One entry of `/api/v1.0/precipitation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationResponse {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Precipitation")]
    pub precipitation: Option<f64>,
}

impl From<PrecipitationRecord> for PrecipitationResponse {
    fn from(r: PrecipitationRecord) -> Self {
        Self {
            date: r.date,
            precipitation: r.precipitation,
        }
    }
}

/// One entry of `/api/v1.0/stations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationResponse {
    #[serde(rename = "Station")]
    pub station: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Elevation")]
    pub elevation: f64,
}

impl From<Station> for StationResponse {
    fn from(s: Station) -> Self {
        Self {
            station: s.station_id,
            name: s.name,
            latitude: s.latitude,
            longitude: s.longitude,
            elevation: s.elevation,
        }
    }
}

/// One entry of `/api/v1.0/tob`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TobsResponse {
    #[serde(rename = "Date")]
    pub date: String,
    pub tobs: f64,
}

impl From<TemperatureObservation> for TobsResponse {
    fn from(o: TemperatureObservation) -> Self {
        Self {
            date: o.date,
            tobs: o.temperature_observation,
        }
    }
}

/// The single entry of the aggregate routes. Null fields mean no rows matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    #[serde(rename = "Minimum")]
    pub minimum: Option<f64>,
    #[serde(rename = "Average")]
    pub average: Option<f64>,
    #[serde(rename = "Maximum")]
    pub maximum: Option<f64>,
}

impl From<TemperatureSummary> for SummaryResponse {
    fn from(s: TemperatureSummary) -> Self {
        Self {
            minimum: s.minimum,
            average: s.average,
            maximum: s.maximum,
        }
    }
}

/// Error body. The message is always generic; details stay in the logs.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_precipitation_null_serializes_as_null() {
        let body = serde_json::to_value(PrecipitationResponse {
            date: "2016-08-23".to_string(),
            precipitation: None,
        })
        .unwrap();
        assert_eq!(body, json!({"Date": "2016-08-23", "Precipitation": null}));
    }

    #[test]
    fn test_summary_key_names() {
        let body = serde_json::to_value(SummaryResponse::from(TemperatureSummary {
            minimum: Some(58.0),
            average: Some(60.0),
            maximum: Some(62.0),
        }))
        .unwrap();
        assert_eq!(body, json!({"Minimum": 58.0, "Average": 60.0, "Maximum": 62.0}));
    }
}
