//! Domain types for climate observations.
//!
//! Dates are carried as ISO `YYYY-MM-DD` strings. Every comparison in this
//! crate is a plain string comparison, which matches chronological order
//! only because the dates are zero-padded and fixed width.

use serde::{Deserialize, Serialize};

/// One station's reading for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub station_id: String,
    pub date: String,
    pub precipitation: Option<f64>,
    pub temperature_observation: f64,
}

/// A fixed weather-observation site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub station_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// Date and precipitation projection of a measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationRecord {
    pub date: String,
    pub precipitation: Option<f64>,
}

impl From<&Measurement> for PrecipitationRecord {
    fn from(m: &Measurement) -> Self {
        Self {
            date: m.date.clone(),
            precipitation: m.precipitation,
        }
    }
}

/// Date and temperature projection of a measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureObservation {
    pub date: String,
    pub temperature_observation: f64,
}

impl From<&Measurement> for TemperatureObservation {
    fn from(m: &Measurement) -> Self {
        Self {
            date: m.date.clone(),
            temperature_observation: m.temperature_observation,
        }
    }
}

/// Minimum, mean and maximum temperature over a set of measurements.
///
/// All three fields are `None` when the set is empty, mirroring SQL
/// aggregate-of-empty-set semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSummary {
    pub minimum: Option<f64>,
    pub average: Option<f64>,
    pub maximum: Option<f64>,
}

impl TemperatureSummary {
    /// Summarize a sequence of temperature values.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut minimum = f64::INFINITY;
        let mut maximum = f64::NEG_INFINITY;

        for v in values {
            count += 1;
            sum += v;
            minimum = minimum.min(v);
            maximum = maximum.max(v);
        }

        if count == 0 {
            return Self::default();
        }

        Self {
            minimum: Some(minimum),
            average: Some(sum / count as f64),
            maximum: Some(maximum),
        }
    }

    /// True when no rows contributed to the summary.
    pub fn is_empty(&self) -> bool {
        self.minimum.is_none() && self.average.is_none() && self.maximum.is_none()
    }
}

/// Inclusive date bounds for an aggregate query.
///
/// `end` of `None` means unbounded above. Bounds are not validated: a
/// malformed or inverted range simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: Option<String>,
}

impl DateRange {
    /// Range from `start` onward.
    pub fn from(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: None,
        }
    }

    /// Range from `start` through `end`, both inclusive.
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: Some(end.into()),
        }
    }

    /// Check whether a date falls within the range.
    pub fn contains(&self, date: &str) -> bool {
        if date < self.start.as_str() {
            return false;
        }
        match self.end {
            Some(ref end) => date <= end.as_str(),
            None => true,
        }
    }
}
