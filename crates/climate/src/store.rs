//! Climate store trait and in-memory implementation.
//!
//! `ClimateStore` is the typed, read-only data-access interface for the
//! measurement and station tables. Adapters (SQLite, in-memory) implement it;
//! the query service never sees SQL.

use crate::error::ClimateResult;
use crate::types::{
    DateRange, Measurement, PrecipitationRecord, Station, TemperatureObservation,
    TemperatureSummary,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for read access to the climate dataset.
///
/// Every method is a single read. Results come back in the store's natural
/// row order.
///
/// # Example
///
/// ```ignore
/// use climate::{ClimateStore, DateRange};
///
/// async fn example(store: &dyn ClimateStore) -> climate::ClimateResult<()> {
///     let summary = store.temperature_summary(&DateRange::from("2017-01-01")).await?;
///     println!("max: {:?}", summary.maximum);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ClimateStore: Send + Sync {
    /// Date and precipitation for every measurement row.
    async fn precipitation(&self) -> ClimateResult<Vec<PrecipitationRecord>>;

    /// Every station row.
    async fn stations(&self) -> ClimateResult<Vec<Station>>;

    /// The greatest measurement date, or `None` if there are no measurements.
    async fn latest_date(&self) -> ClimateResult<Option<String>>;

    /// Date and temperature for measurements with `date >= cutoff`.
    async fn temperature_observations_since(
        &self,
        cutoff: &str,
    ) -> ClimateResult<Vec<TemperatureObservation>>;

    /// Min/avg/max temperature over measurements within `range`.
    async fn temperature_summary(&self, range: &DateRange) -> ClimateResult<TemperatureSummary>;

    /// Release any held resources. Stores without resources do nothing.
    async fn close(&self) {}
}

/// In-memory implementation of ClimateStore.
///
/// Holds an immutable snapshot of both tables. Useful for tests and local
/// development; production deployments use `SqliteClimateStore`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClimateStore {
    measurements: Arc<Vec<Measurement>>,
    stations: Arc<Vec<Station>>,
}

impl InMemoryClimateStore {
    /// Create a store from the given rows.
    pub fn new(measurements: Vec<Measurement>, stations: Vec<Station>) -> Self {
        Self {
            measurements: Arc::new(measurements),
            stations: Arc::new(stations),
        }
    }
}

#[async_trait]
impl ClimateStore for InMemoryClimateStore {
    async fn precipitation(&self) -> ClimateResult<Vec<PrecipitationRecord>> {
        Ok(self.measurements.iter().map(PrecipitationRecord::from).collect())
    }

    async fn stations(&self) -> ClimateResult<Vec<Station>> {
        Ok(self.stations.as_ref().clone())
    }

    async fn latest_date(&self) -> ClimateResult<Option<String>> {
        Ok(self.measurements.iter().map(|m| &m.date).max().cloned())
    }

    async fn temperature_observations_since(
        &self,
        cutoff: &str,
    ) -> ClimateResult<Vec<TemperatureObservation>> {
        Ok(self
            .measurements
            .iter()
            .filter(|m| m.date.as_str() >= cutoff)
            .map(TemperatureObservation::from)
            .collect())
    }

    async fn temperature_summary(&self, range: &DateRange) -> ClimateResult<TemperatureSummary> {
        Ok(TemperatureSummary::from_values(
            self.measurements
                .iter()
                .filter(|m| range.contains(&m.date))
                .map(|m| m.temperature_observation),
        ))
    }
}
