//! Query service over a `ClimateStore`.
//!
//! `QueryService` answers the five query shapes exposed over HTTP. It owns
//! no state beyond the injected store handle, so every call is independent
//! and repeatable.

use crate::error::{ClimateError, ClimateResult};
use crate::store::ClimateStore;
use crate::types::{
    DateRange, PrecipitationRecord, Station, TemperatureObservation, TemperatureSummary,
};
use observability::QueryMetrics;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Compute the start of the "last year of data" window.
///
/// The year is the text before the first `-`, parsed as an integer and
/// decremented by one; everything from byte offset 4 onward is kept as is.
/// This is not calendar arithmetic: `2016-02-29` yields `2015-02-29`.
pub fn cutoff_date(latest: &str) -> ClimateResult<String> {
    let year_text = latest.split('-').next().unwrap_or_default();
    let year: i64 = year_text.parse().map_err(|_| {
        ClimateError::InvalidData(format!("latest date has no integer year: {:?}", latest))
    })?;
    let suffix = latest.get(4..).unwrap_or_default();

    Ok(format!("{}{}", year - 1, suffix))
}

/// Read-only query operations over the climate dataset.
#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn ClimateStore>,
    metrics: QueryMetrics,
}

impl QueryService {
    /// Create a service over the given store.
    pub fn new(store: Arc<dyn ClimateStore>) -> Self {
        Self {
            store,
            metrics: QueryMetrics::new("climate"),
        }
    }

    /// Date and precipitation for every measurement.
    pub async fn list_precipitation(&self) -> ClimateResult<Vec<PrecipitationRecord>> {
        self.timed("precipitation", self.store.precipitation()).await
    }

    /// Every station.
    pub async fn list_stations(&self) -> ClimateResult<Vec<Station>> {
        self.timed("stations", self.store.stations()).await
    }

    /// Temperature observations within one year of the latest recorded date.
    ///
    /// An empty dataset has no latest date and yields an empty list.
    pub async fn recent_temperature_observations(
        &self,
    ) -> ClimateResult<Vec<TemperatureObservation>> {
        self.timed("recent_tobs", async {
            let Some(latest) = self.store.latest_date().await? else {
                debug!("No measurements recorded, returning no observations");
                return Ok(Vec::new());
            };

            let cutoff = cutoff_date(&latest)?;
            debug!(%latest, %cutoff, "Computed observation window");

            self.store.temperature_observations_since(&cutoff).await
        })
        .await
    }

    /// Min/avg/max temperature for all dates on or after `start`.
    ///
    /// Always returns exactly one summary; its fields are `None` when no rows
    /// match.
    pub async fn aggregate_from(&self, start: &str) -> ClimateResult<Vec<TemperatureSummary>> {
        let range = DateRange::from(start);
        self.timed("aggregate_from", async {
            Ok(vec![self.store.temperature_summary(&range).await?])
        })
        .await
    }

    /// Min/avg/max temperature for dates between `start` and `end` inclusive.
    pub async fn aggregate_range(
        &self,
        start: &str,
        end: &str,
    ) -> ClimateResult<Vec<TemperatureSummary>> {
        let range = DateRange::between(start, end);
        self.timed("aggregate_range", async {
            Ok(vec![self.store.temperature_summary(&range).await?])
        })
        .await
    }

    /// Release the store's resources.
    pub async fn shutdown(&self) {
        self.store.close().await;
    }

    async fn timed<T, F>(&self, operation: &'static str, query: F) -> ClimateResult<T>
    where
        F: Future<Output = ClimateResult<T>>,
    {
        let start = Instant::now();
        let result = query.await;
        self.metrics
            .record_query(operation, start.elapsed(), result.is_ok());

        if let Err(ref e) = result {
            warn!(operation, error = %e, "Climate query failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{measurement, station};
    use crate::store::InMemoryClimateStore;
    use assert_matches::assert_matches;

    fn service(store: InMemoryClimateStore) -> QueryService {
        QueryService::new(Arc::new(store))
    }

    #[test]
    fn test_cutoff_date_decrements_year_only() {
        assert_eq!(cutoff_date("2017-08-23").unwrap(), "2016-08-23");
        assert_eq!(cutoff_date("2000-01-01").unwrap(), "1999-01-01");
        // Feb 29 is carried over even though 2015 has none.
        assert_eq!(cutoff_date("2016-02-29").unwrap(), "2015-02-29");
    }

    #[test]
    fn test_cutoff_date_rejects_non_numeric_year() {
        assert_matches!(cutoff_date("latest"), Err(ClimateError::InvalidData(_)));
        assert_matches!(cutoff_date(""), Err(ClimateError::InvalidData(_)));
    }

    #[tokio::test]
    async fn test_recent_observations_window_boundaries() {
        let store = InMemoryClimateStore::new(
            vec![
                measurement("A", "2016-08-22", None, 70.0),
                measurement("A", "2016-08-23", None, 71.0),
                measurement("A", "2016-08-24", None, 72.0),
                measurement("A", "2017-08-23", None, 73.0),
            ],
            vec![],
        );
        let rows = service(store).recent_temperature_observations().await.unwrap();

        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2016-08-23", "2016-08-24", "2017-08-23"]);
    }

    #[tokio::test]
    async fn test_recent_observations_empty_dataset() {
        let rows = service(InMemoryClimateStore::default())
            .recent_temperature_observations()
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_aggregate_from_single_summary() {
        let store = InMemoryClimateStore::new(
            vec![
                measurement("A", "2016-12-31", None, 99.0),
                measurement("A", "2017-01-01", None, 58.0),
                measurement("B", "2017-01-02", None, 62.0),
                measurement("A", "2017-01-03", None, 70.0),
            ],
            vec![],
        );
        let result = service(store).aggregate_from("2017-01-01").await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].minimum, Some(58.0));
        assert_eq!(result[0].maximum, Some(70.0));
        assert!((result[0].average.unwrap() - 63.333_333).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_aggregate_with_no_rows_is_null() {
        let store = InMemoryClimateStore::new(
            vec![measurement("A", "2017-01-01", None, 58.0)],
            vec![],
        );
        let svc = service(store);

        let after = svc.aggregate_from("2018-01-01").await.unwrap();
        assert_eq!(after.len(), 1);
        assert!(after[0].is_empty());

        let inverted = svc.aggregate_range("2017-12-31", "2017-01-01").await.unwrap();
        assert_eq!(inverted.len(), 1);
        assert!(inverted[0].is_empty());
    }

    #[tokio::test]
    async fn test_queries_are_idempotent() {
        let store = InMemoryClimateStore::new(
            vec![
                measurement("A", "2017-01-01", Some(0.1), 58.0),
                measurement("A", "2017-01-02", None, 62.0),
            ],
            vec![station("A", "WAIKIKI 717.2, HI US")],
        );
        let svc = service(store);

        assert_eq!(
            svc.list_precipitation().await.unwrap(),
            svc.list_precipitation().await.unwrap()
        );
        assert_eq!(svc.list_stations().await.unwrap(), svc.list_stations().await.unwrap());
        assert_eq!(
            svc.aggregate_range("2017-01-01", "2017-01-02").await.unwrap(),
            svc.aggregate_range("2017-01-01", "2017-01-02").await.unwrap()
        );
    }
}
