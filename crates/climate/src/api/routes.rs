//! Axum route definitions for the climate API.

use crate::api::handlers::{self, ClimateApiState};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Create all climate routes.
///
/// # Routes
///
/// - `GET /` - Route listing (HTML)
/// - `GET /api/v1.0/precipitation` - Date and precipitation for every measurement
/// - `GET /api/v1.0/stations` - Every station
/// - `GET /api/v1.0/tob` - Temperature observations for the last year of data
/// - `GET /api/v1.0/{start}` - Min/avg/max temperature from `start`
/// - `GET /api/v1.0/{start}/{end}` - Min/avg/max temperature from `start` to `end`
pub fn climate_routes(state: Arc<ClimateApiState>) -> Router {
    Router::new()
        .route("/", get(handlers::welcome))
        .route("/api/v1.0/precipitation", get(handlers::precipitation))
        .route("/api/v1.0/stations", get(handlers::stations))
        .route("/api/v1.0/tob", get(handlers::tob))
        .route("/api/v1.0/:start", get(handlers::start_given))
        .route("/api/v1.0/:start/:end", get(handlers::range_given))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::WELCOME_HTML;
    use crate::error::{ClimateError, ClimateResult};
    use crate::service::QueryService;
    use crate::store::tests::{measurement, station};
    use crate::store::{ClimateStore, InMemoryClimateStore};
    use crate::types::{
        DateRange, PrecipitationRecord, Station, TemperatureObservation, TemperatureSummary,
    };
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router(store: Arc<dyn ClimateStore>) -> Router {
        climate_routes(Arc::new(ClimateApiState::new(QueryService::new(store))))
    }

    fn sample_router() -> Router {
        router(Arc::new(InMemoryClimateStore::new(
            vec![
                measurement("USC00519397", "2016-08-22", Some(0.4), 76.0),
                measurement("USC00519397", "2016-08-23", None, 78.0),
                measurement("USC00513117", "2017-01-01", Some(0.0), 58.0),
                measurement("USC00513117", "2017-01-02", Some(0.1), 62.0),
                measurement("USC00513117", "2017-08-23", Some(0.0), 70.0),
            ],
            vec![station("USC00519397", "WAIKIKI 717.2, HI US")],
        )))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = get(app, uri).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    struct FailingStore;

    #[async_trait]
    impl ClimateStore for FailingStore {
        async fn precipitation(&self) -> ClimateResult<Vec<PrecipitationRecord>> {
            Err(ClimateError::Storage("disk I/O error".to_string()))
        }

        async fn stations(&self) -> ClimateResult<Vec<Station>> {
            Err(ClimateError::Storage("disk I/O error".to_string()))
        }

        async fn latest_date(&self) -> ClimateResult<Option<String>> {
            Ok(Some("latest".to_string()))
        }

        async fn temperature_observations_since(
            &self,
            _cutoff: &str,
        ) -> ClimateResult<Vec<TemperatureObservation>> {
            Ok(Vec::new())
        }

        async fn temperature_summary(
            &self,
            _range: &DateRange,
        ) -> ClimateResult<TemperatureSummary> {
            Err(ClimateError::Storage("disk I/O error".to_string()))
        }
    }

    #[tokio::test]
    async fn test_welcome_lists_routes() {
        let (status, body) = get(sample_router(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, WELCOME_HTML);
        assert!(body.starts_with("==== Available Routes ====<br/>"));
    }

    #[tokio::test]
    async fn test_precipitation_route() {
        let (status, body) = get_json(sample_router(), "/api/v1.0/precipitation").await;
        assert_eq!(status, StatusCode::OK);

        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], json!({"Date": "2016-08-22", "Precipitation": 0.4}));
        assert_eq!(rows[1], json!({"Date": "2016-08-23", "Precipitation": null}));
    }

    #[tokio::test]
    async fn test_stations_route() {
        let (status, body) = get_json(sample_router(), "/api/v1.0/stations").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{
                "Station": "USC00519397",
                "Name": "WAIKIKI 717.2, HI US",
                "Latitude": 21.2716,
                "Longitude": -157.8168,
                "Elevation": 3.0
            }])
        );
    }

    #[tokio::test]
    async fn test_tob_route_uses_one_year_window() {
        let (status, body) = get_json(sample_router(), "/api/v1.0/tob").await;
        assert_eq!(status, StatusCode::OK);

        let dates: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["Date"].as_str().unwrap())
            .collect();
        assert_eq!(dates, vec!["2016-08-23", "2017-01-01", "2017-01-02", "2017-08-23"]);
        assert_eq!(body[0]["tobs"], json!(78.0));
    }

    #[tokio::test]
    async fn test_start_route_aggregates() {
        let (status, body) = get_json(sample_router(), "/api/v1.0/2017-01-01").await;
        assert_eq!(status, StatusCode::OK);

        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Minimum"], json!(58.0));
        assert_eq!(rows[0]["Maximum"], json!(70.0));
        let avg = rows[0]["Average"].as_f64().unwrap();
        assert!((avg - 63.333_333).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_range_route_aggregates() {
        let (status, body) =
            get_json(sample_router(), "/api/v1.0/2016-08-22/2016-08-23").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"Minimum": 76.0, "Average": 77.0, "Maximum": 78.0}]));
    }

    #[tokio::test]
    async fn test_unmatched_and_malformed_dates_yield_nulls() {
        let null_summary = json!([{"Minimum": null, "Average": null, "Maximum": null}]);

        let (status, body) = get_json(sample_router(), "/api/v1.0/2099-01-01").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, null_summary);

        let (status, body) =
            get_json(sample_router(), "/api/v1.0/2017-08-23/2016-08-22").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, null_summary);

        let (status, body) = get_json(sample_router(), "/api/v1.0/yesterday").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, null_summary);
    }

    #[tokio::test]
    async fn test_store_failure_is_generic_500() {
        for uri in [
            "/api/v1.0/precipitation",
            "/api/v1.0/stations",
            "/api/v1.0/tob",
            "/api/v1.0/2017-01-01",
            "/api/v1.0/2017-01-01/2017-02-01",
        ] {
            let (status, body) = get_json(router(Arc::new(FailingStore)), uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
            assert_eq!(body, json!({"success": false, "error": "Internal server error"}));
        }
    }
}
