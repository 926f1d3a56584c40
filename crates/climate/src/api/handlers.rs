//! HTTP request handlers for the climate API.

use crate::api::models::*;
use crate::error::ClimateError;
use crate::service::QueryService;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use std::sync::Arc;
use tracing::error;

/// Route listing served at `/`.
pub const WELCOME_HTML: &str = "==== Available Routes ====<br/>\
/api/v1.0/precipitation<br/>\
/api/v1.0/stations<br/>\
/api/v1.0/tob<br/>\
/api/v1.0/yyyy-mm-dd<br/>\
/api/v1.0/yyyy-mm-dd/yyyy-mm-dd";

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Shared state for climate API handlers.
pub struct ClimateApiState {
    pub service: QueryService,
}

impl ClimateApiState {
    pub fn new(service: QueryService) -> Self {
        Self { service }
    }
}

/// Log the real failure and hand the client a generic 500.
fn internal_error(e: ClimateError) -> (StatusCode, Json<ErrorResponse>) {
    error!(error = %e, "Request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            success: false,
            error: "Internal server error".to_string(),
        }),
    )
}

/// GET /
pub async fn welcome() -> Html<&'static str> {
    Html(WELCOME_HTML)
}

/// GET /api/v1.0/precipitation
pub async fn precipitation(
    State(state): State<Arc<ClimateApiState>>,
) -> ApiResult<Vec<PrecipitationResponse>> {
    let records = state
        .service
        .list_precipitation()
        .await
        .map_err(internal_error)?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// GET /api/v1.0/stations
pub async fn stations(
    State(state): State<Arc<ClimateApiState>>,
) -> ApiResult<Vec<StationResponse>> {
    let stations = state
        .service
        .list_stations()
        .await
        .map_err(internal_error)?;

    Ok(Json(stations.into_iter().map(Into::into).collect()))
}

/// GET /api/v1.0/tob
pub async fn tob(State(state): State<Arc<ClimateApiState>>) -> ApiResult<Vec<TobsResponse>> {
    let observations = state
        .service
        .recent_temperature_observations()
        .await
        .map_err(internal_error)?;

    Ok(Json(observations.into_iter().map(Into::into).collect()))
}

/// GET /api/v1.0/{start}
///
/// The path segment is passed through unvalidated.
pub async fn start_given(
    State(state): State<Arc<ClimateApiState>>,
    Path(start): Path<String>,
) -> ApiResult<Vec<SummaryResponse>> {
    let summaries = state
        .service
        .aggregate_from(&start)
        .await
        .map_err(internal_error)?;

    Ok(Json(summaries.into_iter().map(Into::into).collect()))
}

/// GET /api/v1.0/{start}/{end}
pub async fn range_given(
    State(state): State<Arc<ClimateApiState>>,
    Path((start, end)): Path<(String, String)>,
) -> ApiResult<Vec<SummaryResponse>> {
    let summaries = state
        .service
        .aggregate_range(&start, &end)
        .await
        .map_err(internal_error)?;

    Ok(Json(summaries.into_iter().map(Into::into).collect()))
}
