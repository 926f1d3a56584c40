//! Request middleware applied by [`HttpServer`](crate::HttpServer)

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use observability::ServerMetrics;
use std::time::Instant;

/// Record request count, status and latency for every request.
pub async fn track_metrics(
    State(metrics): State<ServerMetrics>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let response = next.run(request).await;
    metrics.record_request(start.elapsed(), response.status().as_u16());
    response
}
