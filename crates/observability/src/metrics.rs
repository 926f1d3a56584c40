//! Prometheus metrics infrastructure
//!
//! Exporter setup plus two metric sets: `ServerMetrics` for HTTP requests and
//! `QueryMetrics` for store queries. Without an installed recorder every
//! metric call is a no-op, so tests need no setup.

use metrics::{counter, histogram, Counter, Histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Initialize the Prometheus metrics exporter
///
/// This starts an HTTP listener on `host:port` that exposes metrics at
/// `/metrics`.
///
/// # Example
///
/// ```ignore
/// observability::metrics::init_metrics("127.0.0.1", 9090)?;
/// // Metrics available at http://127.0.0.1:9090/metrics
/// ```
pub fn init_metrics(host: &str, port: u16) -> anyhow::Result<()> {
    let addr = metrics_addr(host, port)?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    tracing::info!(%addr, "Metrics server listening");
    Ok(())
}

fn metrics_addr(host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    format!("{}:{}", host, port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid metrics address {}:{}: {}", host, port, e))
}

/// HTTP request metrics
///
/// # Metrics
///
/// * `server_requests_total` - Total number of requests processed
/// * `server_requests_by_status` - Requests per HTTP status code
/// * `server_request_duration_seconds` - Request duration histogram
#[derive(Clone)]
pub struct ServerMetrics {
    requests_total: Counter,
    request_duration: Histogram,
    server_name: String,
}

impl ServerMetrics {
    /// Create metrics for a specific server (e.g. "http")
    pub fn new(server_name: &str) -> Self {
        let name = server_name.to_string();

        Self {
            requests_total: counter!("server_requests_total", "server" => name.clone()),
            request_duration: histogram!("server_request_duration_seconds", "server" => name.clone()),
            server_name: name,
        }
    }

    /// Record a completed request
    pub fn record_request(&self, duration: Duration, status_code: u16) {
        self.requests_total.increment(1);
        counter!(
            "server_requests_by_status",
            "server" => self.server_name.clone(),
            "status" => status_code.to_string()
        )
        .increment(1);
        self.request_duration.record(duration.as_secs_f64());
    }
}

/// Store query metrics
///
/// # Metrics
///
/// * `queries_total` - Queries per operation and outcome (`ok` / `error`)
/// * `query_duration_seconds` - Query latency per operation
#[derive(Clone, Debug)]
pub struct QueryMetrics {
    component: String,
}

impl QueryMetrics {
    /// Create metrics for a query component (e.g. "climate")
    pub fn new(component: &str) -> Self {
        Self {
            component: component.to_string(),
        }
    }

    /// Record one query execution
    pub fn record_query(&self, operation: &'static str, duration: Duration, success: bool) {
        let outcome = if success { "ok" } else { "error" };
        counter!(
            "queries_total",
            "component" => self.component.clone(),
            "operation" => operation,
            "outcome" => outcome
        )
        .increment(1);
        histogram!(
            "query_duration_seconds",
            "component" => self.component.clone(),
            "operation" => operation
        )
        .record(duration.as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_addr_uses_configured_host() {
        let addr = metrics_addr("127.0.0.1", 9090).unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 9090);

        let addr = metrics_addr("0.0.0.0", 9100).unwrap();
        assert!(addr.ip().is_unspecified());

        assert!(metrics_addr("not a host", 9090).is_err());
    }

    #[test]
    fn test_server_metrics_without_recorder() {
        let metrics = ServerMetrics::new("http");
        metrics.record_request(Duration::from_millis(5), 200);
    }

    #[test]
    fn test_query_metrics_without_recorder() {
        let metrics = QueryMetrics::new("climate");
        metrics.record_query("stations", Duration::from_millis(2), true);
        metrics.record_query("stations", Duration::from_millis(2), false);
    }
}
