//! Server configuration
//!
//! Bind settings for the HTTP listener and the default port of the
//! climate API.

use crate::error::{Result, ServerError};
use std::net::SocketAddr;
use std::time::Duration;

/// Standard port assignments
pub mod ports {
    /// Climate API HTTP port
    pub const DEFAULT_HTTP: u16 = 5000;
}

/// HTTP server configuration
///
/// # Example
///
/// ```
/// use server::config::ServerConfig;
/// use std::time::Duration;
///
/// let config = ServerConfig::http_only("127.0.0.1", 5000)
///     .with_request_timeout(Duration::from_secs(30));
/// assert_eq!(config.http_port, Some(5000));
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to (e.g., "0.0.0.0" or "127.0.0.1")
    pub host: String,
    /// HTTP port; `None` means the listener is not configured
    pub http_port: Option<u16>,
    /// Per-request timeout applied to every route
    pub request_timeout: Option<Duration>,
}

impl ServerConfig {
    /// Create a server config for HTTP only
    pub fn http_only(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            http_port: Some(port),
            request_timeout: None,
        }
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Get HTTP socket address
    pub fn http_addr(&self) -> Option<Result<SocketAddr>> {
        self.http_port.map(|p| self.parse_addr(p))
    }

    fn parse_addr(&self, port: u16) -> Result<SocketAddr> {
        format!("{}:{}", self.host, port)
            .parse()
            .map_err(|_| ServerError::InvalidAddress(format!("{}:{}", self.host, port)))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::http_only("0.0.0.0", ports::DEFAULT_HTTP)
    }
}
