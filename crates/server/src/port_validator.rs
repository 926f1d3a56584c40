//! Port validation before startup
//!
//! Checking a port before binding is inherently racy: another process can
//! take it in between. These checks give early feedback only; the real
//! bind in [`HttpServer::run`](crate::HttpServer) is authoritative.

use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};

/// Validate that the configured HTTP port is in range and free
pub async fn validate_ports_available(config: &ServerConfig) -> Result<()> {
    let Some(port) = config.http_port else {
        warn!("No HTTP port configured");
        return Ok(());
    };

    if port == 0 {
        debug!("HTTP port 0 requested, the OS will pick one");
        return Ok(());
    }

    validate_port_range(port)?;

    let addr = format!("{}:{}", config.host, port);
    debug!("Checking HTTP port {}", port);

    match TcpListener::bind(&addr).await {
        Ok(listener) => {
            let local_addr = listener
                .local_addr()
                .map_err(|e| ServerError::bind(addr.clone(), e))?;
            drop(listener);

            info!("HTTP port {} is available ({})", port, local_addr);
            Ok(())
        }
        Err(e) => {
            error!("HTTP port {} is NOT available: {}", port, e);
            Err(ServerError::port_in_use(port, e.to_string()))
        }
    }
}

/// Validate port range
///
/// Port 0 is rejected for explicit binding; ports below 1024 only warn.
pub fn validate_port_range(port: u16) -> Result<()> {
    if port == 0 {
        Err(ServerError::ConfigError(
            "Port cannot be 0 (ephemeral port assignment not supported for explicit binding)"
                .to_string(),
        ))
    } else {
        if port < 1024 {
            warn!(
                "Port {} is a privileged port (requires root/admin privileges)",
                port
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_validate_port_range() {
        assert!(validate_port_range(0).is_err());
        assert!(validate_port_range(80).is_ok());
        assert!(validate_port_range(5000).is_ok());
        assert!(validate_port_range(65535).is_ok());
    }

    #[tokio::test]
    async fn test_validate_ports_available_detects_busy_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let config = ServerConfig::http_only("127.0.0.1", port);
        let result = validate_ports_available(&config).await;
        assert_matches!(result, Err(ServerError::PortInUse { port: p, .. }) if p == port);
    }

    #[tokio::test]
    async fn test_validate_ports_available_accepts_ephemeral() {
        let config = ServerConfig::http_only("127.0.0.1", 0);
        assert!(validate_ports_available(&config).await.is_ok());
    }
}
