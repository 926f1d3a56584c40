use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod defaults;
pub mod parser;
pub mod substitution;
pub mod validator;

pub use defaults::*;
pub use parser::*;
pub use substitution::*;
pub use validator::*;

// ==================================================================================
// SERVICE CONFIG
// ==================================================================================

/// Top-level configuration file for the climate API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub service: ServiceInfo,
    #[serde(default)]
    pub server: ServerSettings,
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub version: String,
}

// ==================================================================================
// SERVER CONFIG
// ==================================================================================

/// HTTP listener settings. Unset fields fall back to [`defaults`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub http_port: Option<u16>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl ServerSettings {
    pub fn host(&self) -> String {
        self.host.clone().unwrap_or_else(default_host)
    }

    pub fn http_port(&self) -> u16 {
        self.http_port.unwrap_or_else(default_http_port)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Full bind address (host:http_port)
    pub fn http_address(&self) -> String {
        format!("{}:{}", self.host(), self.http_port())
    }
}

// ==================================================================================
// STORAGE CONFIG
// ==================================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub sqlite: SqliteConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    /// Path to the observations database file
    pub path: String,
    #[serde(default)]
    pub max_connections: Option<u32>,
}

impl SqliteConfig {
    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or_else(default_max_connections)
    }
}

// ==================================================================================
// LOGGING / MONITORING CONFIG
// ==================================================================================

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// One of `pretty`, `json`, `compact`
    #[serde(default)]
    pub format: Option<String>,
}

impl LoggingConfig {
    pub fn format(&self) -> String {
        self.format.clone().unwrap_or_else(default_log_format)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MonitoringConfig {
    /// Port of the Prometheus exporter; no exporter when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

impl ServiceConfig {
    pub fn metrics_port(&self) -> Option<u16> {
        self.monitoring.as_ref().and_then(|m| m.metrics_port)
    }
}
