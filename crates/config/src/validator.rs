use crate::*;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Service name is required")]
    MissingServiceName,

    #[error("Invalid version format: {0}. Must be in format X.Y.Z (e.g., 1.0.0)")]
    InvalidVersionFormat(String),

    #[error("Storage: sqlite path is required")]
    MissingDatabasePath,

    #[error("Environment variable '{var}' is missing or invalid: {message}")]
    InvalidEnvVar { var: String, message: String },

    #[error("{field} must be a positive integer")]
    InvalidPositiveInteger { field: String },

    #[error("Invalid logging format: {0}. Must be one of: pretty, json, compact")]
    InvalidLogFormat(String),

    #[error("Port {port} is used by both {first} and {second}")]
    PortConflict {
        port: u16,
        first: String,
        second: String,
    },
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DefaultApplied {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub defaults_applied: Vec<DefaultApplied>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            defaults_applied: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_default(&mut self, field: &str, value: &str) {
        self.defaults_applied.push(DefaultApplied {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

const LOG_FORMATS: [&str; 3] = ["pretty", "json", "compact"];

pub fn validate_config(config: &ServiceConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_service(&config.service, &mut report);
    validate_server(&config.server, &mut report);
    validate_sqlite(&config.storage.sqlite, &mut report);
    validate_logging(&config.logging, &mut report);
    validate_monitoring(config, &mut report);

    report
}

fn validate_service(service: &ServiceInfo, report: &mut ValidationReport) {
    if service.name.trim().is_empty() {
        report.add_error(ValidationError::MissingServiceName);
    }

    let version_regex = Regex::new(r"^\d+\.\d+\.\d+$");
    if !version_regex.is_ok_and(|re| re.is_match(&service.version)) {
        report.add_error(ValidationError::InvalidVersionFormat(service.version.clone()));
    }
}

fn validate_server(server: &ServerSettings, report: &mut ValidationReport) {
    if server.host.is_none() {
        report.add_default("server.host", &default_host());
    }

    match server.http_port {
        None => report.add_default("server.http_port", &default_http_port().to_string()),
        Some(0) => report.add_warning(
            "server.http_port",
            "Port 0 binds an ephemeral port chosen by the OS",
        ),
        Some(_) => {}
    }

    if server.request_timeout_secs == Some(0) {
        report.add_warning(
            "server.request_timeout_secs",
            "A 0 second timeout fails every request",
        );
    }
}

fn validate_sqlite(sqlite: &SqliteConfig, report: &mut ValidationReport) {
    if sqlite.path.trim().is_empty() {
        report.add_error(ValidationError::MissingDatabasePath);
    } else {
        for var in unresolved_env_vars(&sqlite.path) {
            report.add_error(ValidationError::InvalidEnvVar {
                var,
                message: "storage.sqlite.path references an unset variable".to_string(),
            });
        }
    }

    match sqlite.max_connections {
        None => report.add_default(
            "storage.sqlite.max_connections",
            &default_max_connections().to_string(),
        ),
        Some(0) => report.add_error(ValidationError::InvalidPositiveInteger {
            field: "storage.sqlite.max_connections".to_string(),
        }),
        Some(_) => {}
    }
}

fn validate_logging(logging: &LoggingConfig, report: &mut ValidationReport) {
    match &logging.format {
        None => report.add_default("logging.format", &default_log_format()),
        Some(format) if !LOG_FORMATS.contains(&format.to_lowercase().as_str()) => {
            report.add_error(ValidationError::InvalidLogFormat(format.clone()))
        }
        Some(_) => {}
    }
}

fn validate_monitoring(config: &ServiceConfig, report: &mut ValidationReport) {
    if let Some(metrics_port) = config.metrics_port() {
        if metrics_port == config.server.http_port() {
            report.add_error(ValidationError::PortConflict {
                port: metrics_port,
                first: "server.http_port".to_string(),
                second: "monitoring.metrics_port".to_string(),
            });
        }
    }
}
