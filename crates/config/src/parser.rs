use crate::*;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

#[instrument(skip(path))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ServiceConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    debug!("Config file content length: {} bytes", content.len());

    let config = parse_config(&content)?;

    info!("Configuration loaded successfully");
    Ok(config)
}

/// Substitute environment variables in `content` and parse it as YAML
pub fn parse_config(content: &str) -> Result<ServiceConfig> {
    let substituted = substitution::substitute_env_vars(content)?;
    debug!("Environment variable substitution completed");

    serde_yaml::from_str(&substituted).with_context(|| "Failed to parse YAML configuration")
}

#[instrument]
pub fn generate_default_config() -> ServiceConfig {
    use defaults::*;

    ServiceConfig {
        service: ServiceInfo {
            name: default_service_name(),
            description: "Read-only climate observations API".to_string(),
            version: "1.0.0".to_string(),
        },
        server: ServerSettings {
            host: Some(default_host()),
            http_port: Some(default_http_port()),
            request_timeout_secs: None,
        },
        storage: StorageConfig {
            sqlite: SqliteConfig {
                path: default_database_path(),
                max_connections: Some(default_max_connections()),
            },
        },
        logging: LoggingConfig {
            format: Some(default_log_format()),
        },
        monitoring: None,
    }
}

#[instrument]
pub fn save_config<P: AsRef<Path> + std::fmt::Debug>(config: &ServiceConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    info!("Saving configuration to: {:?}", path);

    let yaml = serde_yaml::to_string(config)
        .with_context(|| "Failed to serialize configuration to YAML")?;

    fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    info!("Configuration saved successfully");
    Ok(())
}
