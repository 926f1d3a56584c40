//! Climate API CLI and Server Binary
//!
//! Entry point for the climate observations API. Provides commands for
//! initializing, validating, and starting the HTTP service.

use anyhow::{Context, Result};
use axum::Router;
use cli::{Cli, Commands};
use climate::{climate_routes, ClimateApiState, QueryService, SqliteClimateStore};
use config::{
    generate_default_config, load_config, save_config, validate_config, ServiceConfig,
    ValidationReport,
};
use observability::{init_logging, init_metrics, LogFormat};
use server::{
    health_routes, validate_ports_available, HealthState, HttpServer, ServerConfig, ServerExt,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging("climate-api", resolve_log_format(&cli))?;

    info!("Climate API starting...");
    debug!(?cli, "CLI arguments parsed");

    match cli.command {
        Commands::Start {
            config,
            http,
            database,
        } => {
            info!("Executing 'start' command");
            start_api(config, http, database).await
        }
        Commands::Validate { config } => {
            info!("Executing 'validate' command");
            validate_command(config).await
        }
        Commands::Init { output } => {
            info!("Executing 'init' command");
            init_command(output).await
        }
    }
}

/// `--log-format` wins, then the config file, then pretty
fn resolve_log_format(cli: &Cli) -> LogFormat {
    if let Some(arg) = cli.log_format {
        return LogFormat::parse(arg.as_str()).unwrap_or_default();
    }

    cli.config_path()
        .and_then(|path| load_config(path).ok())
        .and_then(|config| LogFormat::parse(&config.logging.format()))
        .unwrap_or_default()
}

fn apply_overrides(
    config: &mut ServiceConfig,
    http_override: Option<u16>,
    database_override: Option<PathBuf>,
) {
    if let Some(port) = http_override {
        debug!(port, "Overriding HTTP port");
        config.server.http_port = Some(port);
    }
    if let Some(path) = database_override {
        debug!(path = %path.display(), "Overriding database path");
        config.storage.sqlite.path = path.display().to_string();
    }
}

fn log_report(report: &ValidationReport) {
    for default in &report.defaults_applied {
        debug!(field = %default.field, value = %default.value, "Default applied");
    }

    if !report.warnings.is_empty() {
        warn!("Configuration warnings:");
        for warning in &report.warnings {
            warn!(field = %warning.field, message = %warning.message);
        }
    }

    if !report.is_valid() {
        error!(
            error_count = report.errors.len(),
            "Configuration validation failed"
        );
        for err in &report.errors {
            error!("{}", err);
        }
    }
}

fn server_config(config: &ServiceConfig) -> ServerConfig {
    let server = ServerConfig::http_only(config.server.host(), config.server.http_port());
    match config.server.request_timeout() {
        Some(timeout) => server.with_request_timeout(timeout),
        None => server,
    }
}

/// Climate routes plus `GET /health`
fn build_router(config: &ServiceConfig, service: QueryService) -> Router {
    let health = Arc::new(HealthState::new(
        config.service.name.clone(),
        config.service.version.clone(),
    ));

    climate_routes(Arc::new(ClimateApiState::new(service))).merge(health_routes(health))
}

async fn open_service(config: &ServiceConfig) -> Result<QueryService> {
    let sqlite = &config.storage.sqlite;
    let store = SqliteClimateStore::open(&sqlite.path, sqlite.max_connections())
        .await
        .with_context(|| format!("Failed to open climate database: {}", sqlite.path))?;

    info!(path = %sqlite.path, "Climate database opened");
    Ok(QueryService::new(Arc::new(store)))
}

async fn start_api<P: AsRef<Path>>(
    config_path: P,
    http_override: Option<u16>,
    database_override: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config(config_path.as_ref())?;
    apply_overrides(&mut config, http_override, database_override);

    let report = validate_config(&config);
    log_report(&report);
    if !report.is_valid() {
        anyhow::bail!("Cannot start climate API due to configuration errors");
    }

    if let Some(port) = config.metrics_port() {
        init_metrics(&config.server.host(), port)?;
    }

    let service = open_service(&config).await?;
    let router = build_router(&config, service.clone());

    let server_config = server_config(&config);
    validate_ports_available(&server_config).await?;

    info!(
        service = %config.service.name,
        address = %config.server.http_address(),
        "Starting climate API"
    );

    let result = HttpServer::new(server_config, router).run_with_ctrl_c().await;

    service.shutdown().await;
    result?;

    info!("Climate API stopped");
    Ok(())
}

async fn validate_command<P: AsRef<Path>>(config_path: P) -> Result<()> {
    info!(path = ?config_path.as_ref(), "Validating configuration");

    let config = match load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            error!(%e, "Failed to load configuration");
            anyhow::bail!(e);
        }
    };

    let report = validate_config(&config);

    println!("\n=== Configuration Validation Report ===\n");

    if !report.defaults_applied.is_empty() {
        println!("Defaults Applied ({}):", report.defaults_applied.len());
        for default in &report.defaults_applied {
            println!("  [info] {} = {}", default.field, default.value);
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  [warn] [{}] {}", warning.field, warning.message);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for err in &report.errors {
            println!("  [error] {}", err);
        }
        println!();
        anyhow::bail!("Configuration validation failed");
    }

    println!("[ok] Configuration is valid!");
    println!();
    println!("Service: {}", config.service.name);
    println!("Version: {}", config.service.version);
    println!("Listen: {}", config.server.http_address());
    println!("Database: {}", config.storage.sqlite.path);

    Ok(())
}

async fn init_command<P: AsRef<Path>>(output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!(?output_path, "Initializing new configuration file");

    let config = generate_default_config();

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    save_config(&config, output_path)?;

    println!("[ok] Configuration file created successfully!");
    println!();
    println!("Location: {:?}", output_path);
    println!();
    println!("Next steps:");
    println!("  1. Set CLIMATE_DB_PATH to the observations database (e.g. Resources/hawaii.sqlite)");
    println!(
        "  2. Run 'climate-api validate --config {:?}' to check configuration",
        output_path
    );
    println!(
        "  3. Run 'climate-api start --config {:?}' to serve the API",
        output_path
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use climate::{InMemoryClimateStore, Station};
    use tower::ServiceExt;

    fn test_config() -> ServiceConfig {
        let mut config = generate_default_config();
        config.storage.sqlite.path = "Resources/hawaii.sqlite".to_string();
        config
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = generate_default_config();
        apply_overrides(&mut config, Some(8000), Some(PathBuf::from("/tmp/hawaii.sqlite")));

        assert_eq!(config.server.http_port(), 8000);
        assert_eq!(config.storage.sqlite.path, "/tmp/hawaii.sqlite");
        assert!(validate_config(&config).is_valid());
    }

    #[test]
    fn test_server_config_from_service_config() {
        let mut config = test_config();
        config.server.request_timeout_secs = Some(10);

        let server = server_config(&config);
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.http_port, Some(5000));
        assert_eq!(server.request_timeout, Some(std::time::Duration::from_secs(10)));
    }

    #[tokio::test]
    async fn test_router_serves_health_and_climate_routes() {
        let store = InMemoryClimateStore::new(
            Vec::new(),
            vec![Station {
                station_id: "USC00519397".to_string(),
                name: "WAIKIKI 717.2, HI US".to_string(),
                latitude: 21.2716,
                longitude: -157.8168,
                elevation: 3.0,
            }],
        );
        let router = build_router(&test_config(), QueryService::new(Arc::new(store)));

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1.0/stations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json[0]["Station"], "USC00519397");
    }

    #[tokio::test]
    async fn test_missing_database_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config();
        config.storage.sqlite.path = dir.path().join("absent.sqlite").display().to_string();

        let Err(err) = open_service(&config).await else {
            panic!("expected open_service to fail");
        };
        assert!(err.to_string().contains("Failed to open climate database"));
    }

    #[tokio::test]
    async fn test_start_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("climate.yaml");

        let mut config = test_config();
        config.service.version = "one".to_string();
        save_config(&config, &path).unwrap();

        let err = start_api(&path, None, None).await.unwrap_err();
        assert!(err.to_string().contains("configuration errors"));
    }
}
