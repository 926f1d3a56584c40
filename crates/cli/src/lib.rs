use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Default location of the service configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/climate.yaml";

#[derive(Parser, Debug)]
#[command(name = "climate-api")]
#[command(about = "Climate API - read-only weather station observations over HTTP")]
#[command(version)]
pub struct Cli {
    /// Log output format; falls back to the config file, then `pretty`
    #[arg(long, global = true, value_enum, env = "CLIMATE_LOG_FORMAT")]
    pub log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API with the given configuration
    Start {
        /// Path to the configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Override HTTP port
        #[arg(long)]
        http: Option<u16>,

        /// Override the SQLite database path
        #[arg(long)]
        database: Option<PathBuf>,
    },

    /// Validate configuration without starting the API
    Validate {
        /// Path to the configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Initialize a new configuration file with all defaults
    Init {
        /// Output path for the new configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        output: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormatArg {
    /// Human-readable, colored
    Pretty,
    /// JSON lines
    Json,
    /// Single-line
    Compact,
}

impl LogFormatArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormatArg::Pretty => "pretty",
            LogFormatArg::Json => "json",
            LogFormatArg::Compact => "compact",
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Config file the command reads, if any
    pub fn config_path(&self) -> Option<&PathBuf> {
        match &self.command {
            Commands::Start { config, .. } | Commands::Validate { config } => Some(config),
            Commands::Init { .. } => None,
        }
    }
}
