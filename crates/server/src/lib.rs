//! HTTP server infrastructure for the climate API
//!
//! Lifecycle management and graceful shutdown for the axum listener,
//! plus the liveness endpoint and request metrics middleware.
//!
//! # Architecture
//!
//! Listeners implement the [`Server`] trait; [`ServerExt`] adds `spawn()`
//! and `run_with_ctrl_c()`. Shutdown uses `CancellationToken` from
//! `tokio_util`, so cancelling a parent token cancels every child.
//!
//! # Quick Start
//!
//! ```ignore
//! use server::{HttpServer, ServerConfig, ServerExt};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::default();
//!     let server = HttpServer::new(config, router);
//!
//!     server.run_with_ctrl_c().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`] - Server configuration and port constants
//! - [`traits`] - `Server` and `ServerExt` traits
//! - [`http`] - HTTP server using Axum
//! - [`health`] - `GET /health`
//! - [`middleware`] - Request metrics
//! - [`shutdown`] - Graceful shutdown utilities

pub mod config;
pub mod error;
pub mod shutdown;
pub mod traits;

pub mod health;
pub mod http;
pub mod middleware;
pub mod port_validator;

pub use config::{ports, ServerConfig};
pub use error::{Result, ServerError};
pub use health::{health_handler, health_routes, HealthState, HealthStatus};
pub use http::HttpServer;
pub use port_validator::validate_ports_available;
pub use shutdown::ShutdownController;
pub use traits::{Server, ServerExt};
