//! Observability infrastructure for the climate API
//!
//! This crate provides:
//! - Structured logging via tracing
//! - Prometheus metrics
//! - Per-request and per-query metric helpers
//!
//! # Quick Start
//!
//! ```ignore
//! use observability::{init_logging, LogFormat};
//!
//! // Initialize logging
//! init_logging("climate-api", LogFormat::Pretty)?;
//!
//! // Initialize metrics (optional)
//! observability::metrics::init_metrics("127.0.0.1", 9090)?;
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::{init_metrics, QueryMetrics, ServerMetrics};
