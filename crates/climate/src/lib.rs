//! # Climate Crate
//!
//! Read-only query layer over a climate observations dataset: daily
//! precipitation and temperature readings per weather station, plus the
//! station list.
//!
//! ## Key Components
//!
//! - **Domain Types**: `Measurement`, `Station`, `TemperatureSummary`, `DateRange`
//! - **Traits**: `ClimateStore` for typed, read-only data access
//! - **Query Service**: `QueryService`, the five query shapes served over HTTP
//! - **Stores**: `SqliteClimateStore` (production), `InMemoryClimateStore` (tests, dev)
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  api (axum)  GET /api/v1.0/...  →  JSON arrays           │
//! └──────────────────────────────┬───────────────────────────┘
//!                                ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  QueryService                                            │
//! │  - one-year window from the latest date                  │
//! │  - min/avg/max over a date range                         │
//! └──────────────────────────────┬───────────────────────────┘
//!                                ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  ClimateStore: SqliteClimateStore │ InMemoryClimateStore │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod service;
pub mod store;
pub mod types;

#[cfg(feature = "sqlite")]
pub mod db;

#[cfg(feature = "api")]
pub mod api;

// Re-export main types for convenience
pub use error::{ClimateError, ClimateResult};
pub use service::{cutoff_date, QueryService};
pub use store::{ClimateStore, InMemoryClimateStore};
pub use types::{
    DateRange, Measurement, PrecipitationRecord, Station, TemperatureObservation,
    TemperatureSummary,
};

#[cfg(feature = "sqlite")]
pub use db::SqliteClimateStore;

#[cfg(feature = "api")]
pub use api::{climate_routes, ClimateApiState};
