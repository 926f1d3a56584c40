//! HTTP API for the climate dataset.
//!
//! ## Modules
//!
//! - `handlers` - Axum handlers, one per route
//! - `routes` - Router wiring the handlers to their paths
//! - `models` - JSON response types

pub mod handlers;
pub mod models;
pub mod routes;

pub use handlers::ClimateApiState;
pub use routes::climate_routes;
