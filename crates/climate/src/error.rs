//! Error types for the climate crate.

use thiserror::Error;

/// Result type alias for climate store and query operations.
pub type ClimateResult<T> = Result<T, ClimateError>;

/// Errors that can occur while reading the climate dataset.
#[derive(Error, Debug, Clone)]
pub enum ClimateError {
    /// The store could not be opened (missing file, bad path, etc.).
    #[error("Failed to connect to climate store: {0}")]
    Connection(String),

    /// A required table is missing from the store.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A query failed while the store was open.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Stored data does not have the expected shape.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

#[cfg(feature = "sqlite")]
impl From<sqlx::Error> for ClimateError {
    fn from(err: sqlx::Error) -> Self {
        ClimateError::Storage(err.to_string())
    }
}
