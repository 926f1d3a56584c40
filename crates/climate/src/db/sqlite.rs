//! SQLite implementation of the `ClimateStore` trait.
//!
//! The store opens the dataset file read-only once at startup. Each operation
//! checks out one pooled connection, runs one query and hands the connection
//! back when the guard drops, whether the query succeeded, failed or returned
//! no rows.

use crate::db::models::{
    PrecipitationRow, StationRow, SummaryRow, TobsRow, REQUIRED_TABLES,
};
use crate::error::{ClimateError, ClimateResult};
use crate::store::ClimateStore;
use crate::types::{
    DateRange, PrecipitationRecord, Station, TemperatureObservation, TemperatureSummary,
};
use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use std::path::Path;
use tracing::{debug, info, instrument};

const SELECT_PRECIPITATION: &str = "SELECT date, prcp FROM measurement";

const SELECT_STATIONS: &str =
    "SELECT station, name, latitude, longitude, elevation FROM station";

const SELECT_LATEST_DATE: &str = "SELECT MAX(date) FROM measurement";

const SELECT_TOBS_SINCE: &str = "SELECT date, tobs FROM measurement WHERE date >= ?1";

const SUMMARY_FROM: &str = r#"
    SELECT CAST(MIN(tobs) AS REAL) AS minimum,
           AVG(tobs) AS average,
           CAST(MAX(tobs) AS REAL) AS maximum
    FROM measurement
    WHERE date >= ?1
"#;

const SUMMARY_BETWEEN: &str = r#"
    SELECT CAST(MIN(tobs) AS REAL) AS minimum,
           AVG(tobs) AS average,
           CAST(MAX(tobs) AS REAL) AS maximum
    FROM measurement
    WHERE date >= ?1 AND date <= ?2
"#;

/// SQLite-backed climate store.
#[derive(Debug, Clone)]
pub struct SqliteClimateStore {
    pool: SqlitePool,
}

impl SqliteClimateStore {
    /// Open the dataset at `path` read-only.
    ///
    /// Fails with `ClimateError::Connection` if the file is missing or cannot
    /// be opened, and with `ClimateError::Schema` if a required table is
    /// absent.
    pub async fn open(path: impl AsRef<Path>, max_connections: u32) -> ClimateResult<Self> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(ClimateError::Connection(format!(
                "database file not found: {}",
                path.display()
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| {
                ClimateError::Connection(format!("failed to open {}: {}", path.display(), e))
            })?;

        info!(
            path = %path.display(),
            max_connections,
            "Opened climate database"
        );

        Self::from_pool(pool).await
    }

    /// Create from an existing connection pool, checking the schema.
    pub async fn from_pool(pool: SqlitePool) -> ClimateResult<Self> {
        let store = Self { pool };
        store.check_schema().await?;
        Ok(store)
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Verify that both dataset tables exist.
    async fn check_schema(&self) -> ClimateResult<()> {
        let mut conn = self.connection().await?;

        for table in REQUIRED_TABLES {
            let found: Option<String> = sqlx::query_scalar(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            )
            .bind(table)
            .fetch_optional(&mut *conn)
            .await?;

            if found.is_none() {
                return Err(ClimateError::Schema(format!("missing table '{}'", table)));
            }
        }

        debug!("Climate database schema verified");
        Ok(())
    }

    /// Check out one connection for the duration of a single query.
    async fn connection(&self) -> ClimateResult<PoolConnection<Sqlite>> {
        self.pool
            .acquire()
            .await
            .map_err(|e| ClimateError::Connection(format!("failed to acquire connection: {}", e)))
    }
}

#[async_trait]
impl ClimateStore for SqliteClimateStore {
    #[instrument(skip(self))]
    async fn precipitation(&self) -> ClimateResult<Vec<PrecipitationRecord>> {
        let mut conn = self.connection().await?;
        let rows = sqlx::query_as::<_, PrecipitationRow>(SELECT_PRECIPITATION)
            .fetch_all(&mut *conn)
            .await?;

        debug!(rows = rows.len(), "Fetched precipitation");
        Ok(rows.into_iter().map(PrecipitationRow::to_domain).collect())
    }

    #[instrument(skip(self))]
    async fn stations(&self) -> ClimateResult<Vec<Station>> {
        let mut conn = self.connection().await?;
        let rows = sqlx::query_as::<_, StationRow>(SELECT_STATIONS)
            .fetch_all(&mut *conn)
            .await?;

        debug!(rows = rows.len(), "Fetched stations");
        Ok(rows.into_iter().map(StationRow::to_domain).collect())
    }

    #[instrument(skip(self))]
    async fn latest_date(&self) -> ClimateResult<Option<String>> {
        let mut conn = self.connection().await?;
        let latest: Option<String> = sqlx::query_scalar(SELECT_LATEST_DATE)
            .fetch_one(&mut *conn)
            .await?;

        Ok(latest)
    }

    #[instrument(skip(self))]
    async fn temperature_observations_since(
        &self,
        cutoff: &str,
    ) -> ClimateResult<Vec<TemperatureObservation>> {
        let mut conn = self.connection().await?;
        let rows = sqlx::query_as::<_, TobsRow>(SELECT_TOBS_SINCE)
            .bind(cutoff)
            .fetch_all(&mut *conn)
            .await?;

        debug!(rows = rows.len(), "Fetched temperature observations");
        Ok(rows.into_iter().map(TobsRow::to_domain).collect())
    }

    #[instrument(skip(self))]
    async fn temperature_summary(&self, range: &DateRange) -> ClimateResult<TemperatureSummary> {
        let mut conn = self.connection().await?;

        let row = match range.end {
            Some(ref end) => {
                sqlx::query_as::<_, SummaryRow>(SUMMARY_BETWEEN)
                    .bind(&range.start)
                    .bind(end)
                    .fetch_one(&mut *conn)
                    .await?
            }
            None => {
                sqlx::query_as::<_, SummaryRow>(SUMMARY_FROM)
                    .bind(&range.start)
                    .fetch_one(&mut *conn)
                    .await?
            }
        };

        Ok(row.to_domain())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Closed climate database");
    }
}
