//! SQLite history adapter.
#![allow(clippy::collapsible_if)]

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::debug;

use converter_types::{ConversionRecord, CurrencyCode, HistoryRepository, RepoError};

use crate::types::{SELECT_COLUMNS, SqliteConversionRow, sqlite_timestamp};

/// How long a caller waits for a pooled connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite history store.
pub struct SqliteRepo {
    pool: SqlitePool,
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

impl SqliteRepo {
    /// Opens (or creates) the database and applies the schema.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if !is_in_memory(path) {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every in-memory connection is its own database, so keep exactly one alive.
        let pool_options = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.create_schema().await?;
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the history table and indexes if they are missing.
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_conversion_history.sql");
        for statement in ddl.split(';') {
            let stmt = statement.trim();
            if !stmt.is_empty() {
                sqlx::query(stmt)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| RepoError::Database(format!("Migration 0001 failed: {e}")))?;
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl HistoryRepository for SqliteRepo {
    async fn insert(&self, record: &ConversionRecord) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO conversion_history (id, currency, rate, input_amount, converted_amount, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(record.id.to_string())
        .bind(record.target_currency.as_str())
        .bind(record.rate)
        .bind(record.input_amount)
        .bind(record.converted_amount)
        .bind(sqlite_timestamp(&record.timestamp))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        debug!(id = %record.id, currency = %record.target_currency, "Conversion stored");
        Ok(())
    }

    async fn query_recent(&self, limit: i64) -> Result<Option<Vec<ConversionRecord>>, RepoError> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM conversion_history ORDER BY created_at DESC, seq DESC LIMIT ?"
        );
        let rows: Vec<SqliteConversionRow> = sqlx::query_as(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        if rows.is_empty() {
            return Ok(None);
        }

        rows.into_iter()
            .map(SqliteConversionRow::into_domain)
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    async fn query_by_currency(
        &self,
        currency: &CurrencyCode,
    ) -> Result<Vec<ConversionRecord>, RepoError> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM conversion_history WHERE currency = ? ORDER BY created_at ASC, seq ASC"
        );
        let rows: Vec<SqliteConversionRow> = sqlx::query_as(&sql)
            .bind(currency.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter()
            .map(SqliteConversionRow::into_domain)
            .collect()
    }
}
