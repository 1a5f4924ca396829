//! PostgreSQL history adapter.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::debug;

use converter_types::{ConversionRecord, CurrencyCode, HistoryRepository, RepoError};

use crate::types::{PgConversionRow, SELECT_COLUMNS};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL history store.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_conversion_history_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Connects and applies the schema.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl HistoryRepository for PostgresRepo {
    async fn insert(&self, record: &ConversionRecord) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO conversion_history (id, currency, rate, input_amount, converted_amount, created_at)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(record.id.into_uuid())
        .bind(record.target_currency.as_str())
        .bind(record.rate)
        .bind(record.input_amount)
        .bind(record.converted_amount)
        .bind(record.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        debug!(id = %record.id, currency = %record.target_currency, "Conversion stored");
        Ok(())
    }

    async fn query_recent(&self, limit: i64) -> Result<Option<Vec<ConversionRecord>>, RepoError> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM conversion_history ORDER BY created_at DESC, seq DESC LIMIT $1"
        );
        let rows: Vec<PgConversionRow> = sqlx::query_as(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        if rows.is_empty() {
            return Ok(None);
        }

        rows.into_iter()
            .map(PgConversionRow::into_domain)
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    async fn query_by_currency(
        &self,
        currency: &CurrencyCode,
    ) -> Result<Vec<ConversionRecord>, RepoError> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM conversion_history WHERE currency = $1 ORDER BY created_at ASC, seq ASC"
        );
        let rows: Vec<PgConversionRow> = sqlx::query_as(&sql)
            .bind(currency.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(PgConversionRow::into_domain).collect()
    }
}
