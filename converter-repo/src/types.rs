//! Database row structs for SQLite and PostgreSQL.
//!
//! SQLite keeps ids and timestamps as text; PostgreSQL uses native UUID and
//! TIMESTAMPTZ columns. Both map back into the same domain record.

use sqlx::FromRow;

use converter_types::{ConversionRecord, CurrencyCode, RecordId, RepoError};

#[cfg(feature = "sqlite")]
use chrono::{DateTime, SecondsFormat, Utc};

/// Columns read back by every history query.
pub const SELECT_COLUMNS: &str = "id, currency, rate, input_amount, converted_amount, created_at";

fn parse_currency(raw: String) -> Result<CurrencyCode, RepoError> {
    CurrencyCode::parse(raw).map_err(|e| RepoError::Corrupt(e.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed-width RFC3339 (nanoseconds, `Z`) so that text order is time order.
#[cfg(feature = "sqlite")]
pub fn sqlite_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Conversion row from SQLite.
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct SqliteConversionRow {
    pub id: String,
    pub currency: String,
    pub rate: f64,
    pub input_amount: f64,
    pub converted_amount: f64,
    pub created_at: String,
}

#[cfg(feature = "sqlite")]
impl SqliteConversionRow {
    pub fn into_domain(self) -> Result<ConversionRecord, RepoError> {
        let id: RecordId = self
            .id
            .parse()
            .map_err(|e| RepoError::Corrupt(format!("invalid record id {}: {}", self.id, e)))?;

        let timestamp = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| RepoError::Corrupt(format!("invalid timestamp {}: {}", self.created_at, e)))?
            .with_timezone(&Utc);

        Ok(ConversionRecord::from_parts(
            id,
            parse_currency(self.currency)?,
            self.rate,
            self.input_amount,
            self.converted_amount,
            timestamp,
        ))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ─────────────────────────────────────────────────────────────────────────────

/// Conversion row from PostgreSQL.
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct PgConversionRow {
    pub id: uuid::Uuid,
    pub currency: String,
    pub rate: f64,
    pub input_amount: f64,
    pub converted_amount: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(feature = "postgres")]
impl PgConversionRow {
    pub fn into_domain(self) -> Result<ConversionRecord, RepoError> {
        Ok(ConversionRecord::from_parts(
            RecordId::from_uuid(self.id),
            parse_currency(self.currency)?,
            self.rate,
            self.input_amount,
            self.converted_amount,
            self.created_at,
        ))
    }
}
