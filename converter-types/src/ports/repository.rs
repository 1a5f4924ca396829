//! History repository port trait.
//!
//! Adapters (Postgres, SQLite) implement this trait.

use crate::domain::{ConversionRecord, CurrencyCode};
use crate::error::RepoError;

/// Append-only store of conversion records.
///
/// Each call must be individually atomic; the service never spans a
/// transaction across calls.
#[async_trait::async_trait]
pub trait HistoryRepository: Send + Sync + 'static {
    /// Appends one record.
    async fn insert(&self, record: &ConversionRecord) -> Result<(), RepoError>;

    /// The `limit` most recent records, newest first.
    ///
    /// `None` means the store had nothing to return.
    async fn query_recent(&self, limit: i64)
    -> Result<Option<Vec<ConversionRecord>>, RepoError>;

    /// Every record for `currency` (exact match), oldest first.
    async fn query_by_currency(
        &self,
        currency: &CurrencyCode,
    ) -> Result<Vec<ConversionRecord>, RepoError>;
}
