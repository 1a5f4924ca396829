//! Converter Application Service
//!
//! Orchestrates the rate source and history store through their ports.
//! Contains NO infrastructure logic - pure business orchestration.

use std::future::Future;
use std::time::Duration;

use converter_types::{
    ConversionError, ConversionRecord, CurrencyCode, CurrencyVariation, HistoryRepository,
    RateError, RateSource, RepoError, compute_variations,
};

/// Number of records returned by [`ConverterService::recent`].
pub const RECENT_LIMIT: i64 = 10;

/// Upper bound for every single rate lookup or store call.
pub const DEFAULT_DEPENDENCY_TIMEOUT: Duration = Duration::from_secs(5);

/// Application service for BRL conversions.
///
/// Generic over the history repository and the rate source - both adapters
/// are injected at compile time, so tests can swap in doubles.
pub struct ConverterService<R: HistoryRepository, P: RateSource> {
    repo: R,
    rates: P,
    recent_limit: i64,
    dependency_timeout: Duration,
}

impl<R: HistoryRepository, P: RateSource> ConverterService<R, P> {
    /// Creates a new service with the given repository and rate source.
    pub fn new(repo: R, rates: P) -> Self {
        Self {
            repo,
            rates,
            recent_limit: RECENT_LIMIT,
            dependency_timeout: DEFAULT_DEPENDENCY_TIMEOUT,
        }
    }

    /// Overrides the page size used by [`recent`](Self::recent).
    pub fn with_recent_limit(mut self, limit: i64) -> Self {
        self.recent_limit = limit;
        self
    }

    /// Overrides the per-call timeout for the rate source and the store.
    pub fn with_dependency_timeout(mut self, timeout: Duration) -> Self {
        self.dependency_timeout = timeout;
        self
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts `amount_brl` into `currency` and records the conversion.
    ///
    /// Succeeds only when the record was stored; on any failure nothing is
    /// returned and nothing is written.
    #[tracing::instrument(skip(self), fields(currency = %currency))]
    pub async fn convert(
        &self,
        currency: &CurrencyCode,
        amount_brl: f64,
    ) -> Result<f64, ConversionError> {
        tracing::info!(amount_brl, "Starting conversion");

        if !amount_brl.is_finite() {
            return Err(ConversionError::InvalidAmount(amount_brl));
        }

        let rate = self.lookup_rate(currency).await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to fetch rate from provider");
        })?;

        // Zero, negative or NaN would break `rate > 0` for stored records.
        if !(rate > 0.0 && rate.is_finite()) {
            tracing::warn!(rate, "Rate source returned an unusable rate");
            return Err(ConversionError::InvalidRate(rate));
        }

        let record = ConversionRecord::new(currency.clone(), rate, amount_brl);

        // A timed-out insert may still commit in the backend; the caller sees a failure either way.
        if let Err(e) = self.store_call(self.repo.insert(&record)).await {
            tracing::error!(error = %e, "Failed to save conversion history");
            return Err(ConversionError::PersistenceFailure);
        }

        tracing::info!(
            rate,
            converted_amount = record.converted_amount,
            "Conversion completed"
        );
        Ok(record.converted_amount)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // History
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists the most recent conversions, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn recent(&self) -> Result<Vec<ConversionRecord>, ConversionError> {
        tracing::info!(limit = self.recent_limit, "Fetching conversion history");

        let records = self
            .store_call(self.repo.query_recent(self.recent_limit))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to read recent conversions"))?
            .unwrap_or_default();

        tracing::info!(count = records.len(), "Conversion history fetched");
        Ok(records)
    }

    /// Computes the rate variation of every stored conversion of `currency`.
    #[tracing::instrument(skip(self), fields(currency = %currency))]
    pub async fn variation_for(
        &self,
        currency: &CurrencyCode,
    ) -> Result<Vec<CurrencyVariation>, ConversionError> {
        tracing::info!("Computing rate variation");

        let records = self
            .store_call(self.repo.query_by_currency(currency))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to read conversions by currency"))?;

        let variations = compute_variations(&records);

        tracing::info!(count = variations.len(), "Rate variation computed");
        Ok(variations)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Dependency calls
    // ─────────────────────────────────────────────────────────────────────────────

    async fn lookup_rate(&self, currency: &CurrencyCode) -> Result<f64, ConversionError> {
        match tokio::time::timeout(self.dependency_timeout, self.rates.get_rate(currency)).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => Err(RateError::Unavailable(format!(
                "rate lookup timed out after {:?}",
                self.dependency_timeout
            ))
            .into()),
        }
    }

    async fn store_call<T>(
        &self,
        call: impl Future<Output = Result<T, RepoError>>,
    ) -> Result<T, ConversionError> {
        match tokio::time::timeout(self.dependency_timeout, call).await {
            Ok(result) => result.map_err(ConversionError::Store),
            Err(_) => Err(ConversionError::Store(RepoError::Database(format!(
                "store call timed out after {:?}",
                self.dependency_timeout
            )))),
        }
    }
}
