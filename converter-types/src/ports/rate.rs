//! Exchange rate source port.
//!
//! This trait defines the interface for quote services.
//! Implementations can be HTTP clients, static tables, test doubles, etc.

use crate::domain::CurrencyCode;

/// Error type for rate lookups.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RateError {
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Rate service unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid rate response: {0}")]
    InvalidResponse(String),
}

/// Port trait for BRL quote providers.
#[async_trait::async_trait]
pub trait RateSource: Send + Sync + 'static {
    /// Returns the current bid price of one unit of `currency`, in BRL.
    async fn get_rate(&self, currency: &CurrencyCode) -> Result<f64, RateError>;
}
