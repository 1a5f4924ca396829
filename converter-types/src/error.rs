//! Error types for the conversion service.

use crate::ports::RateError;

/// Domain-level errors (invalid input values).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),
}

/// Repository-level errors (history store failures).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Failures of the three core operations.
///
/// `RateSource` and `Store` are dependency failures: they carry the
/// collaborator's error unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Currency not found: {0}")]
    UnknownCurrency(String),

    #[error("Invalid exchange rate: {0}")]
    InvalidRate(f64),

    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("Failed to save conversion")]
    PersistenceFailure,

    #[error("Rate source failure: {0}")]
    RateSource(RateError),

    #[error(transparent)]
    Store(#[from] RepoError),
}

impl ConversionError {
    /// True when a collaborator (rate source or store) failed.
    pub fn is_dependency_failure(&self) -> bool {
        matches!(
            self,
            ConversionError::RateSource(_) | ConversionError::Store(_)
        )
    }
}

impl From<RateError> for ConversionError {
    fn from(err: RateError) -> Self {
        match err {
            RateError::UnknownCurrency(code) => ConversionError::UnknownCurrency(code),
            other => ConversionError::RateSource(other),
        }
    }
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Bad gateway: {0}")]
    BadGateway(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::UnknownCurrency(code) => {
                AppError::UnprocessableEntity(format!("Currency not found or invalid: {}", code))
            }
            ConversionError::InvalidAmount(_) => AppError::BadRequest(err.to_string()),
            ConversionError::InvalidRate(_) | ConversionError::RateSource(_) => {
                AppError::BadGateway(err.to_string())
            }
            ConversionError::PersistenceFailure => AppError::Internal(err.to_string()),
            ConversionError::Store(_) => {
                AppError::Internal("Failed to read conversion history".into())
            }
        }
    }
}
