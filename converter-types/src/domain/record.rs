//! Conversion history record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::currency::CurrencyCode;

/// Unique identifier for a ConversionRecord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "123e4567-e89b-12d3-a456-426614174000")]
pub struct RecordId(Uuid);

impl RecordId {
    /// Creates a new random RecordId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a RecordId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// One BRL conversion, as written to the history.
///
/// Records are immutable once created. Only the conversion engine builds
/// new ones, and only after it has checked that `rate > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConversionRecord {
    pub id: RecordId,
    /// Currency the BRL amount was converted into
    #[serde(rename = "currency")]
    pub target_currency: CurrencyCode,
    /// BRL price of one unit of `target_currency`
    #[schema(example = 5.0)]
    pub rate: f64,
    /// Amount supplied by the caller, in BRL
    #[schema(example = 100.0)]
    pub input_amount: f64,
    /// `input_amount / rate`
    #[schema(example = 20.0)]
    pub converted_amount: f64,
    #[schema(value_type = String, example = "2024-01-01T00:00:00Z")]
    pub timestamp: DateTime<Utc>,
}

impl ConversionRecord {
    /// Records a conversion performed now.
    pub fn new(target_currency: CurrencyCode, rate: f64, input_amount: f64) -> Self {
        Self {
            id: RecordId::new(),
            target_currency,
            rate,
            input_amount,
            converted_amount: input_amount / rate,
            timestamp: Utc::now(),
        }
    }

    /// Reconstructs a record from stored fields.
    pub fn from_parts(
        id: RecordId,
        target_currency: CurrencyCode,
        rate: f64,
        input_amount: f64,
        converted_amount: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            target_currency,
            rate,
            input_amount,
            converted_amount,
            timestamp,
        }
    }
}
