//! Rate variation between consecutive conversions of one currency.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::record::ConversionRecord;

/// A history record annotated with its change against the previous one.
///
/// Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CurrencyVariation {
    #[schema(value_type = String, example = "2024-01-01T00:00:00Z")]
    pub timestamp: DateTime<Utc>,
    #[schema(example = 33.0)]
    pub rate: f64,
    /// `rate - previous_rate`, 0 for the first record
    #[schema(example = 3.0)]
    pub value_delta: f64,
    /// `value_delta / previous_rate * 100`, 0 for the first record
    #[schema(example = 10.0)]
    pub percent_delta: f64,
}

/// Computes the variation of each record against its predecessor.
///
/// `records` must already be filtered to one currency and sorted oldest
/// first; the output keeps that order. Every stored rate is positive, so
/// the percentage division is never by zero.
pub fn compute_variations(records: &[ConversionRecord]) -> Vec<CurrencyVariation> {
    let mut previous: Option<f64> = None;

    records
        .iter()
        .map(|record| {
            let (value_delta, percent_delta) = match previous {
                Some(prev) => {
                    let delta = record.rate - prev;
                    (delta, (delta / prev) * 100.0)
                }
                None => (0.0, 0.0),
            };
            previous = Some(record.rate);

            CurrencyVariation {
                timestamp: record.timestamp,
                rate: record.rate,
                value_delta,
                percent_delta,
            }
        })
        .collect()
}
