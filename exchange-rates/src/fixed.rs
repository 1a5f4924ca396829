//! Static BRL quote table.
//!
//! Quotes are declared once in `define_quotes!`; the macro generates the
//! lookup functions. Fluctuation is off by default so tests see the base
//! rates.

use async_trait::async_trait;
use rand::Rng;

use converter_types::{CurrencyCode, RateError, RateSource};

/// Declares the static quote table.
///
/// # Syntax
/// ```ignore
/// define_quotes! {
///     "CODE" => (bid_in_brl, max_variance_percent),
/// }
/// ```
macro_rules! define_quotes {
    (
        $( $code:literal => ($bid:expr, $variance:expr) ),* $(,)?
    ) => {
        /// Base BRL bid and maximum fluctuation (percent) for `code`.
        fn lookup(code: &str) -> Option<(f64, f64)> {
            match code {
                $($code => Some(($bid, $variance)),)*
                _ => None,
            }
        }

        /// Codes known to the static table.
        pub fn supported_codes() -> &'static [&'static str] {
            &[$($code),*]
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// QUOTE DEFINITIONS - BRL per unit, add new codes here
// ─────────────────────────────────────────────────────────────────────────────

define_quotes! {
    "USD" => (5.0123, 0.5),
    "EUR" => (5.4310, 0.5),
    "GBP" => (6.3475, 0.5),
    "JPY" => (0.0335, 0.8),
    "ARS" => (0.0057, 2.0),
    "CAD" => (3.6890, 0.5),
    "CHF" => (5.7012, 0.4),
    "CNY" => (0.6921, 0.3),
    "BTC" => (345_000.0, 3.0),
}

/// Base (unfluctuated) BRL bid for `code`, if known.
pub fn base_rate(code: &str) -> Option<f64> {
    lookup(code).map(|(bid, _)| bid)
}

fn fluctuate(base_rate: f64, max_variance_percent: f64) -> f64 {
    let random_factor: f64 = rand::rng().random_range(-1.0..=1.0);
    let variance = base_rate * (max_variance_percent / 100.0) * random_factor;
    base_rate + variance
}

/// Rate source answering from the built-in table.
#[derive(Debug, Default, Clone)]
pub struct StaticRateSource {
    fluctuation: bool,
}

impl StaticRateSource {
    /// Quotes the base rates exactly.
    pub fn new() -> Self {
        Self { fluctuation: false }
    }

    /// Moves every quote randomly within its variance band, for realistic
    /// variation reports in development.
    pub fn with_fluctuation() -> Self {
        Self { fluctuation: true }
    }

    pub fn is_fluctuating(&self) -> bool {
        self.fluctuation
    }
}

#[async_trait]
impl RateSource for StaticRateSource {
    async fn get_rate(&self, currency: &CurrencyCode) -> Result<f64, RateError> {
        let (bid, variance) = lookup(currency.as_str())
            .ok_or_else(|| RateError::UnknownCurrency(currency.to_string()))?;

        if self.fluctuation {
            Ok(fluctuate(bid, variance))
        } else {
            Ok(bid)
        }
    }
}
