//! BRL Quote Sources
//!
//! Adapters implementing the [`RateSource`](converter_types::RateSource) port.
//! Every source answers the same question: how many BRL does one unit of a
//! currency cost right now.
//!
//! - [`AwesomeApiRateSource`] - live quotes from the AwesomeAPI `last` endpoint
//! - [`StaticRateSource`] - hard-coded quotes for development and testing,
//!   optionally with random fluctuation
//!
//! # Example
//! ```
//! use converter_types::{CurrencyCode, RateSource};
//! use exchange_rates::StaticRateSource;
//!
//! # async fn demo() {
//! let rates = StaticRateSource::new();
//! let usd = CurrencyCode::parse("USD").unwrap();
//! let bid = rates.get_rate(&usd).await.unwrap();
//! assert!(bid > 0.0);
//! # }
//! ```

mod awesome;
mod fixed;

pub use awesome::{AwesomeApiRateSource, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use fixed::{StaticRateSource, base_rate, supported_codes};

use std::fmt;
use std::str::FromStr;

/// Which rate source the server should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSourceKind {
    /// Live AwesomeAPI quotes
    Awesome,
    /// Built-in static table
    Static,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown rate source: {0} (expected \"awesome\" or \"static\")")]
pub struct UnknownRateSourceKind(String);

impl FromStr for RateSourceKind {
    type Err = UnknownRateSourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "awesome" | "awesomeapi" => Ok(RateSourceKind::Awesome),
            "static" => Ok(RateSourceKind::Static),
            _ => Err(UnknownRateSourceKind(s.to_string())),
        }
    }
}

impl fmt::Display for RateSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateSourceKind::Awesome => write!(f, "awesome"),
            RateSourceKind::Static => write!(f, "static"),
        }
    }
}
