//! Offline conversion from a rates file.
//!
//! The file has the shape `{"base": "BRL", "date": "...", "rates": {"USD": 0.19}}`
//! where each rate is units of the target currency per unit of the base.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum LocalError {
    #[error("Error reading file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Error parsing JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Currency not found: {0}")]
    UnknownCurrency(String),
}

#[derive(Debug, Deserialize)]
pub struct RatesFile {
    pub base: String,
    pub date: String,
    pub rates: HashMap<String, f64>,
}

impl RatesFile {
    pub fn load(path: &Path) -> Result<Self, LocalError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LocalError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, LocalError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// `amount × rates[currency]`. Lookup is exact, so codes are case-sensitive.
    pub fn convert(&self, amount: f64, currency: &str) -> Result<f64, LocalError> {
        self.rates
            .get(currency)
            .map(|rate| amount * rate)
            .ok_or_else(|| LocalError::UnknownCurrency(currency.to_string()))
    }
}

/// `"{result:.2} {CODE}"`, the line printed by `converter local`.
pub fn format_result(result: f64, currency: &str) -> String {
    format!("{:.2} {}", result, currency)
}
