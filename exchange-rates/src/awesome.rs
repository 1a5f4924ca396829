//! AwesomeAPI quote client.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use converter_types::{CurrencyCode, RateError, RateSource};

/// Public AwesomeAPI host.
pub const DEFAULT_BASE_URL: &str = "https://economia.awesomeapi.com.br";

/// Request timeout applied to every quote lookup.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// One entry of the `/json/last/{PAIR}` answer. Only the bid is used.
#[derive(Deserialize, Debug)]
struct Quote {
    bid: String,
}

/// Live quotes from `GET {base_url}/json/last/{CODE}-BRL`.
pub struct AwesomeApiRateSource {
    base_url: String,
    http: Client,
}

impl AwesomeApiRateSource {
    /// Creates a client for `base_url` with the default timeout.
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl RateSource for AwesomeApiRateSource {
    #[instrument(name = "AwesomeApiRateFetch", skip(self), fields(currency = %currency))]
    async fn get_rate(&self, currency: &CurrencyCode) -> Result<f64, RateError> {
        let url = format!("{}/json/last/{}-BRL", self.base_url, currency);
        debug!("Requesting quote from {}", url);

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| RateError::Unavailable(format!("quote request failed: {e}")))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(RateError::UnknownCurrency(currency.to_string()));
        }
        if !status.is_success() {
            return Err(RateError::Unavailable(format!(
                "quote service answered {status}"
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| RateError::Unavailable(format!("failed to read quote response: {e}")))?;

        let quotes: HashMap<String, Quote> = serde_json::from_str(&body)
            .map_err(|e| RateError::InvalidResponse(format!("failed to decode quote: {e}")))?;

        let key = format!("{}BRL", currency);
        let quote = quotes
            .get(&key)
            .ok_or_else(|| RateError::UnknownCurrency(currency.to_string()))?;

        let bid: f64 = quote
            .bid
            .trim()
            .parse()
            .map_err(|_| RateError::InvalidResponse(format!("invalid bid {:?}", quote.bid)))?;

        debug!(bid, "Quote received");
        Ok(bid)
    }
}
