//! # Converter Client SDK
//!
//! A typed Rust client for the converter API.

use converter_types::{
    ConversionRecord, ConvertRequest, ConvertResponse, CurrencyCode, CurrencyVariation,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Converter API client.
pub struct ConverterClient {
    base_url: String,
    http: Client,
}

impl ConverterClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Converts `amount_brl` into `currency` and returns the converted amount.
    pub async fn convert(
        &self,
        currency: &CurrencyCode,
        amount_brl: f64,
    ) -> Result<f64, ClientError> {
        let req = ConvertRequest {
            currency: currency.to_string(),
            amount_brl,
        };
        let resp: ConvertResponse = self.post("/api/conversions", &req).await?;
        Ok(resp.converted_amount)
    }

    /// Most recent conversions, newest first.
    pub async fn recent(&self) -> Result<Vec<ConversionRecord>, ClientError> {
        self.get("/api/conversions").await
    }

    /// Rate variation history for one currency, oldest first.
    pub async fn variation(
        &self,
        currency: &CurrencyCode,
    ) -> Result<Vec<CurrencyVariation>, ClientError> {
        self.get(&format!("/api/variations/{}", currency)).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
