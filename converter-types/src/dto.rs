//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to convert a BRL amount.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConvertRequest {
    /// Target currency code, case-sensitive. Validated by the handler.
    #[schema(example = "USD")]
    pub currency: String,
    /// Amount in BRL
    #[schema(example = 100.0)]
    pub amount_brl: f64,
}

/// Response after a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConvertResponse {
    /// Amount in the target currency
    #[schema(example = 20.0)]
    pub converted_amount: f64,
}

/// Error body returned by the HTTP API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Currency not found or invalid: XYZ")]
    pub error: String,
    #[schema(example = 422)]
    pub code: u16,
}
