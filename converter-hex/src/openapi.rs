//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use converter_types::domain::{ConversionRecord, CurrencyCode, CurrencyVariation, RecordId};
use converter_types::dto::{ConvertRequest, ConvertResponse, ErrorResponse};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Convert a BRL amount into another currency
#[utoipa::path(
    post,
    path = "/api/conversions",
    tag = "conversions",
    request_body = ConvertRequest,
    responses(
        (status = 200, description = "Conversion computed and recorded", body = ConvertResponse),
        (status = 400, description = "Invalid currency code or amount", body = ErrorResponse),
        (status = 422, description = "Currency not supported by the rate source", body = ErrorResponse),
        (status = 502, description = "Rate source failed or returned an invalid rate", body = ErrorResponse),
        (status = 500, description = "Conversion could not be saved", body = ErrorResponse)
    )
)]
async fn convert() {}

/// List the most recent conversions
#[utoipa::path(
    get,
    path = "/api/conversions",
    tag = "conversions",
    responses(
        (status = 200, description = "Up to 10 conversions, newest first", body = Vec<ConversionRecord>),
        (status = 500, description = "History store failure", body = ErrorResponse)
    )
)]
async fn list_conversions() {}

/// Rate variation between consecutive conversions of one currency
#[utoipa::path(
    get,
    path = "/api/variations/{currency}",
    tag = "variations",
    params(
        ("currency" = String, Path, description = "Currency code, case-sensitive", example = "USD")
    ),
    responses(
        (status = 200, description = "Variations, oldest first", body = Vec<CurrencyVariation>),
        (status = 400, description = "Invalid currency code", body = ErrorResponse),
        (status = 500, description = "History store failure", body = ErrorResponse)
    )
)]
async fn variation() {}

/// OpenAPI documentation for the Converter API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "BRL Converter API",
        version = "1.0.0",
        description = "Converts Brazilian Real amounts using live quotes, keeps a history of every conversion and reports rate variation per currency.",
        license(name = "MIT"),
    ),
    paths(health, convert, list_conversions, variation),
    components(
        schemas(
            ConvertRequest,
            ConvertResponse,
            ErrorResponse,
            ConversionRecord,
            CurrencyVariation,
            CurrencyCode,
            RecordId,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "conversions", description = "BRL conversion and history"),
        (name = "variations", description = "Rate variation per currency"),
    )
)]
pub struct ApiDoc;
