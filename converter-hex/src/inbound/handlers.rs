//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use converter_types::{
    AppError, ConversionError, ConvertRequest, ConvertResponse, CurrencyCode, DomainError,
    ErrorResponse, HistoryRepository, RateSource,
};

use crate::ConverterService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<R: HistoryRepository, P: RateSource> {
    pub service: ConverterService<R, P>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<ConversionError> for ApiError {
    fn from(err: ConversionError) -> Self {
        ApiError(err.into())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = ErrorResponse {
            error: message,
            code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Serves the OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Convert a BRL amount and record it in the history.
#[tracing::instrument(skip(state), fields(currency = %req.currency, amount_brl = req.amount_brl))]
pub async fn convert<R: HistoryRepository, P: RateSource>(
    State(state): State<Arc<AppState<R, P>>>,
    Json(req): Json<ConvertRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let currency = CurrencyCode::parse(req.currency)?;

    let converted_amount = state
        .service
        .convert(&currency, req.amount_brl)
        .await
        .inspect_err(|e| match e {
            ConversionError::UnknownCurrency(_) => {
                tracing::warn!("Requested currency is not supported")
            }
            other => tracing::error!(error = %other, "Conversion failed"),
        })?;

    Ok(Json(ConvertResponse { converted_amount }))
}

/// List the most recent conversions.
#[tracing::instrument(skip(state))]
pub async fn list_conversions<R: HistoryRepository, P: RateSource>(
    State(state): State<Arc<AppState<R, P>>>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.service.recent().await?;
    Ok(Json(records))
}

/// Rate variation for one currency.
#[tracing::instrument(skip(state))]
pub async fn variation<R: HistoryRepository, P: RateSource>(
    State(state): State<Arc<AppState<R, P>>>,
    Path(currency): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let currency = CurrencyCode::parse(currency)?;

    let variations = state.service.variation_for(&currency).await?;
    Ok((StatusCode::OK, Json(variations)))
}
