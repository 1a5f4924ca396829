//! # Converter Hex
//!
//! Application service layer and HTTP adapter for the conversion service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (conversion, history, variation)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `R: HistoryRepository` and `P: RateSource`,
//! allowing different adapters to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::{ConverterService, DEFAULT_DEPENDENCY_TIMEOUT, RECENT_LIMIT};
