//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod rate;
mod repository;

pub use rate::{RateError, RateSource};
pub use repository::HistoryRepository;
