//! Domain models for the conversion service.

pub mod currency;
pub mod record;
pub mod variation;

pub use currency::CurrencyCode;
pub use record::{ConversionRecord, RecordId};
pub use variation::{CurrencyVariation, compute_variations};
