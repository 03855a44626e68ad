//! Core conversion logic

pub mod config;
pub mod conversion;
pub mod currency;
pub mod log;
pub mod validate;

// Re-export main types for cleaner imports
pub use conversion::{ConversionError, ConversionResult, ConversionSession, ConversionState};
pub use currency::{CurrencyRateProvider, FetchError};
pub use validate::{ConversionRequest, CurrencyCode, ValidationError};
