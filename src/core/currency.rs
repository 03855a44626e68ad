//! Currency conversion abstractions

use async_trait::async_trait;

use super::validate::CurrencyCode;

/// Why a rate could not be fetched for a currency pair.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {status} {reason}")]
    Http { status: u16, reason: String },

    #[error("Failed to fetch exchange rate. Please check your network connection or API key.")]
    Network(#[source] reqwest::Error),

    #[error("Unexpected API response format.")]
    UnexpectedFormat,

    #[error("Could not find exchange rate for the given currency pair.")]
    RateNotFound { base: CurrencyCode, target: CurrencyCode },

    #[error("Exchange rate for {target} is not a valid number: {value}")]
    InvalidRate { target: CurrencyCode, value: String },
}

impl FetchError {
    /// The HTTP status code, when the server answered with a non-success status.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    /// Returns how many units of `target` one unit of `base` buys.
    async fn get_rate(&self, base: &CurrencyCode, target: &CurrencyCode)
    -> Result<f64, FetchError>;
}
