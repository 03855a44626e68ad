//! Conversion flow: validate, fetch a rate, derive the converted amount.

use tracing::{debug, info};

use super::currency::{CurrencyRateProvider, FetchError};
use super::validate::{ConversionRequest, ValidationError, validate};

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub request: ConversionRequest,
    pub rate: f64,
    pub converted_amount: f64,
}

impl ConversionResult {
    fn new(request: ConversionRequest, rate: f64) -> Self {
        let converted_amount = request.amount * rate;
        ConversionResult {
            request,
            rate,
            converted_amount,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Fetches the rate for an already validated request. Makes exactly one attempt.
pub async fn convert(
    request: ConversionRequest,
    provider: &dyn CurrencyRateProvider,
) -> Result<ConversionResult, FetchError> {
    let rate = provider.get_rate(&request.base, &request.target).await?;
    let result = ConversionResult::new(request, rate);
    debug!(
        rate = result.rate,
        converted = result.converted_amount,
        "Computed conversion"
    );
    Ok(result)
}

#[derive(Debug, Default)]
pub enum ConversionState {
    #[default]
    Idle,
    Converted(ConversionResult),
    Failed(ConversionError),
}

/// Holds the outcome of the most recent conversion attempt.
///
/// `submit` borrows the session mutably, so only one attempt can be in flight.
#[derive(Debug, Default)]
pub struct ConversionSession {
    state: ConversionState,
}

impl ConversionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ConversionState {
        &self.state
    }

    pub fn result(&self) -> Option<&ConversionResult> {
        match &self.state {
            ConversionState::Converted(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ConversionError> {
        match &self.state {
            ConversionState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Discards any previous result or error.
    pub fn reset(&mut self) {
        self.state = ConversionState::Idle;
    }

    /// Runs one attempt from raw user input. The previous outcome is cleared
    /// before anything else happens, whatever this attempt produces.
    pub async fn submit(
        &mut self,
        base: &str,
        target: &str,
        amount: &str,
        provider: &dyn CurrencyRateProvider,
    ) -> &ConversionState {
        self.reset();

        let request = match validate(base, target, amount) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "Rejected conversion input");
                self.state = ConversionState::Failed(e.into());
                return &self.state;
            }
        };

        info!(
            base = %request.base,
            target = %request.target,
            amount = request.amount,
            "Converting"
        );
        self.state = match convert(request, provider).await {
            Ok(result) => ConversionState::Converted(result),
            Err(e) => ConversionState::Failed(e.into()),
        };
        &self.state
    }
}
