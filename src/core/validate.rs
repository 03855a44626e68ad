//! Input validation for conversion requests

use std::fmt::Display;
use std::str::FromStr;

/// A three letter, uppercase ISO style currency code such as `CAD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Matches `^[A-Z]{3}$` on the trimmed input.
    fn is_valid(code: &str) -> bool {
        code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = InvalidCurrencyCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if Self::is_valid(trimmed) {
            Ok(CurrencyCode(trimmed.to_ascii_uppercase()))
        } else {
            Err(InvalidCurrencyCode(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid currency code: {0:?}")]
pub struct InvalidCurrencyCode(pub String);

/// Why a set of raw inputs could not be turned into a [`ConversionRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Base currency must be a 3-letter UPPERCASE ISO code (e.g., CAD).")]
    InvalidBaseCurrency,

    #[error("Destination currency must be a 3-letter UPPERCASE ISO code (e.g., USD).")]
    InvalidTargetCurrency,

    #[error("Amount must be a positive, non-zero number.")]
    InvalidAmount,
}

/// A validated request, built fresh for every submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub base: CurrencyCode,
    pub target: CurrencyCode,
    pub amount: f64,
    /// The amount as typed, trimmed, for display
    pub amount_text: String,
}

/// Validates the three raw inputs, reporting the first rule that fails.
///
/// Rules are checked in order: base code, target code, then amount. Codes
/// must already be uppercase; they are only trimmed before the check.
pub fn validate(
    base: &str,
    target: &str,
    amount: &str,
) -> Result<ConversionRequest, ValidationError> {
    let base: CurrencyCode = base
        .parse()
        .map_err(|_| ValidationError::InvalidBaseCurrency)?;
    let target: CurrencyCode = target
        .parse()
        .map_err(|_| ValidationError::InvalidTargetCurrency)?;
    let amount_text = amount.trim().to_string();
    let amount = parse_amount(&amount_text).ok_or(ValidationError::InvalidAmount)?;

    Ok(ConversionRequest {
        base,
        target,
        amount,
        amount_text,
    })
}

fn parse_amount(text: &str) -> Option<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}
