//! Price value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Amount in major units plus an ISO currency code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    amount: f64,
    currency: String,
}

impl Price {
    /// Creates a price. The amount must be finite and non-negative, the
    /// currency a three-letter code (stored uppercase).
    pub fn new(amount: f64, currency: impl Into<String>) -> Result<Self, ValidationError> {
        validate_amount("price.amount", amount)?;
        let currency = normalize_currency(&currency.into())?;
        Ok(Self { amount, currency })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

pub(crate) fn validate_amount(field: &str, amount: f64) -> Result<(), ValidationError> {
    if !amount.is_finite() {
        return Err(ValidationError::invalid_format(field, "must be a finite number"));
    }
    if amount < 0.0 {
        return Err(ValidationError::invalid_format(field, "must not be negative"));
    }
    Ok(())
}

pub(crate) fn normalize_currency(currency: &str) -> Result<String, ValidationError> {
    let currency = currency.trim().to_uppercase();
    if currency.is_empty() {
        return Err(ValidationError::empty_field("currency"));
    }
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::invalid_format(
            "currency",
            "expected a three-letter code",
        ));
    }
    Ok(currency)
}
