//! Type-safe price representation using decimal arithmetic.
//!
//! Medusa v2 reports amounts in the currency's standard unit (`10.5` means
//! ten and a half dollars, not cents) together with a lowercase ISO 4217
//! code on the owning cart, order or region.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Currency code is not three ASCII letters.
    #[error("invalid currency code: {0:?}")]
    InvalidCurrency(String),
}

/// A price with currency information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code, normalized to uppercase.
    pub currency_code: String,
}

impl Price {
    /// Create a new price, normalizing the currency code.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::InvalidCurrency`] unless the code is three
    /// ASCII letters.
    pub fn new(amount: Decimal, currency_code: &str) -> Result<Self, PriceError> {
        let code = currency_code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PriceError::InvalidCurrency(currency_code.to_string()));
        }
        Ok(Self {
            amount,
            currency_code: code.to_ascii_uppercase(),
        })
    }

    /// Multiply the unit amount by a quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(quantity),
            currency_code: self.currency_code.clone(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency_code)
    }
}
