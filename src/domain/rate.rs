use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Amount;

/// Units of the target currency bought by one unit of the source currency.
/// Always strictly positive. Fetched fresh for each conversion, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct ConversionRate(Decimal);

impl ConversionRate {
    /// Build a rate from a JSON-style float. The shortest decimal
    /// representation of the float is kept, so 1.52 stays 1.52.
    pub fn from_f64(value: f64) -> Result<Self, InvalidRate> {
        if !value.is_finite() {
            return Err(InvalidRate(value.to_string()));
        }
        let decimal = Decimal::from_str(&value.to_string())
            .or_else(|_| Decimal::try_from(value))
            .map_err(|_| InvalidRate(value.to_string()))?;
        Self::from_decimal(decimal)
    }

    pub fn from_decimal(value: Decimal) -> Result<Self, InvalidRate> {
        if value <= Decimal::ZERO {
            return Err(InvalidRate(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    /// Convert a source amount into the target currency (unrounded).
    /// `None` when the product does not fit in an `Amount`.
    pub fn apply(&self, amount: Amount) -> Option<Amount> {
        amount.checked_mul(self.0)
    }
}

impl fmt::Display for ConversionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for ConversionRate {
    type Error = InvalidRate;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl From<ConversionRate> for Decimal {
    fn from(rate: ConversionRate) -> Self {
        rate.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRate(pub String);

impl fmt::Display for InvalidRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rate must be a positive finite number, got {}", self.0)
    }
}

impl std::error::Error for InvalidRate {}
