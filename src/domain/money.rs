use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Amounts are exact decimals so that sums like 10 + 5.50 never pick up
/// binary floating-point noise before they are rounded for display.
pub type Amount = Decimal;

/// Round to cents, half away from zero.
/// Example: 2.345 -> 2.35, -2.345 -> -2.35, 2.344 -> 2.34
pub fn round_cents(amount: Amount) -> Amount {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount with exactly two decimal places, rounding half-up.
/// Example: 15.5 -> "15.50", 23.245 -> "23.25", 0 -> "0.00"
pub fn format_amount(amount: Amount) -> String {
    let mut rounded = round_cents(amount);
    rounded.rescale(2);
    rounded.to_string()
}

/// Largest magnitude accepted for a single amount: one quadrillion.
/// Keeps sums of any realistic ledger, and their conversions, inside
/// `Decimal`'s 96-bit range.
pub const MAX_AMOUNT: Amount = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Parse a plain or scientific decimal number into an amount.
/// Example: "50.00" -> 50.00, "5.5" -> 5.5, " 100 " -> 100, "1e3" -> 1000
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    // Float syntax only; rust_decimal would also take `1_000`.
    let float_syntax = input
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E'));
    if !float_syntax {
        return Err(ParseAmountError::InvalidFormat(input.to_string()));
    }

    match Decimal::from_str(input).or_else(|_| Decimal::from_scientific(input)) {
        Ok(amount) if amount.abs() <= MAX_AMOUNT => Ok(amount),
        Ok(_) => Err(ParseAmountError::OutOfRange(input.to_string())),
        Err(_) if input.parse::<f64>().is_ok_and(f64::is_finite) => {
            Err(ParseAmountError::OutOfRange(input.to_string()))
        }
        Err(_) => Err(ParseAmountError::InvalidFormat(input.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "empty amount"),
            ParseAmountError::InvalidFormat(s) => write!(f, "invalid money format: {s:?}"),
            ParseAmountError::OutOfRange(s) => {
                write!(f, "amount {s:?} is outside the supported range of ±{MAX_AMOUNT}")
            }
        }
    }
}

impl std::error::Error for ParseAmountError {}
