use thiserror::Error;

use crate::domain::{ParseAmountError, TimestampError};
use crate::rates::RateError;

/// Failures a caller can see. None of them is fatal: each one degrades to a
/// partial or fallback result at the presentation layer.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Exchange rate unavailable: {0}")]
    RateUnavailable(#[from] RateError),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(#[from] TimestampError),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] ParseAmountError),
}
