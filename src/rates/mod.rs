//! Where conversion rates come from.
//!
//! The service only sees the [`RateProvider`] trait. Each call is a fresh
//! single attempt; there is no caching and no retry at this layer.

mod open_exchange;

pub use open_exchange::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ConversionRate;

#[derive(Error, Debug)]
pub enum RateError {
    #[error("No rate API credential configured")]
    MissingCredential,

    #[error("Rate endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("Rate endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Malformed rate response: {0}")]
    Malformed(String),

    #[error("Exchange rate for {0} not found")]
    MissingRate(String),

    #[error("Invalid exchange rate for {currency}: {value}")]
    InvalidRate { currency: String, value: f64 },
}

/// Source of the current rate for the configured currency pair.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn get_rate(&self) -> Result<ConversionRate, RateError>;
}

/// A provider that always answers with the same rate.
/// Used for `--rate` overrides and offline runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedRateProvider {
    rate: ConversionRate,
}

impl FixedRateProvider {
    pub fn new(rate: ConversionRate) -> Self {
        Self { rate }
    }
}

#[async_trait]
impl RateProvider for FixedRateProvider {
    async fn get_rate(&self) -> Result<ConversionRate, RateError> {
        Ok(self.rate)
    }
}
