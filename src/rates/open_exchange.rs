//! Latest-rate lookups against an openexchangerates.org style endpoint.
//!
//! Request: `GET <endpoint>?app_id=<id>&symbols=<TARGET>&prettyprint=false`
//! Response: `{ "rates": { "AUD": 1.52, ... }, ... }`

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use super::{RateError, RateProvider};
use crate::config::ConverterConfig;
use crate::domain::ConversionRate;

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    #[serde(default)]
    rates: Option<HashMap<String, serde_json::Value>>,
}

/// Pull the target currency's rate out of a latest-rates JSON body.
pub fn parse_rates_body(body: &str, target_currency: &str) -> Result<ConversionRate, RateError> {
    let response: LatestRatesResponse =
        serde_json::from_str(body).map_err(|e| RateError::Malformed(e.to_string()))?;

    let rates = response
        .rates
        .ok_or_else(|| RateError::Malformed("missing `rates` field".to_string()))?;

    let value = rates
        .get(target_currency)
        .ok_or_else(|| RateError::MissingRate(target_currency.to_string()))?;

    let value = value.as_f64().ok_or_else(|| {
        RateError::Malformed(format!("rate for {target_currency} is not a number: {value}"))
    })?;

    ConversionRate::from_f64(value).map_err(|_| RateError::InvalidRate {
        currency: target_currency.to_string(),
        value,
    })
}

pub struct OpenExchangeRatesProvider {
    client: reqwest::Client,
    endpoint: String,
    app_id: Option<String>,
    source_currency: String,
    target_currency: String,
}

impl OpenExchangeRatesProvider {
    pub fn new(config: &ConverterConfig) -> Result<Self, RateError> {
        let app_id = config.app_id.clone().filter(|id| !id.trim().is_empty());

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RateError::Unreachable(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            app_id,
            source_currency: config.source_currency.clone(),
            target_currency: config.target_currency.clone(),
        })
    }

    /// Full request URL, credential included.
    pub fn request_url(&self) -> Result<Url, RateError> {
        let app_id = self.app_id.as_deref().ok_or(RateError::MissingCredential)?;
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("app_id", app_id),
                ("symbols", self.target_currency.as_str()),
                ("prettyprint", "false"),
            ],
        )
        .map_err(|e| RateError::Unreachable(format!("invalid endpoint {}: {e}", self.endpoint)))
    }
}

#[async_trait]
impl RateProvider for OpenExchangeRatesProvider {
    async fn get_rate(&self) -> Result<ConversionRate, RateError> {
        let url = self.request_url()?;
        tracing::debug!(endpoint = %self.endpoint, symbols = %self.target_currency, "Fetching exchange rate");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RateError::Unreachable(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RateError::Malformed(e.without_url().to_string()))?;

        let rate = parse_rates_body(&body, &self.target_currency)?;
        tracing::info!(
            "Currently 1 {} = {} {}",
            self.source_currency,
            rate,
            self.target_currency
        );
        Ok(rate)
    }
}
