use crate::config::ConverterConfig;
use crate::domain::{
    aggregate, format_amount, parse_amount, parse_ledger, Amount, ConversionRate,
    LocalizedInstant, ParseAmountError, Summary, ZoneProfile, FALLBACK_TIMESTAMP_DISPLAY,
};
use crate::rates::{OpenExchangeRatesProvider, RateProvider};

use super::AppError;

/// Application service providing the conversion operations.
/// This is the primary interface for any client (CLI, API, TUI, etc.).
pub struct ConverterService {
    provider: Box<dyn RateProvider>,
    config: ConverterConfig,
}

/// Result of converting a single amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub source_amount: Amount,
    pub rate: ConversionRate,
    pub target_amount: String,
    pub target_currency: String,
}

impl Conversion {
    /// Display line such as "AUD: $23.25".
    pub fn display(&self) -> String {
        format!("{}: ${}", self.target_currency, self.target_amount)
    }
}

/// Civil time and offset label, or the fallback text when localization failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeDisplay {
    pub display: String,
    pub offset_label: String,
}

impl TimeDisplay {
    pub fn fallback() -> Self {
        Self {
            display: FALLBACK_TIMESTAMP_DISPLAY.to_string(),
            offset_label: String::new(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.display == FALLBACK_TIMESTAMP_DISPLAY && self.offset_label.is_empty()
    }
}

impl From<LocalizedInstant> for TimeDisplay {
    fn from(instant: LocalizedInstant) -> Self {
        Self {
            display: instant.display,
            offset_label: instant.offset_label,
        }
    }
}

/// Outcome of the combined amount + timestamp action. Each half is `None`
/// when its input was left empty.
#[derive(Debug)]
pub struct CombinedResult {
    pub conversion: Result<Option<Conversion>, AppError>,
    pub time: Option<TimeDisplay>,
}

/// Multiply a source amount by `rate` and format to 2 decimals, half-up.
/// Empty input means there is nothing to convert and yields `Ok(None)`.
pub fn convert_amount(
    source: &str,
    rate: &ConversionRate,
) -> Result<Option<String>, ParseAmountError> {
    if source.trim().is_empty() {
        return Ok(None);
    }
    let amount = parse_amount(source)?;
    let target = rate
        .apply(amount)
        .ok_or_else(|| ParseAmountError::OutOfRange(source.trim().to_string()))?;
    Ok(Some(format_amount(target)))
}

/// Localize for display in `zone`, substituting the fixed fallback on failure.
pub fn localize_for_display(zone: &ZoneProfile, timestamp: &str) -> TimeDisplay {
    match zone.localize(timestamp) {
        Ok(instant) => instant.into(),
        Err(e) => {
            tracing::warn!("Could not convert timestamp {:?}: {}", timestamp, e);
            TimeDisplay::fallback()
        }
    }
}

impl ConverterService {
    /// Create a service around any rate provider.
    pub fn new(provider: Box<dyn RateProvider>, config: ConverterConfig) -> Self {
        Self { provider, config }
    }

    pub fn with_provider<P: RateProvider + 'static>(provider: P, config: ConverterConfig) -> Self {
        Self::new(Box::new(provider), config)
    }

    /// Create a service that fetches live rates from the configured endpoint.
    /// A missing credential only surfaces once a rate is actually needed.
    pub fn from_config(config: ConverterConfig) -> Result<Self, AppError> {
        let provider = OpenExchangeRatesProvider::new(&config)?;
        Ok(Self::with_provider(provider, config))
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Fetch a fresh rate. One attempt, no caching.
    pub async fn fetch_rate(&self) -> Result<ConversionRate, AppError> {
        Ok(self.provider.get_rate().await?)
    }

    // ========================
    // Single amount
    // ========================

    /// Convert one source amount. The amount is validated before any rate is
    /// fetched, and an empty amount never touches the network.
    pub async fn convert(&self, amount: &str) -> Result<Option<Conversion>, AppError> {
        if amount.trim().is_empty() {
            return Ok(None);
        }
        let source_amount = parse_amount(amount)?;

        let rate = self.fetch_rate().await?;
        let target = rate
            .apply(source_amount)
            .ok_or_else(|| ParseAmountError::OutOfRange(amount.trim().to_string()))?;

        Ok(Some(Conversion {
            source_amount,
            rate,
            target_amount: format_amount(target),
            target_currency: self.config.target_currency.clone(),
        }))
    }

    // ========================
    // Timestamps
    // ========================

    pub fn localize(&self, timestamp: &str) -> Result<LocalizedInstant, AppError> {
        Ok(self.config.zone.localize(timestamp)?)
    }

    pub fn localize_or_fallback(&self, timestamp: &str) -> TimeDisplay {
        localize_for_display(&self.config.zone, timestamp)
    }

    // ========================
    // Ledger
    // ========================

    /// Parse and total a ledger. A rate is fetched only when the ledger holds
    /// money entries; if that fetch fails the summary is partial instead of
    /// failing, so duration totals are still reported.
    pub async fn summarize(&self, text: &str) -> Summary {
        let ledger = parse_ledger(text);
        tracing::debug!(
            entries = ledger.len(),
            money = ledger.money().count(),
            durations = ledger.durations().count(),
            "Parsed ledger"
        );

        if !ledger.has_money() {
            return aggregate(&ledger, None);
        }

        match self.fetch_rate().await {
            Ok(rate) => aggregate(&ledger, Some(&rate)),
            Err(e) => {
                tracing::warn!("Skipping currency conversion: {}", e);
                aggregate(&ledger, None)
            }
        }
    }

    // ========================
    // Combined action
    // ========================

    /// Run the amount conversion and the timestamp localization together.
    /// Either input may be absent or empty; a failure in one half does not
    /// affect the other.
    pub async fn run(&self, amount: Option<&str>, timestamp: Option<&str>) -> CombinedResult {
        let conversion = match amount {
            Some(amount) => self.convert(amount).await,
            None => Ok(None),
        };

        let time = timestamp
            .filter(|ts| !ts.trim().is_empty())
            .map(|ts| self.localize_or_fallback(ts));

        CombinedResult { conversion, time }
    }
}
