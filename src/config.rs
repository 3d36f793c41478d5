use std::time::Duration;

use crate::domain::ZoneProfile;

/// Default latest-rates endpoint (openexchangerates.org API shape).
pub const DEFAULT_RATES_ENDPOINT: &str = "https://openexchangerates.org/api/latest.json";
pub const DEFAULT_SOURCE_CURRENCY: &str = "USD";
pub const DEFAULT_TARGET_CURRENCY: &str = "AUD";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Everything the converter needs that is not user input.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Latest-rates endpoint, without query parameters
    pub endpoint: String,
    /// Access credential sent as `app_id`
    pub app_id: Option<String>,
    pub source_currency: String,
    pub target_currency: String,
    /// Upper bound for a single rate request
    pub timeout: Duration,
    /// Zone used when localizing timestamps
    pub zone: ZoneProfile,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_RATES_ENDPOINT.to_string(),
            app_id: None,
            source_currency: DEFAULT_SOURCE_CURRENCY.to_string(),
            target_currency: DEFAULT_TARGET_CURRENCY.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            zone: ZoneProfile::melbourne(),
        }
    }
}

impl ConverterConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
