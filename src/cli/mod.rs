use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::{
    localize_for_display, AppError, CombinedResult, Conversion, ConverterService, TimeDisplay,
};
use crate::config::{ConverterConfig, DEFAULT_RATES_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use crate::domain::ConversionRate;
use crate::io::{CurrencyPair, SummaryExporter};
use crate::rates::FixedRateProvider;

/// Tallyconv - currency, time and ledger conversions
#[derive(Parser)]
#[command(name = "tallyconv")]
#[command(about = "Convert USD to AUD, localize timestamps to Melbourne time, and total money/time ledgers")]
#[command(version)]
pub struct Cli {
    /// Exchange-rate API credential
    #[arg(long, env = "OXR_APP_ID", hide_env_values = true, global = true)]
    pub app_id: Option<String>,

    /// Latest-rates endpoint
    #[arg(long, env = "OXR_ENDPOINT", default_value = DEFAULT_RATES_ENDPOINT, global = true)]
    pub endpoint: String,

    /// Use this USD->AUD rate instead of fetching one
    #[arg(long, global = true)]
    pub rate: Option<f64>,

    /// Timeout for the rate request, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a USD amount to AUD
    Convert {
        /// Amount in USD (e.g., "50.00" or "50")
        amount: String,
    },

    /// Show a millisecond UNIX timestamp as Melbourne time
    Localize {
        /// Milliseconds since the epoch (e.g., 1743413520776)
        timestamp: String,
    },

    /// Total the money and time lines of a ledger
    Summarize {
        /// Ledger file (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format: table, json, csv
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Convert an amount and a timestamp in one go
    Run {
        /// Amount in USD
        #[arg(short, long)]
        amount: Option<String>,

        /// Milliseconds since the epoch
        #[arg(short, long)]
        timestamp: Option<String>,
    },
}

impl Cli {
    pub fn config(&self) -> ConverterConfig {
        let mut config = ConverterConfig::default()
            .with_endpoint(self.endpoint.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(app_id) = &self.app_id {
            config = config.with_app_id(app_id.clone());
        }
        config
    }

    /// Build the service: a fixed rate when `--rate` is given, the live
    /// endpoint otherwise.
    fn service(&self) -> Result<ConverterService> {
        let config = self.config();
        match self.rate {
            Some(rate) => {
                let rate = ConversionRate::from_f64(rate).context("Invalid --rate value")?;
                Ok(ConverterService::with_provider(
                    FixedRateProvider::new(rate),
                    config,
                ))
            }
            None => ConverterService::from_config(config).context("Failed to set up rate client"),
        }
    }

    pub async fn run(self) -> Result<()> {
        match &self.command {
            Commands::Convert { amount } => {
                let service = self.service()?;
                match service.convert(amount).await {
                    Ok(None) => println!("Nothing to convert"),
                    result => report_conversion(result),
                }
            }

            Commands::Localize { timestamp } => {
                print_time(&localize_for_display(&self.config().zone, timestamp));
            }

            Commands::Summarize { input, format } => {
                let text = read_input(input.as_ref())?;
                let service = self.service()?;
                let summary = service.summarize(&text).await;

                let config = service.config();
                let exporter = SummaryExporter::new(
                    &summary,
                    CurrencyPair {
                        source: config.source_currency.clone(),
                        target: config.target_currency.clone(),
                    },
                );
                exporter.export(format, std::io::stdout().lock())?;
            }

            Commands::Run { amount, timestamp } => {
                let service = self.service()?;
                let result = service
                    .run(amount.as_deref(), timestamp.as_deref())
                    .await;
                print_combined(result);
            }
        }

        Ok(())
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read ledger file '{}'", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read ledger from stdin")?;
            Ok(text)
        }
    }
}

fn print_time(time: &TimeDisplay) {
    println!("{}", time.display);
    if !time.offset_label.is_empty() {
        println!("{}", time.offset_label);
    }
}

/// Print a conversion outcome. Failures are reported but never end the
/// process with an error.
fn report_conversion(result: Result<Option<Conversion>, AppError>) {
    match result {
        Ok(Some(conversion)) => println!("{}", conversion.display()),
        Ok(None) => {}
        // Bad input just suppresses the converted amount.
        Err(AppError::InvalidAmount(e)) => tracing::warn!("Skipping conversion: {}", e),
        Err(e) => eprintln!("Conversion failed: {}", e),
    }
}

fn print_combined(result: CombinedResult) {
    report_conversion(result.conversion);

    if let Some(time) = &result.time {
        print_time(time);
    }
}
