use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{format_amount, Amount, ConversionRate, ParsedLedger};

/// Totals derived from a parsed ledger.
///
/// `total_target_amount` is `None` when no rate was available: that is a
/// partial summary, and it must not be shown as a zero conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_hours: u64,
    pub total_minutes: u32,
    pub total_source_amount: String,
    pub total_target_amount: Option<String>,
}

impl Summary {
    pub fn is_partial(&self) -> bool {
        self.total_target_amount.is_none()
    }

    /// Duration as shown to users, e.g. "3h 30min".
    pub fn duration_display(&self) -> String {
        format!("{}h {}min", self.total_hours, self.total_minutes)
    }
}

/// Raw (unrounded) sum of every money entry. An entry that would push the
/// total past `Amount`'s range is dropped, like any other unusable line.
pub fn total_source_amount(ledger: &ParsedLedger) -> Amount {
    ledger.money().fold(Decimal::ZERO, |sum, entry| {
        sum.checked_add(entry.amount).unwrap_or_else(|| {
            tracing::warn!("Dropping money entry {}: total would overflow", entry.amount);
            sum
        })
    })
}

/// Sum of every duration entry in minutes.
pub fn total_minutes(ledger: &ParsedLedger) -> u64 {
    ledger
        .durations()
        .fold(0u64, |sum, entry| sum.saturating_add(entry.total_minutes()))
}

/// Reduce a ledger to its totals. Pass `None` for `rate` when the rate could
/// not be fetched; the target total is then left out.
pub fn aggregate(ledger: &ParsedLedger, rate: Option<&ConversionRate>) -> Summary {
    let minutes = total_minutes(ledger);
    let source = total_source_amount(ledger);

    Summary {
        total_hours: minutes / 60,
        total_minutes: (minutes % 60) as u32,
        total_source_amount: format_amount(source),
        total_target_amount: rate.and_then(|rate| match rate.apply(source) {
            Some(target) => Some(format_amount(target)),
            None => {
                tracing::warn!("Converted total of {} at rate {} overflows", source, rate);
                None
            }
        }),
    }
}
