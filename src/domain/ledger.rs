use serde::{Deserialize, Serialize};

use super::{parse_amount, Amount};

/// Marker that opens a money line, e.g. `$12.50`.
pub const CURRENCY_MARKER: char = '$';
/// Suffix of the hour token, e.g. `2h`.
pub const HOUR_SUFFIX: &str = "h";
/// Suffix of the minute token, e.g. `30min`.
pub const MINUTE_SUFFIX: &str = "min";

/// A currency amount taken from a `$<number>` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyEntry {
    pub amount: Amount,
}

/// Elapsed time taken from a `<int>h[ <int>min]` line.
/// Minutes are always normalized into 0..60.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationEntry {
    pub hours: u64,
    pub minutes: u32,
}

impl DurationEntry {
    /// Build an entry, carrying whole hours out of the minute count.
    pub fn new(hours: u64, minutes: u32) -> Self {
        Self::from_minutes(hours.saturating_mul(60).saturating_add(u64::from(minutes)))
    }

    pub fn from_minutes(total: u64) -> Self {
        Self {
            hours: total / 60,
            minutes: (total % 60) as u32,
        }
    }

    pub fn total_minutes(&self) -> u64 {
        self.hours * 60 + u64::from(self.minutes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LedgerEntry {
    Money(MoneyEntry),
    Duration(DurationEntry),
}

/// Outcome of classifying a single ledger line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Money(MoneyEntry),
    Duration(DurationEntry),
    Ignored,
}

impl LineKind {
    pub fn into_entry(self) -> Option<LedgerEntry> {
        match self {
            LineKind::Money(m) => Some(LedgerEntry::Money(m)),
            LineKind::Duration(d) => Some(LedgerEntry::Duration(d)),
            LineKind::Ignored => None,
        }
    }
}

/// Entries in input line order. Lines that produced nothing are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLedger {
    pub entries: Vec<LedgerEntry>,
}

impl ParsedLedger {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn money(&self) -> impl Iterator<Item = &MoneyEntry> {
        self.entries.iter().filter_map(|e| match e {
            LedgerEntry::Money(m) => Some(m),
            LedgerEntry::Duration(_) => None,
        })
    }

    pub fn durations(&self) -> impl Iterator<Item = &DurationEntry> {
        self.entries.iter().filter_map(|e| match e {
            LedgerEntry::Duration(d) => Some(d),
            LedgerEntry::Money(_) => None,
        })
    }

    pub fn has_money(&self) -> bool {
        self.money().next().is_some()
    }
}

/// Parse a free-form block of text into money and duration entries.
/// Malformed lines are dropped; this never fails.
pub fn parse_ledger(text: &str) -> ParsedLedger {
    let entries = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| classify_line(line).into_entry())
        .collect();

    ParsedLedger { entries }
}

/// Classify one line. The money check runs first, so `$2h` is a (bad) money line.
pub fn classify_line(line: &str) -> LineKind {
    let line = line.trim();

    if let Some(rest) = line.strip_prefix(CURRENCY_MARKER) {
        return match parse_amount(rest) {
            Ok(amount) => LineKind::Money(MoneyEntry { amount }),
            Err(_) => LineKind::Ignored,
        };
    }

    if line.contains(HOUR_SUFFIX) {
        return parse_duration(line)
            .map(LineKind::Duration)
            .unwrap_or(LineKind::Ignored);
    }

    LineKind::Ignored
}

fn parse_duration(line: &str) -> Option<DurationEntry> {
    let mut tokens = line.split_whitespace();

    let hours: u64 = parse_digits(tokens.next()?.strip_suffix(HOUR_SUFFIX)?)?;

    let minutes: u32 = match tokens.next() {
        Some(token) if token.contains(MINUTE_SUFFIX) => {
            parse_digits(token.strip_suffix(MINUTE_SUFFIX)?)?
        }
        Some(_) | None => 0,
    };

    // Only `<int>h` and an optional second token are accepted.
    if tokens.next().is_some() {
        return None;
    }

    let total = hours.checked_mul(60)?.checked_add(u64::from(minutes))?;
    Some(DurationEntry::from_minutes(total))
}

/// Unsigned integer written with ASCII digits only. `str::parse` would also
/// take a leading `+`.
fn parse_digits<T: std::str::FromStr>(token: &str) -> Option<T> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
