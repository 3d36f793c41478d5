//! Localizing millisecond timestamps into civil time for a fixed zone.
//!
//! The standard/daylight split is decided from the abbreviation the tz
//! database reports for the instant itself, so it follows the zone's real
//! transition dates in every year instead of guessing from the month.

use std::fmt;

use chrono::{DateTime, Offset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Shown in place of the civil time when a timestamp cannot be localized.
pub const FALLBACK_TIMESTAMP_DISPLAY: &str = "Bit of a dodgy timestamp";

/// Long month, numeric day and year, 12-hour clock with seconds.
/// Example: "31 March 2025 at 08:32:00 pm"
pub const DISPLAY_FORMAT: &str = "%-d %B %Y at %I:%M:%S %P";

/// One of a zone's two named UTC offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneDesignator {
    pub abbreviation: &'static str,
    pub utc_offset_hours: i32,
}

impl ZoneDesignator {
    /// Label such as "AEDT: UTC+11".
    pub fn label(&self) -> String {
        format!("{}: UTC{:+}", self.abbreviation, self.utc_offset_hours)
    }
}

/// The target zone plus its standard and daylight designators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneProfile {
    pub tz: Tz,
    pub standard: ZoneDesignator,
    pub daylight: ZoneDesignator,
}

impl ZoneProfile {
    pub const fn melbourne() -> Self {
        Self {
            tz: chrono_tz::Australia::Melbourne,
            standard: ZoneDesignator {
                abbreviation: "AEST",
                utc_offset_hours: 10,
            },
            daylight: ZoneDesignator {
                abbreviation: "AEDT",
                utc_offset_hours: 11,
            },
        }
    }

    pub fn designator(&self, kind: OffsetKind) -> ZoneDesignator {
        match kind {
            OffsetKind::Standard => self.standard,
            OffsetKind::Daylight => self.daylight,
        }
    }

    /// Classify by abbreviation: the daylight designator means daylight,
    /// anything else is treated as standard time.
    pub fn classify(&self, abbreviation: &str) -> OffsetKind {
        if abbreviation == self.daylight.abbreviation {
            OffsetKind::Daylight
        } else {
            OffsetKind::Standard
        }
    }

    /// Localize a raw timestamp string (milliseconds since the epoch).
    pub fn localize(&self, timestamp: &str) -> Result<LocalizedInstant, TimestampError> {
        let millis = parse_timestamp_millis(timestamp)?;
        self.localize_millis(millis)
    }

    pub fn localize_millis(&self, millis: i64) -> Result<LocalizedInstant, TimestampError> {
        let instant = DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or(TimestampError::OutOfRange(millis))?;
        Ok(self.localize_instant(instant))
    }

    pub fn localize_instant(&self, instant: DateTime<Utc>) -> LocalizedInstant {
        let local = instant.with_timezone(&self.tz);
        let abbreviation = local.format("%Z").to_string();
        let kind = self.classify(&abbreviation);

        LocalizedInstant {
            display: local.format(DISPLAY_FORMAT).to_string(),
            offset_kind: kind,
            offset_label: self.designator(kind).label(),
            utc_offset_seconds: local.offset().fix().local_minus_utc(),
        }
    }
}

impl Default for ZoneProfile {
    fn default() -> Self {
        Self::melbourne()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetKind {
    Standard,
    Daylight,
}

/// Civil time for one instant, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedInstant {
    pub display: String,
    pub offset_kind: OffsetKind,
    pub offset_label: String,
    /// Offset actually in effect, straight from the zone rules.
    pub utc_offset_seconds: i32,
}

/// Strictly parse a millisecond timestamp. Surrounding whitespace is allowed.
pub fn parse_timestamp_millis(input: &str) -> Result<i64, TimestampError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TimestampError::Empty);
    }
    input
        .parse()
        .map_err(|_| TimestampError::NotAnInteger(input.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    Empty,
    NotAnInteger(String),
    OutOfRange(i64),
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampError::Empty => write!(f, "empty timestamp"),
            TimestampError::NotAnInteger(s) => {
                write!(f, "timestamp is not an integer number of milliseconds: {s:?}")
            }
            TimestampError::OutOfRange(ms) => write!(f, "timestamp out of range: {ms}"),
        }
    }
}

impl std::error::Error for TimestampError {}
