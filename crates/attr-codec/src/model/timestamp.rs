//! UTC instants with microsecond resolution.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::util::datetime::{format_datetime_rfc3339, parse_datetime_utc, DateTimeParseError};

/// A point in time, in UTC, as microseconds since 1970-01-01T00:00:00Z.
///
/// Ordering follows the instant, so `a < b` means `a` happened first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    epoch_micros: i64,
}

impl Timestamp {
    /// The Unix epoch.
    pub const EPOCH: Timestamp = Timestamp { epoch_micros: 0 };

    /// Creates a timestamp from microseconds since the Unix epoch.
    pub const fn from_epoch_micros(epoch_micros: i64) -> Self {
        Self { epoch_micros }
    }

    /// Creates a timestamp from milliseconds since the Unix epoch.
    ///
    /// Returns `None` if the value does not fit at microsecond resolution.
    pub fn from_epoch_millis(epoch_millis: i64) -> Option<Self> {
        epoch_millis.checked_mul(1_000).map(Self::from_epoch_micros)
    }

    /// Creates a timestamp from whole seconds since the Unix epoch.
    ///
    /// Returns `None` if the value does not fit at microsecond resolution.
    pub fn from_epoch_seconds(epoch_seconds: i64) -> Option<Self> {
        epoch_seconds.checked_mul(1_000_000).map(Self::from_epoch_micros)
    }

    /// Returns microseconds since the Unix epoch.
    pub const fn epoch_micros(&self) -> i64 {
        self.epoch_micros
    }

    /// Returns whole seconds since the Unix epoch, rounded toward the past.
    pub const fn epoch_seconds(&self) -> i64 {
        self.epoch_micros.div_euclid(1_000_000)
    }

    /// Returns the current time, truncated to microseconds.
    pub fn now() -> Self {
        // A clock before 1970 is reported as the epoch itself.
        Self::from_system_time(SystemTime::now()).unwrap_or(Self::EPOCH)
    }

    /// Converts a `SystemTime`, returning `None` if it is out of range.
    pub fn from_system_time(time: SystemTime) -> Option<Self> {
        let micros = match time.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_micros()).ok()?,
            Err(before) => {
                let before = before.duration();
                // Round toward the past so sub-microsecond remainders keep ordering
                let mut micros = i64::try_from(before.as_micros()).ok()?;
                if before.subsec_nanos() % 1_000 != 0 {
                    micros = micros.checked_add(1)?;
                }
                micros.checked_neg()?
            }
        };
        Some(Self::from_epoch_micros(micros))
    }

    /// Converts to a `SystemTime`.
    pub fn to_system_time(&self) -> SystemTime {
        let magnitude = Duration::from_micros(self.epoch_micros.unsigned_abs());
        if self.epoch_micros >= 0 {
            UNIX_EPOCH + magnitude
        } else {
            UNIX_EPOCH - magnitude
        }
    }

    /// Truncates to the given precision, rounding toward the past.
    ///
    /// Returns `None` if the truncated instant is earlier than `i64::MIN`
    /// microseconds.
    pub fn truncate(&self, precision: TimestampPrecision) -> Option<Self> {
        let unit = precision.unit_micros();
        self.epoch_micros
            .div_euclid(unit)
            .checked_mul(unit)
            .map(Self::from_epoch_micros)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_datetime_rfc3339(self.epoch_micros))
    }
}

impl FromStr for Timestamp {
    type Err = DateTimeParseError;

    /// Parses `YYYY-MM-DDTHH:MM:SS[.f+]Z`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_datetime_utc(s).map(Self::from_epoch_micros)
    }
}

impl From<Timestamp> for SystemTime {
    fn from(ts: Timestamp) -> Self {
        ts.to_system_time()
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::DateTime<chrono::Utc>> for Timestamp {
    /// Sub-microsecond nanoseconds are dropped.
    fn from(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self::from_epoch_micros(dt.timestamp_micros())
    }
}

#[cfg(feature = "chrono")]
impl From<Timestamp> for chrono::DateTime<chrono::Utc> {
    fn from(ts: Timestamp) -> Self {
        // Every i64 microsecond count is within chrono's supported range.
        chrono::DateTime::from_timestamp_micros(ts.epoch_micros)
            .unwrap_or(chrono::DateTime::<chrono::Utc>::MIN_UTC)
    }
}

/// Number of fractional-second digits written when encoding a timestamp.
///
/// All precisions produce fixed-width text. Mixing precisions within one
/// attribute breaks cross-row ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimestampPrecision {
    /// `YYYY-MM-DDTHH:MM:SSZ`
    Seconds,
    /// `YYYY-MM-DDTHH:MM:SS.mmmZ`
    Millis,
    /// `YYYY-MM-DDTHH:MM:SS.uuuuuuZ`
    #[default]
    Micros,
}

impl TimestampPrecision {
    /// Returns the number of fractional-second digits.
    pub fn fraction_digits(self) -> usize {
        match self {
            TimestampPrecision::Seconds => 0,
            TimestampPrecision::Millis => 3,
            TimestampPrecision::Micros => 6,
        }
    }

    fn unit_micros(self) -> i64 {
        match self {
            TimestampPrecision::Seconds => 1_000_000,
            TimestampPrecision::Millis => 1_000,
            TimestampPrecision::Micros => 1,
        }
    }
}
