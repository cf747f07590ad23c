//! ISO 8601 UTC date/time formatting and parsing.
//!
//! Converts between microseconds since the Unix epoch and text of the form
//! `YYYY-MM-DDTHH:MM:SS[.ffffff]Z`. Every field is zero-padded so that, at a
//! fixed number of fractional digits, string order equals chronological order.

const MICROSECONDS_PER_SECOND: i64 = 1_000_000;
const MICROSECONDS_PER_MINUTE: i64 = 60 * MICROSECONDS_PER_SECOND;
const MICROSECONDS_PER_HOUR: i64 = 60 * MICROSECONDS_PER_MINUTE;
const MICROSECONDS_PER_DAY: i64 = 24 * MICROSECONDS_PER_HOUR;

/// Error type for ISO 8601 parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeParseError {
    pub message: String,
}

impl DateTimeParseError {
    fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl std::fmt::Display for DateTimeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DateTimeParseError {}

/// Broken-down UTC calendar fields of an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub micros: u32,
}

/// Returns true if the given year is a leap year.
fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Returns the number of days in a given month (1-indexed).
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Calculates days since Unix epoch for a given date.
fn date_to_days(year: i32, month: u32, day: u32) -> i64 {
    // Howard Hinnant's days_from_civil
    let y = if month <= 2 { year - 1 } else { year } as i64;
    let m = if month <= 2 { month as i64 + 9 } else { month as i64 - 3 };

    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as u32; // year of era
    let doy = (153 * m as u32 + 2) / 5 + day - 1; // day of year
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // day of era

    era * 146097 + doe as i64 - 719468
}

/// Converts days since Unix epoch to (year, month, day).
fn days_to_date(days: i64) -> (i32, u32, u32) {
    // civil_from_days, the inverse of the above
    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32; // day of era
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // year of era
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // day of year
    let mp = (5 * doy + 2) / 153; // month index
    let d = doy - (153 * mp + 2) / 5 + 1; // day
    let m = if mp < 10 { mp + 3 } else { mp - 9 }; // month

    let year = if m <= 2 { y + 1 } else { y } as i32;
    (year, m, d)
}

/// Splits microseconds since the Unix epoch into UTC calendar fields.
pub fn split_epoch_micros(epoch_micros: i64) -> DateTimeParts {
    let days = epoch_micros.div_euclid(MICROSECONDS_PER_DAY);
    let time_micros = epoch_micros.rem_euclid(MICROSECONDS_PER_DAY);
    let (year, month, day) = days_to_date(days);

    DateTimeParts {
        year,
        month,
        day,
        hour: (time_micros / MICROSECONDS_PER_HOUR) as u32,
        minute: (time_micros % MICROSECONDS_PER_HOUR / MICROSECONDS_PER_MINUTE) as u32,
        second: (time_micros % MICROSECONDS_PER_MINUTE / MICROSECONDS_PER_SECOND) as u32,
        micros: (time_micros % MICROSECONDS_PER_SECOND) as u32,
    }
}

/// Formats microseconds since the Unix epoch with exactly `frac_digits`
/// fractional-second digits (0 omits the fraction), truncating the rest.
///
/// `frac_digits` is clamped to 6. Years are printed with at least four
/// digits; callers that need a fixed width must bound the year themselves.
pub fn format_datetime_fixed(epoch_micros: i64, frac_digits: usize) -> String {
    let parts = split_epoch_micros(epoch_micros);
    let frac_digits = frac_digits.min(6);

    let frac = if frac_digits == 0 {
        String::new()
    } else {
        let micros = format!("{:06}", parts.micros);
        format!(".{}", &micros[..frac_digits])
    };

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}Z",
        parts.year, parts.month, parts.day, parts.hour, parts.minute, parts.second, frac
    )
}

/// Formats microseconds since the Unix epoch as RFC 3339 UTC, omitting a
/// zero fraction and trailing zeros of a non-zero one.
pub fn format_datetime_rfc3339(epoch_micros: i64) -> String {
    let parts = split_epoch_micros(epoch_micros);

    let frac = if parts.micros == 0 {
        String::new()
    } else {
        let str = format!("{:06}", parts.micros);
        format!(".{}", str.trim_end_matches('0'))
    };

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}Z",
        parts.year, parts.month, parts.day, parts.hour, parts.minute, parts.second, frac
    )
}

/// Parses fractional seconds and returns microseconds, ignoring digits past the sixth.
fn parse_fractional_seconds(frac: &str) -> Option<i64> {
    if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut padded: String = frac.chars().take(6).collect();
    while padded.len() < 6 {
        padded.push('0');
    }
    padded.parse().ok()
}

fn parse_field<T: std::str::FromStr>(
    s: &str,
    what: &str,
    input: &str,
) -> Result<T, DateTimeParseError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateTimeParseError::new(format!("Invalid {} in datetime: {}", what, input)));
    }
    s.parse()
        .map_err(|_| DateTimeParseError::new(format!("Invalid {} in datetime: {}", what, input)))
}

/// Parses an ISO 8601 UTC datetime (`YYYY-MM-DDTHH:MM:SS[.f+]Z`) and returns
/// microseconds since the Unix epoch.
pub fn parse_datetime_utc(datetime_str: &str) -> Result<i64, DateTimeParseError> {
    // Minimum length is 20 (YYYY-MM-DDTHH:MM:SSZ)
    if !datetime_str.is_ascii() || datetime_str.len() < 20 {
        return Err(DateTimeParseError::new(format!(
            "Invalid ISO 8601 datetime: {}",
            datetime_str
        )));
    }

    let bytes = datetime_str.as_bytes();
    if bytes[4] != b'-'
        || bytes[7] != b'-'
        || (bytes[10] != b'T' && bytes[10] != b't')
        || bytes[13] != b':'
        || bytes[16] != b':'
    {
        return Err(DateTimeParseError::new(format!(
            "Invalid ISO 8601 datetime: {}",
            datetime_str
        )));
    }

    let year: i32 = parse_field(&datetime_str[..4], "year", datetime_str)?;
    let month: u32 = parse_field(&datetime_str[5..7], "month", datetime_str)?;
    let day: u32 = parse_field(&datetime_str[8..10], "day", datetime_str)?;
    let hours: i64 = parse_field(&datetime_str[11..13], "hours", datetime_str)?;
    let minutes: i64 = parse_field(&datetime_str[14..16], "minutes", datetime_str)?;
    let seconds: i64 = parse_field(&datetime_str[17..19], "seconds", datetime_str)?;

    // Validate ranges
    if !(1..=12).contains(&month) {
        return Err(DateTimeParseError::new(format!(
            "Invalid month in datetime: {}",
            datetime_str
        )));
    }
    if day < 1 || day > days_in_month(year, month) {
        return Err(DateTimeParseError::new(format!(
            "Invalid day in datetime: {}",
            datetime_str
        )));
    }
    if hours > 23 {
        return Err(DateTimeParseError::new(format!(
            "Invalid hours in datetime: {}",
            datetime_str
        )));
    }
    if minutes > 59 {
        return Err(DateTimeParseError::new(format!(
            "Invalid minutes in datetime: {}",
            datetime_str
        )));
    }
    if seconds > 59 {
        return Err(DateTimeParseError::new(format!(
            "Invalid seconds in datetime: {}",
            datetime_str
        )));
    }

    // Optional fractional seconds, then the mandatory UTC designator
    let rest = &datetime_str[19..];
    let (microseconds, zone) = match rest.strip_prefix('.') {
        Some(frac_and_zone) => {
            let frac_end = frac_and_zone
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(frac_and_zone.len());
            let micros = parse_fractional_seconds(&frac_and_zone[..frac_end]).ok_or_else(|| {
                DateTimeParseError::new(format!(
                    "Invalid fractional seconds in datetime: {}",
                    datetime_str
                ))
            })?;
            (micros, &frac_and_zone[frac_end..])
        }
        None => (0, rest),
    };

    if zone != "Z" && zone != "z" {
        return Err(DateTimeParseError::new(format!(
            "Datetime must be UTC with a Z designator: {}",
            datetime_str
        )));
    }

    let days = date_to_days(year, month, day);
    Ok(days * MICROSECONDS_PER_DAY
        + hours * MICROSECONDS_PER_HOUR
        + minutes * MICROSECONDS_PER_MINUTE
        + seconds * MICROSECONDS_PER_SECOND
        + microseconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_basic() {
        assert_eq!(parse_datetime_utc("1970-01-01T00:00:00Z").unwrap(), 0);
        assert_eq!(
            parse_datetime_utc("2024-03-15T14:30:00Z").unwrap(),
            1710513000000000
        );
        assert_eq!(
            parse_datetime_utc("2024-03-15T14:30:00.123456Z").unwrap(),
            1710513000123456
        );
        assert_eq!(
            parse_datetime_utc("2024-03-15T14:30:00.5Z").unwrap(),
            1710513000500000
        );
        // Digits past microseconds are dropped
        assert_eq!(
            parse_datetime_utc("2024-03-15T14:30:00.1234569Z").unwrap(),
            1710513000123456
        );
    }

    #[test]
    fn test_format_datetime_fixed() {
        assert_eq!(format_datetime_fixed(0, 0), "1970-01-01T00:00:00Z");
        assert_eq!(format_datetime_fixed(0, 3), "1970-01-01T00:00:00.000Z");
        assert_eq!(format_datetime_fixed(0, 6), "1970-01-01T00:00:00.000000Z");
        assert_eq!(
            format_datetime_fixed(1710513000123456, 3),
            "2024-03-15T14:30:00.123Z"
        );
        assert_eq!(
            format_datetime_fixed(1710513000123456, 6),
            "2024-03-15T14:30:00.123456Z"
        );
        assert_eq!(format_datetime_fixed(1710513000123456, 9), format_datetime_fixed(1710513000123456, 6));
    }

    #[test]
    fn test_format_rfc3339() {
        assert_eq!(format_datetime_rfc3339(0), "1970-01-01T00:00:00Z");
        assert_eq!(format_datetime_rfc3339(1710513000500000), "2024-03-15T14:30:00.5Z");
    }

    #[test]
    fn test_datetime_roundtrip() {
        let datetimes = [
            "1970-01-01T00:00:00Z",
            "2008-01-25T05:32:39Z",
            "2024-03-15T14:30:00.5Z",
            "2024-12-31T23:59:59.999999Z",
            "2000-02-29T12:00:00Z",
        ];

        for datetime in datetimes {
            let epoch_micros = parse_datetime_utc(datetime).unwrap();
            let formatted = format_datetime_rfc3339(epoch_micros);
            assert_eq!(datetime, formatted, "Roundtrip failed for {}", datetime);
        }
    }

    #[test]
    fn test_negative_epoch() {
        let epoch_micros = parse_datetime_utc("1969-12-31T23:59:59Z").unwrap();
        assert_eq!(epoch_micros, -1_000_000);
        assert_eq!(format_datetime_fixed(epoch_micros, 0), "1969-12-31T23:59:59Z");

        // One microsecond before the epoch floors into the previous second
        assert_eq!(format_datetime_fixed(-1, 0), "1969-12-31T23:59:59Z");
        assert_eq!(format_datetime_fixed(-1, 6), "1969-12-31T23:59:59.999999Z");
    }

    #[test]
    fn test_split_epoch_micros() {
        let parts = split_epoch_micros(1710513000123456);
        assert_eq!(
            parts,
            DateTimeParts {
                year: 2024,
                month: 3,
                day: 15,
                hour: 14,
                minute: 30,
                second: 0,
                micros: 123456,
            }
        );
    }

    #[test]
    fn test_invalid_datetimes() {
        assert!(parse_datetime_utc("2024-13-01T00:00:00Z").is_err()); // invalid month
        assert!(parse_datetime_utc("2024-02-30T00:00:00Z").is_err()); // invalid day
        assert!(parse_datetime_utc("2023-02-29T00:00:00Z").is_err()); // not a leap year
        assert!(parse_datetime_utc("2024-03-15T24:00:00Z").is_err()); // invalid hour
        assert!(parse_datetime_utc("2024-03-15T14:60:00Z").is_err()); // invalid minute
        assert!(parse_datetime_utc("2024-03-15T14:30:60Z").is_err()); // invalid second
        assert!(parse_datetime_utc("2024-03-15T14:30:00").is_err()); // no designator
        assert!(parse_datetime_utc("2024-03-15T14:30:00+05:30").is_err()); // not UTC
        assert!(parse_datetime_utc("2024-03-15T14:30:00.Z").is_err()); // empty fraction
        assert!(parse_datetime_utc("2024-03-15T14:30:00ZZ").is_err());
        assert!(parse_datetime_utc("+024-03-15T14:30:00Z").is_err());
        assert!(parse_datetime_utc("2024-03-15T14:30:0\u{e9}Z").is_err());
        assert!(parse_datetime_utc("not-a-datetime").is_err());
    }
}
