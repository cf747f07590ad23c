//! Timestamp encoding: `!d` followed by fixed-width ISO 8601 UTC.

use crate::codec::primitives::Sentinel;
use crate::error::{DecodeError, EncodeError};
use crate::limits::{MAX_TIMESTAMP_YEAR, MIN_TIMESTAMP_YEAR};
use crate::model::{Timestamp, TimestampPrecision};
use crate::util::datetime::{format_datetime_fixed, parse_datetime_utc, split_epoch_micros};

/// Encodes a timestamp at the given precision, truncating toward the past.
///
/// Only years 0000 through 9999 keep the text fixed-width, so anything
/// outside that range is rejected.
pub fn encode_date(value: Timestamp, precision: TimestampPrecision) -> Result<String, EncodeError> {
    let year = split_epoch_micros(value.epoch_micros()).year;
    if !(MIN_TIMESTAMP_YEAR..=MAX_TIMESTAMP_YEAR).contains(&year) {
        return Err(EncodeError::TimestampOutOfRange {
            epoch_micros: value.epoch_micros(),
        });
    }

    Ok(format!(
        "{}{}",
        Sentinel::Date.as_str(),
        format_datetime_fixed(value.epoch_micros(), precision.fraction_digits())
    ))
}

/// Decodes a `!d`-prefixed ISO 8601 UTC timestamp of any fractional precision.
pub fn decode_date(s: &str) -> Result<Timestamp, DecodeError> {
    let body = Sentinel::Date.strip(s).ok_or_else(|| DecodeError::InvalidTimestamp {
        input: s.to_string(),
        reason: "missing !d prefix".to_string(),
    })?;

    parse_datetime_utc(body)
        .map(Timestamp::from_epoch_micros)
        .map_err(|e| DecodeError::InvalidTimestamp {
            input: s.to_string(),
            reason: e.message,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn test_encode_date_precisions() {
        let value = ts("2008-01-25T05:32:39.123456Z");
        assert_eq!(
            encode_date(value, TimestampPrecision::Seconds).unwrap(),
            "!d2008-01-25T05:32:39Z"
        );
        assert_eq!(
            encode_date(value, TimestampPrecision::Millis).unwrap(),
            "!d2008-01-25T05:32:39.123Z"
        );
        assert_eq!(
            encode_date(value, TimestampPrecision::Micros).unwrap(),
            "!d2008-01-25T05:32:39.123456Z"
        );
    }

    #[test]
    fn test_decode_date() {
        assert_eq!(
            decode_date("!d2008-01-25T05:32:39Z").unwrap(),
            ts("2008-01-25T05:32:39Z")
        );
        assert_eq!(
            decode_date("!d2008-01-25T05:32:39.5Z").unwrap().epoch_micros(),
            1201239159_500_000
        );
    }

    #[test]
    fn test_decode_date_errors() {
        let err = decode_date("2008-01-25T05:32:39Z").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidTimestamp { .. }));

        // Upper-case sentinel is not a date encoding
        assert!(decode_date("!D2008-01-25T05:32:39Z").is_err());
        assert!(decode_date("!d2008-01-25").is_err());
        assert!(decode_date("!d").is_err());
    }

    #[test]
    fn test_encode_date_year_range() {
        let first = ts("0000-01-01T00:00:00Z");
        assert_eq!(
            encode_date(first, TimestampPrecision::Seconds).unwrap(),
            "!d0000-01-01T00:00:00Z"
        );
        let before = Timestamp::from_epoch_micros(first.epoch_micros() - 1);
        assert_eq!(
            encode_date(before, TimestampPrecision::Seconds),
            Err(EncodeError::TimestampOutOfRange { epoch_micros: before.epoch_micros() })
        );

        let last = ts("9999-12-31T23:59:59.999999Z");
        assert!(encode_date(last, TimestampPrecision::Micros).is_ok());
        let after = Timestamp::from_epoch_micros(last.epoch_micros() + 1);
        assert!(encode_date(after, TimestampPrecision::Micros).is_err());
    }

    #[test]
    fn test_pre_epoch_sorts_first() {
        let a = encode_date(ts("1969-12-31T23:59:59.999999Z"), TimestampPrecision::Micros).unwrap();
        let b = encode_date(Timestamp::EPOCH, TimestampPrecision::Micros).unwrap();
        assert!(a < b);
    }

    // 0000-01-01 through 9999-12-31, in microseconds since the epoch
    const MIN_MICROS: i64 = -62_167_219_200_000_000;
    const MAX_MICROS: i64 = 253_402_300_799_999_999;

    fn precision() -> impl Strategy<Value = TimestampPrecision> {
        prop_oneof![
            Just(TimestampPrecision::Seconds),
            Just(TimestampPrecision::Millis),
            Just(TimestampPrecision::Micros),
        ]
    }

    proptest! {
        #[test]
        fn prop_date_roundtrip(micros in MIN_MICROS..=MAX_MICROS, p in precision()) {
            let value = Timestamp::from_epoch_micros(micros);
            let decoded = decode_date(&encode_date(value, p).unwrap()).unwrap();
            prop_assert_eq!(Some(decoded), value.truncate(p));
        }

        #[test]
        fn prop_date_order(a in MIN_MICROS..=MAX_MICROS, b in MIN_MICROS..=MAX_MICROS, p in precision()) {
            let (ta, tb) = (Timestamp::from_epoch_micros(a), Timestamp::from_epoch_micros(b));
            let (ea, eb) = (encode_date(ta, p).unwrap(), encode_date(tb, p).unwrap());
            prop_assert_eq!(ea.cmp(&eb), ta.truncate(p).cmp(&tb.truncate(p)));
        }
    }
}
