//! Encoding and decoding of whole attribute values.
//!
//! Encoding dispatches on the value's variant. Decoding dispatches on the
//! two-character sentinel and is lenient: plain strings and unknown
//! sentinels pass through as `Raw`. Only a recognised sentinel followed by a
//! malformed payload is an error.

use crate::codec::boolean::{decode_boolean, encode_boolean};
use crate::codec::float::{decode_float, encode_float};
use crate::codec::integer::{decode_integer, encode_integer};
use crate::codec::primitives::ENCODED_FLAG;
use crate::codec::timestamp::{decode_date, encode_date};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{DEFAULT_FLOAT_EXP_DIGITS, DEFAULT_FLOAT_PRECISION_DIGITS, DEFAULT_INTEGER_DIGITS};
use crate::model::{TimestampPrecision, TypedValue};

/// Digit widths and precision used when encoding values.
///
/// Decoding infers widths from the encoded text, so the same options must
/// be used for every value of one attribute for cross-row ordering to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Zero-padded width of integers.
    pub integer_digits: usize,
    /// Width of the float exponent field.
    pub float_exp_digits: usize,
    /// Number of mantissa digits retained for floats.
    pub float_precision_digits: usize,
    /// Fractional-second digits written for timestamps.
    pub timestamp_precision: TimestampPrecision,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            integer_digits: DEFAULT_INTEGER_DIGITS,
            float_exp_digits: DEFAULT_FLOAT_EXP_DIGITS,
            float_precision_digits: DEFAULT_FLOAT_PRECISION_DIGITS,
            timestamp_precision: TimestampPrecision::default(),
        }
    }
}

impl EncodeOptions {
    /// Creates default encoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the integer width.
    pub fn with_integer_digits(mut self, digits: usize) -> Self {
        self.integer_digits = digits;
        self
    }

    /// Sets the float exponent and mantissa widths.
    pub fn with_float_digits(mut self, exp_digits: usize, precision_digits: usize) -> Self {
        self.float_exp_digits = exp_digits;
        self.float_precision_digits = precision_digits;
        self
    }

    /// Sets the timestamp precision.
    pub fn with_timestamp_precision(mut self, precision: TimestampPrecision) -> Self {
        self.timestamp_precision = precision;
        self
    }
}

/// Encodes a value with default options. An absent value encodes to `None`.
pub fn encode_attribute_value<'a>(
    value: impl Into<Option<&'a TypedValue>>,
) -> Result<Option<String>, EncodeError> {
    encode_attribute_value_with_options(value, &EncodeOptions::default())
}

/// Encodes a value with the given options. An absent value encodes to `None`.
pub fn encode_attribute_value_with_options<'a>(
    value: impl Into<Option<&'a TypedValue>>,
    options: &EncodeOptions,
) -> Result<Option<String>, EncodeError> {
    let Some(value) = value.into() else {
        return Ok(None);
    };

    let encoded = match value {
        TypedValue::Boolean(v) => encode_boolean(*v),
        TypedValue::Timestamp(v) => encode_date(*v, options.timestamp_precision)?,
        TypedValue::Integer(v) => encode_integer(*v, options.integer_digits)?,
        TypedValue::Float(v) => {
            encode_float(*v, options.float_exp_digits, options.float_precision_digits)?
        }
        TypedValue::Raw(v) => v.clone(),
    };
    Ok(Some(encoded))
}

/// Decodes a stored attribute string.
///
/// - absent or empty input yields `Raw("")`
/// - input not starting with `!` is returned verbatim as `Raw`
/// - `!b`, `!d`, `!i`, `!f` (second character in either case) go to the
///   matching decoder, whose own prefix check and payload errors apply
/// - any other `!`-prefixed input is returned verbatim as `Raw`
pub fn decode_attribute_value<'a>(
    value: impl Into<Option<&'a str>>,
) -> Result<TypedValue, DecodeError> {
    let Some(value) = value.into() else {
        return Ok(TypedValue::Raw(String::new()));
    };

    let mut chars = value.chars();
    if chars.next() != Some(ENCODED_FLAG) {
        return Ok(TypedValue::Raw(value.to_string()));
    }

    match chars.next().map(|c| c.to_ascii_lowercase()) {
        Some('b') => decode_boolean(value).map(TypedValue::Boolean),
        Some('d') => decode_date(value).map(TypedValue::Timestamp),
        Some('i') => decode_integer(value).map(TypedValue::Integer),
        Some('f') => decode_float(value).map(TypedValue::Float),
        _ => {
            #[cfg(feature = "logging")]
            log::debug!("passing through value with unrecognised sentinel: {:?}", value);
            Ok(TypedValue::Raw(value.to_string()))
        }
    }
}
