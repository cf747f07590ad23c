//! Signed integer encoding by offset into a fixed-width digit field.
//!
//! With `bound = 10^digits`, a non-negative value is written as `!i` plus the
//! value zero-padded to `digits`, and a negative value as `!I` plus
//! `bound + value` zero-padded to `digits`. More negative values get smaller
//! digit strings, and `!I` sorts before `!i`.

use crate::codec::primitives::{pad_digits, parse_digits, pow10, Sentinel};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{MAX_DECODE_DIGITS, MAX_INTEGER_DIGITS};

/// Encodes an integer zero-padded to `digits` characters.
///
/// Accepts `-bound..=bound`. The upper end is one past the largest value
/// that fits in `digits` characters: `bound` itself is accepted and encodes
/// one character wider.
pub fn encode_integer(value: i64, digits: usize) -> Result<String, EncodeError> {
    if digits == 0 || digits > MAX_INTEGER_DIGITS {
        return Err(EncodeError::DigitWidthOutOfRange {
            field: "integer digits",
            width: digits,
            max: MAX_INTEGER_DIGITS,
        });
    }
    let bound = pow10(digits).ok_or(EncodeError::DigitWidthOutOfRange {
        field: "integer digits",
        width: digits,
        max: MAX_INTEGER_DIGITS,
    })?;

    let v = i128::from(value);
    if v > bound || v < -bound {
        return Err(EncodeError::IntegerOutOfRange {
            value,
            min: -bound,
            max: bound - 1,
        });
    }

    if v < 0 {
        Ok(format!(
            "{}{}",
            Sentinel::NegativeInteger.as_str(),
            pad_digits(bound + v, digits)
        ))
    } else {
        Ok(format!("{}{}", Sentinel::Integer.as_str(), pad_digits(v, digits)))
    }
}

/// Decodes an `!i`/`!I` integer, inferring the digit width from the length.
pub fn decode_integer(s: &str) -> Result<i64, DecodeError> {
    let invalid = || DecodeError::InvalidInteger { input: s.to_string() };

    let value = match Sentinel::detect(s) {
        Some(Sentinel::NegativeInteger) => {
            let field = &s[2..];
            if field.len() > MAX_DECODE_DIGITS {
                return Err(invalid());
            }
            let bound = pow10(field.len()).ok_or_else(invalid)?;
            parse_digits(field).ok_or_else(invalid)? - bound
        }
        Some(Sentinel::Integer) => parse_digits(&s[2..]).ok_or_else(invalid)?,
        _ => return Err(invalid()),
    };

    i64::try_from(value).map_err(|_| invalid())
}
