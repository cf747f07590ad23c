//! Signed float encoding as offset exponent and mantissa digit fields.
//!
//! A finite value is written as `sign * 0.m1m2..mp * 10^exponent` with
//! `m1 != 0`. With `exp_mid = 10^exp_digits / 2`:
//!
//! - non-negative: `!f` + `(exp_mid + exponent)` + `!` + mantissa digits
//! - negative: `!F` + `(exp_mid - exponent)` + `!` + `(10^p - mantissa)`
//!
//! Both fields are zero-padded. Complementing both fields on the negative
//! branch makes larger magnitudes sort first, and `!F` sorts before `!f`.
//! Zero takes the smallest exponent slot of the non-negative branch.

use crate::codec::primitives::{pad_digits, parse_digits, pow10, Sentinel};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{MAX_FLOAT_EXP_DIGITS, MAX_FLOAT_PRECISION_DIGITS};

/// Separator between the exponent and mantissa fields.
const FIELD_SEPARATOR: char = '!';

/// Encodes a finite float with `exp_digits` exponent digits and
/// `precision_digits` mantissa digits, rounding the mantissa to nearest.
pub fn encode_float(
    value: f64,
    exp_digits: usize,
    precision_digits: usize,
) -> Result<String, EncodeError> {
    if !value.is_finite() {
        return Err(EncodeError::NonFiniteFloat { value });
    }
    if exp_digits == 0 || exp_digits > MAX_FLOAT_EXP_DIGITS {
        return Err(EncodeError::DigitWidthOutOfRange {
            field: "float exponent digits",
            width: exp_digits,
            max: MAX_FLOAT_EXP_DIGITS,
        });
    }
    if precision_digits == 0 || precision_digits > MAX_FLOAT_PRECISION_DIGITS {
        return Err(EncodeError::DigitWidthOutOfRange {
            field: "float precision digits",
            width: precision_digits,
            max: MAX_FLOAT_PRECISION_DIGITS,
        });
    }

    // Both widths are bounded above, so these powers fit comfortably
    let exp_bound = pow10(exp_digits).unwrap_or(i128::MAX);
    let frac_bound = pow10(precision_digits).unwrap_or(i128::MAX);
    let exp_mid = exp_bound / 2;

    let (mantissa, exponent) = decompose(value.abs(), precision_digits)
        .ok_or(EncodeError::NonFiniteFloat { value })?;

    // On the negative branch exponent == -exp_mid would write exp_mid * 2,
    // overflowing the exponent field by one digit and decoding wrongly
    let min_exponent = if value < 0.0 { -exp_mid + 1 } else { -exp_mid };
    if exponent >= exp_mid || exponent < min_exponent {
        return Err(EncodeError::ExponentOutOfRange {
            exponent: exponent as i64,
            min: min_exponent as i64,
            max: (exp_mid - 1) as i64,
        });
    }

    if value == 0.0 {
        // -0.0 lands here too
        return Ok(format!(
            "{}{}{}{}",
            Sentinel::Float.as_str(),
            pad_digits(0, exp_digits),
            FIELD_SEPARATOR,
            pad_digits(0, precision_digits)
        ));
    }

    if value > 0.0 {
        Ok(format!(
            "{}{}{}{}",
            Sentinel::Float.as_str(),
            pad_digits(exp_mid + exponent, exp_digits),
            FIELD_SEPARATOR,
            pad_digits(mantissa, precision_digits)
        ))
    } else {
        Ok(format!(
            "{}{}{}{}",
            Sentinel::NegativeFloat.as_str(),
            pad_digits(exp_mid - exponent, exp_digits),
            FIELD_SEPARATOR,
            pad_digits(frac_bound - mantissa, precision_digits)
        ))
    }
}

/// Splits a non-negative finite magnitude into a `precision_digits`-digit
/// mantissa and a decimal exponent such that `magnitude ~= 0.mantissa * 10^exponent`.
///
/// Zero yields `(0, 0)`.
fn decompose(magnitude: f64, precision_digits: usize) -> Option<(i128, i128)> {
    if magnitude == 0.0 {
        return Some((0, 0));
    }

    // `{:e}` rounds correctly and normalises to d.ddd..e<exp>
    let scientific = format!("{:.*e}", precision_digits - 1, magnitude);
    let (digits, exp) = scientific.split_once('e')?;
    let digits: String = digits.chars().filter(char::is_ascii_digit).collect();
    let mantissa = parse_digits(&digits)?;
    let exponent: i128 = exp.parse().ok()?;

    // d.ddd * 10^e == 0.dddd * 10^(e + 1)
    Some((mantissa, exponent + 1))
}

/// Decodes an `!f`/`!F` float, inferring both digit widths from the fields.
pub fn decode_float(s: &str) -> Result<f64, DecodeError> {
    let invalid = || DecodeError::InvalidFloat { input: s.to_string() };

    let negative = match Sentinel::detect(s) {
        Some(Sentinel::Float) => false,
        Some(Sentinel::NegativeFloat) => true,
        _ => return Err(invalid()),
    };

    let (exp_field, frac_field) = s[2..].split_once(FIELD_SEPARATOR).ok_or_else(invalid)?;
    let exp_value = parse_digits(exp_field).ok_or_else(invalid)?;
    let frac_value = parse_digits(frac_field).ok_or_else(invalid)?;
    let exp_mid = pow10(exp_field.len()).ok_or_else(invalid)? / 2;

    let (exponent, mantissa) = if negative {
        let frac_bound = pow10(frac_field.len()).ok_or_else(invalid)?;
        (exp_mid - exp_value, frac_bound - frac_value)
    } else {
        (exp_value - exp_mid, frac_value)
    };

    // Let the standard parser do the decimal-to-binary rounding
    let text = format!(
        "{}0.{:0width$}e{}",
        if negative { "-" } else { "" },
        mantissa,
        exponent,
        width = frac_field.len()
    );
    let value: f64 = text.parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(value)
}
