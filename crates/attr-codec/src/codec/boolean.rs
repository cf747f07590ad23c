//! Boolean encoding: `!b` for true, `!B` for false.

use crate::codec::primitives::Sentinel;
use crate::error::DecodeError;

/// Encodes a boolean. `"!B"` sorts before `"!b"`, matching `false < true`.
pub fn encode_boolean(value: bool) -> String {
    if value {
        Sentinel::True.as_str().to_string()
    } else {
        Sentinel::False.as_str().to_string()
    }
}

/// Decodes exactly `"!b"` or `"!B"`.
pub fn decode_boolean(s: &str) -> Result<bool, DecodeError> {
    if s == Sentinel::False.as_str() {
        Ok(false)
    } else if s == Sentinel::True.as_str() {
        Ok(true)
    } else {
        Err(DecodeError::InvalidBoolean { input: s.to_string() })
    }
}
