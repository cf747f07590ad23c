//! Error types for attribute value encoding and decoding.

use thiserror::Error;

/// Stable short codes grouping the error variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Value or exponent outside the range the digit widths can hold
    OutOfRange,
    /// E002: Digit width or other encoding parameter not usable
    InvalidParameter,
    /// E003: Malformed boolean
    InvalidBoolean,
    /// E004: Malformed timestamp
    InvalidTimestamp,
    /// E005: Malformed integer
    InvalidInteger,
    /// E006: Malformed float
    InvalidFloat,
    /// E007: Query predicate cannot be rendered
    InvalidQuery,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::OutOfRange => "E001",
            ErrorCode::InvalidParameter => "E002",
            ErrorCode::InvalidBoolean => "E003",
            ErrorCode::InvalidTimestamp => "E004",
            ErrorCode::InvalidInteger => "E005",
            ErrorCode::InvalidFloat => "E006",
            ErrorCode::InvalidQuery => "E007",
        }
    }
}

/// Error while turning a typed value into its sortable string form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    // === E001: Out of range ===
    #[error("[E001] integer {value} is outside encoding range ({min} to {max})")]
    IntegerOutOfRange { value: i64, min: i128, max: i128 },

    #[error("[E001] exponent {exponent} is outside encoding range ({min} to {max})")]
    ExponentOutOfRange { exponent: i64, min: i64, max: i64 },

    #[error("[E001] timestamp {epoch_micros}us is outside the four-digit year range")]
    TimestampOutOfRange { epoch_micros: i64 },

    #[error("[E001] float value {value} is not finite")]
    NonFiniteFloat { value: f64 },

    // === E002: Invalid parameter ===
    #[error("[E002] {field} width {width} outside supported range 1..={max}")]
    DigitWidthOutOfRange {
        field: &'static str,
        width: usize,
        max: usize,
    },

    // === E007: Query ===
    #[error("[E007] predicate on {attribute:?} has no comparisons")]
    EmptyPredicate { attribute: String },
}

impl EncodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EncodeError::IntegerOutOfRange { .. }
            | EncodeError::ExponentOutOfRange { .. }
            | EncodeError::TimestampOutOfRange { .. }
            | EncodeError::NonFiniteFloat { .. } => ErrorCode::OutOfRange,
            EncodeError::DigitWidthOutOfRange { .. } => ErrorCode::InvalidParameter,
            EncodeError::EmptyPredicate { .. } => ErrorCode::InvalidQuery,
        }
    }
}

/// Error while reading a typed value back out of an encoded string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("[E003] cannot decode boolean from string: {input}")]
    InvalidBoolean { input: String },

    #[error("[E004] cannot decode date from string: {input} ({reason})")]
    InvalidTimestamp { input: String, reason: String },

    #[error("[E005] cannot decode integer from string: {input}")]
    InvalidInteger { input: String },

    #[error("[E006] cannot decode float from string: {input}")]
    InvalidFloat { input: String },
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::InvalidBoolean { .. } => ErrorCode::InvalidBoolean,
            DecodeError::InvalidTimestamp { .. } => ErrorCode::InvalidTimestamp,
            DecodeError::InvalidInteger { .. } => ErrorCode::InvalidInteger,
            DecodeError::InvalidFloat { .. } => ErrorCode::InvalidFloat,
        }
    }

    /// Returns the string that failed to decode.
    pub fn input(&self) -> &str {
        match self {
            DecodeError::InvalidBoolean { input }
            | DecodeError::InvalidTimestamp { input, .. }
            | DecodeError::InvalidInteger { input }
            | DecodeError::InvalidFloat { input } => input,
        }
    }
}
