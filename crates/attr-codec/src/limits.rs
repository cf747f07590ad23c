//! Default and maximum digit widths for the sortable encodings.

/// Default zero-padded width of an encoded integer.
pub const DEFAULT_INTEGER_DIGITS: usize = 18;

/// Widest integer field accepted at encode time. At 19 digits the offset
/// range already covers every `i64`.
pub const MAX_INTEGER_DIGITS: usize = 19;

/// Default width of the float exponent field.
pub const DEFAULT_FLOAT_EXP_DIGITS: usize = 2;

/// Widest float exponent field accepted at encode time.
pub const MAX_FLOAT_EXP_DIGITS: usize = 4;

/// Default number of mantissa digits retained for floats.
pub const DEFAULT_FLOAT_PRECISION_DIGITS: usize = 15;

/// Most mantissa digits accepted at encode time (shortest round-trip width of an f64).
pub const MAX_FLOAT_PRECISION_DIGITS: usize = 17;

/// Widest digit field the decoders will parse.
pub const MAX_DECODE_DIGITS: usize = 38;

/// Earliest year a timestamp can be encoded for (fixed four-digit year).
pub const MIN_TIMESTAMP_YEAR: i32 = 0;

/// Latest year a timestamp can be encoded for.
pub const MAX_TIMESTAMP_YEAR: i32 = 9999;
