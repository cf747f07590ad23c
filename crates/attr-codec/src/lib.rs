//! Order-preserving string encoding of typed values for attribute stores.
//!
//! Stores that keep every attribute value as a string compare values
//! lexicographically. This crate encodes booleans, timestamps, integers and
//! floats into strings whose byte order matches the order of the values, so
//! range queries and sorts work on typed data.
//!
//! # Overview
//!
//! Every encoded value carries a two-character sentinel:
//! - `!b` / `!B`: true / false
//! - `!d`: UTC timestamp in fixed-width ISO 8601
//! - `!i` / `!I`: non-negative / negative integer
//! - `!f` / `!F`: non-negative / negative float
//!
//! Anything else decodes as a raw string, so plain text stored next to
//! encoded values is left untouched.
//!
//! # Quick Start
//!
//! ```rust
//! use attr_codec::{decode_attribute_value, encode_attribute_value, TypedValue};
//!
//! let price = TypedValue::Float(43.54);
//! let encoded = encode_attribute_value(&price).unwrap().unwrap();
//! assert_eq!(encoded, "!f52!435400000000000");
//!
//! let decoded = decode_attribute_value(encoded.as_str()).unwrap();
//! assert_eq!(decoded, price);
//!
//! // Encoded strings sort like the values they hold
//! let a = encode_attribute_value(&TypedValue::Integer(-3)).unwrap();
//! let b = encode_attribute_value(&TypedValue::Integer(25)).unwrap();
//! assert!(a < b);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Typed values, timestamps and attribute collections
//! - [`codec`]: Per-kind encoders and decoders, dispatch and request parameters
//! - [`query`]: Query expressions with encoded literals
//! - [`error`]: Error types
//! - [`limits`]: Default and maximum digit widths
//! - [`util`]: UTC date-time formatting and parsing
//!
//! # Widths
//!
//! Decoding infers every width from the encoded text. Ordering across values
//! only holds when all values of one attribute use the same
//! [`EncodeOptions`].
//!
//! # Features
//!
//! - `logging`: emit `debug`/`trace` records through the `log` facade
//! - `chrono`: conversions between [`Timestamp`] and `chrono::DateTime<Utc>`

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod query;
pub mod util;

// Re-export commonly used types at crate root
pub use codec::{
    decode_attribute, decode_attribute_value, decode_attributes, decode_boolean, decode_date,
    decode_float, decode_integer, encode_attribute_params, encode_attribute_value,
    encode_attribute_value_with_options, encode_boolean, encode_date, encode_float,
    encode_integer, EncodeOptions, Sentinel,
};
pub use error::{DecodeError, EncodeError, ErrorCode};
pub use model::{AttributeSet, ItemAttributes, Timestamp, TimestampPrecision, TypedValue, ValueKind};
pub use query::{Comparison, Expression, Predicate};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
