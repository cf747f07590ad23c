//! Data model types.
//!
//! This module contains the values the codec operates on:
//! - Typed values and their kinds
//! - UTC timestamps
//! - Attribute collections for item writes and reads

pub mod attribute;
pub mod timestamp;
pub mod value;

pub use attribute::{AttributeSet, ItemAttributes};
pub use timestamp::{Timestamp, TimestampPrecision};
pub use value::{TypedValue, ValueKind};
