//! Utility modules.

pub mod datetime;

pub use datetime::{
    format_datetime_fixed, format_datetime_rfc3339, parse_datetime_utc, split_epoch_micros,
    DateTimeParseError, DateTimeParts,
};
