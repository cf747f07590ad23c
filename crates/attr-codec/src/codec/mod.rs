//! Order-preserving string encoding of typed values.
//!
//! Every encoded value starts with a two-character sentinel naming its kind
//! and sign branch, followed by a fixed-width payload. Within one kind and
//! one set of [`EncodeOptions`], byte-wise string order equals value order.

pub mod attributes;
pub mod boolean;
pub mod float;
pub mod integer;
pub mod primitives;
pub mod timestamp;
pub mod value;

pub use attributes::{decode_attribute, decode_attributes, encode_attribute_params};
pub use boolean::{decode_boolean, encode_boolean};
pub use float::{decode_float, encode_float};
pub use integer::{decode_integer, encode_integer};
pub use primitives::Sentinel;
pub use timestamp::{decode_date, encode_date};
pub use value::{
    decode_attribute_value, encode_attribute_value, encode_attribute_value_with_options,
    EncodeOptions,
};
