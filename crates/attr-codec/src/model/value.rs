//! Typed attribute values.
//!
//! Values are what applications read and write; the codec turns them into
//! strings whose byte order matches the value order.

use std::fmt;

use crate::model::Timestamp;

/// Kinds of attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Boolean,
    Timestamp,
    Integer,
    Float,
    Raw,
}

impl ValueKind {
    /// Returns a short lowercase name for the kind.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Boolean => "boolean",
            ValueKind::Timestamp => "timestamp",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Raw => "raw",
        }
    }

    /// Returns true if encoded values of this kind sort in value order.
    pub fn is_ordered(self) -> bool {
        !matches!(self, ValueKind::Raw)
    }
}

/// A typed value that can be stored as an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// Boolean value.
    Boolean(bool),

    /// UTC instant.
    Timestamp(Timestamp),

    /// 64-bit signed integer.
    Integer(i64),

    /// 64-bit IEEE 754 float. Only finite values can be encoded.
    Float(f64),

    /// Plain string with no dedicated encoding, stored verbatim and with no
    /// ordering guarantee relative to the typed kinds.
    Raw(String),
}

impl TypedValue {
    /// Renders any displayable value as a `Raw` string.
    pub fn from_display(value: impl fmt::Display) -> Self {
        TypedValue::Raw(value.to_string())
    }

    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            TypedValue::Boolean(_) => ValueKind::Boolean,
            TypedValue::Timestamp(_) => ValueKind::Timestamp,
            TypedValue::Integer(_) => ValueKind::Integer,
            TypedValue::Float(_) => ValueKind::Float,
            TypedValue::Raw(_) => ValueKind::Raw,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            TypedValue::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TypedValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::Raw(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Boolean(v) => write!(f, "{}", v),
            TypedValue::Timestamp(v) => write!(f, "{}", v),
            TypedValue::Integer(v) => write!(f, "{}", v),
            TypedValue::Float(v) => write!(f, "{}", v),
            TypedValue::Raw(v) => f.write_str(v),
        }
    }
}

impl From<bool> for TypedValue {
    fn from(v: bool) -> Self {
        TypedValue::Boolean(v)
    }
}

impl From<Timestamp> for TypedValue {
    fn from(v: Timestamp) -> Self {
        TypedValue::Timestamp(v)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for TypedValue {
                fn from(v: $t) -> Self {
                    TypedValue::Integer(i64::from(v))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for TypedValue {
    fn from(v: f64) -> Self {
        TypedValue::Float(v)
    }
}

impl From<f32> for TypedValue {
    fn from(v: f32) -> Self {
        TypedValue::Float(f64::from(v))
    }
}

impl From<String> for TypedValue {
    fn from(v: String) -> Self {
        TypedValue::Raw(v)
    }
}

impl From<&str> for TypedValue {
    fn from(v: &str) -> Self {
        TypedValue::Raw(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(TypedValue::from(true).kind(), ValueKind::Boolean);
        assert_eq!(TypedValue::from(7i32).kind(), ValueKind::Integer);
        assert_eq!(TypedValue::from(7u32).as_i64(), Some(7));
        assert_eq!(TypedValue::from(1.5f32).as_f64(), Some(1.5));
        assert_eq!(TypedValue::from("x").kind(), ValueKind::Raw);
        assert_eq!(
            TypedValue::from(Timestamp::EPOCH).as_timestamp(),
            Some(Timestamp::EPOCH)
        );
        assert!(ValueKind::Float.is_ordered());
        assert!(!ValueKind::Raw.is_ordered());
    }

    #[test]
    fn test_from_display() {
        assert_eq!(TypedValue::from_display('c'), TypedValue::Raw("c".to_string()));
        assert_eq!(TypedValue::from_display(u64::MAX).as_str(), Some("18446744073709551615"));
    }

    #[test]
    fn test_accessors_reject_other_kinds() {
        let v = TypedValue::Integer(3);
        assert_eq!(v.as_bool(), None);
        assert_eq!(v.as_f64(), None);
        assert_eq!(v.as_str(), None);
        assert_eq!(v.to_string(), "3");
    }
}
