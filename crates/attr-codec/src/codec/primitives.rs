//! Sentinel prefixes and fixed-width digit helpers shared by the encoders.

/// Marker that starts every encoded value.
pub const ENCODED_FLAG: char = '!';

/// Two-character prefix identifying an encoded value's kind and sign branch.
///
/// Prefix order matches value order within a kind: `!B` < `!b` puts false
/// before true, and `!I` < `!i`, `!F` < `!f` put negatives first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    /// `!b`
    True,
    /// `!B`
    False,
    /// `!d`
    Date,
    /// `!i`
    Integer,
    /// `!I`
    NegativeInteger,
    /// `!f`
    Float,
    /// `!F`
    NegativeFloat,
}

impl Sentinel {
    /// Returns the prefix text.
    pub fn as_str(self) -> &'static str {
        match self {
            Sentinel::True => "!b",
            Sentinel::False => "!B",
            Sentinel::Date => "!d",
            Sentinel::Integer => "!i",
            Sentinel::NegativeInteger => "!I",
            Sentinel::Float => "!f",
            Sentinel::NegativeFloat => "!F",
        }
    }

    /// Matches the exact (case-sensitive) prefix of an encoded string.
    pub fn detect(s: &str) -> Option<Sentinel> {
        match s.as_bytes() {
            [b'!', b'b', ..] => Some(Sentinel::True),
            [b'!', b'B', ..] => Some(Sentinel::False),
            [b'!', b'd', ..] => Some(Sentinel::Date),
            [b'!', b'i', ..] => Some(Sentinel::Integer),
            [b'!', b'I', ..] => Some(Sentinel::NegativeInteger),
            [b'!', b'f', ..] => Some(Sentinel::Float),
            [b'!', b'F', ..] => Some(Sentinel::NegativeFloat),
            _ => None,
        }
    }

    /// Returns the text following this sentinel, if `s` starts with it.
    pub fn strip<'a>(self, s: &'a str) -> Option<&'a str> {
        s.strip_prefix(self.as_str())
    }
}

/// Returns `10^digits`, or `None` if it does not fit in an `i128`.
pub fn pow10(digits: usize) -> Option<i128> {
    u32::try_from(digits).ok().and_then(|exp| 10i128.checked_pow(exp))
}

/// Zero-pads `value` to at least `width` digits.
pub fn pad_digits(value: i128, width: usize) -> String {
    format!("{:0width$}", value, width = width)
}

/// Parses a field made only of ASCII digits.
///
/// Unlike `str::parse`, rejects empty input and sign characters.
pub fn parse_digits(field: &str) -> Option<i128> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
