//! Request parameters and response folding for item attributes.
//!
//! An attribute store takes attribute writes as indexed query parameters:
//!
//! ```text
//! Attribute.0.Name=Price
//! Attribute.0.Value=!f52!435400000000000
//! Attribute.0.Replace=true
//! ```
//!
//! and returns an item's attributes as a flat list of name/value pairs.

use crate::codec::value::{decode_attribute_value, encode_attribute_value_with_options, EncodeOptions};
use crate::error::{DecodeError, EncodeError};
use crate::model::{AttributeSet, ItemAttributes, TypedValue};

/// Builds the indexed `Attribute.N.*` parameters for a set of attributes.
///
/// Entries are numbered from 0 in insertion order. An entry without a value
/// emits only its name. With `replace`, every entry also carries
/// `Attribute.N.Replace=true`.
pub fn encode_attribute_params(
    attributes: &AttributeSet,
    replace: bool,
    options: &EncodeOptions,
) -> Result<Vec<(String, String)>, EncodeError> {
    let mut params = Vec::with_capacity(attributes.len() * if replace { 3 } else { 2 });

    for (index, (name, value)) in attributes.iter().enumerate() {
        params.push((format!("Attribute.{}.Name", index), name.to_string()));

        if let Some(encoded) = encode_attribute_value_with_options(value, options)? {
            params.push((format!("Attribute.{}.Value", index), encoded));
        }

        if replace {
            params.push((format!("Attribute.{}.Replace", index), "true".to_string()));
        }
    }

    Ok(params)
}

/// Decodes the name/value pairs of a response into per-name value lists.
///
/// A missing value becomes an empty string, never an absent entry.
pub fn decode_attributes<'a, I>(pairs: I) -> Result<ItemAttributes, DecodeError>
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let mut attributes = ItemAttributes::new();
    for (name, value) in pairs {
        let decoded = decode_attribute_value(value)?;
        attributes.insert(name, decoded);
    }

    #[cfg(feature = "logging")]
    log::trace!("decoded {} attribute names", attributes.len());

    Ok(attributes)
}

/// Returns the decoded values of a single attribute from response pairs,
/// or an empty list if the attribute is absent.
pub fn decode_attribute<'a, I>(pairs: I, name: &str) -> Result<Vec<TypedValue>, DecodeError>
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    pairs
        .into_iter()
        .filter(|(n, _)| *n == name)
        .map(|(_, value)| decode_attribute_value(value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Timestamp;

    fn param(name: &str, value: &str) -> (String, String) {
        (name.to_string(), value.to_string())
    }

    #[test]
    fn test_encode_params() {
        let attributes = AttributeSet::new()
            .add("Code", "AAPL")
            .add_all("Price", [43.54, -1.0])
            .add_name("Note");

        let params = encode_attribute_params(&attributes, false, &EncodeOptions::default()).unwrap();
        assert_eq!(
            params,
            vec![
                param("Attribute.0.Name", "Code"),
                param("Attribute.0.Value", "AAPL"),
                param("Attribute.1.Name", "Price"),
                param("Attribute.1.Value", "!f52!435400000000000"),
                param("Attribute.2.Name", "Price"),
                param("Attribute.2.Value", "!F49!900000000000000"),
                param("Attribute.3.Name", "Note"),
            ]
        );
    }

    #[test]
    fn test_encode_params_replace() {
        let attributes = AttributeSet::new().add("Active", true).add_name("Old");
        let params = encode_attribute_params(&attributes, true, &EncodeOptions::default()).unwrap();
        assert_eq!(
            params,
            vec![
                param("Attribute.0.Name", "Active"),
                param("Attribute.0.Value", "!b"),
                param("Attribute.0.Replace", "true"),
                param("Attribute.1.Name", "Old"),
                param("Attribute.1.Replace", "true"),
            ]
        );
    }

    #[test]
    fn test_encode_params_error() {
        let attributes = AttributeSet::new().add("Ratio", f64::INFINITY);
        assert!(encode_attribute_params(&attributes, false, &EncodeOptions::default()).is_err());
        assert!(encode_attribute_params(&AttributeSet::new(), true, &EncodeOptions::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_decode_attributes() {
        let pairs = [
            ("Code", Some("AAPL")),
            ("Date", Some("!d2007-06-05T00:00:00Z")),
            ("Volume", Some("!i000000000012345678")),
            ("Price", Some("!f52!435400000000000")),
            ("Price", Some("!F49!900000000000000")),
            ("Note", None),
        ];

        let attributes = decode_attributes(pairs).unwrap();
        assert_eq!(attributes.len(), 5);
        assert_eq!(attributes.get("Code"), &[TypedValue::Raw("AAPL".to_string())]);
        assert_eq!(
            attributes.first("Date").and_then(TypedValue::as_timestamp),
            Some("2007-06-05T00:00:00Z".parse::<Timestamp>().unwrap())
        );
        assert_eq!(attributes.get("Volume"), &[TypedValue::Integer(12345678)]);
        assert_eq!(
            attributes.get("Price"),
            &[TypedValue::Float(43.54), TypedValue::Float(-1.0)]
        );
        assert_eq!(attributes.get("Note"), &[TypedValue::Raw(String::new())]);
        assert!(attributes.get("Missing").is_empty());
    }

    #[test]
    fn test_decode_attributes_error() {
        let pairs = [("Flag", Some("!bx"))];
        assert!(matches!(
            decode_attributes(pairs),
            Err(DecodeError::InvalidBoolean { .. })
        ));
    }

    #[test]
    fn test_decode_single_attribute() {
        let pairs = [("A", Some("!i01")), ("B", Some("x")), ("A", Some("!I99"))];
        assert_eq!(
            decode_attribute(pairs, "A").unwrap(),
            vec![TypedValue::Integer(1), TypedValue::Integer(-1)]
        );
        assert!(decode_attribute(pairs, "C").unwrap().is_empty());
    }

    #[test]
    fn test_params_roundtrip_through_response() {
        let when = Timestamp::from_epoch_micros(1_700_000_000_123_456);
        let attributes = AttributeSet::new().add("When", when).add("Count", -7i32);
        let params = encode_attribute_params(&attributes, false, &EncodeOptions::default()).unwrap();

        // Pair each Name parameter with the Value parameter that follows it
        let pairs: Vec<(&str, Option<&str>)> = params
            .chunks(2)
            .map(|chunk| (chunk[0].1.as_str(), Some(chunk[1].1.as_str())))
            .collect();

        let decoded = decode_attributes(pairs).unwrap();
        assert_eq!(decoded.first("When"), Some(&TypedValue::Timestamp(when)));
        assert_eq!(decoded.first("Count"), Some(&TypedValue::Integer(-7)));
    }
}
