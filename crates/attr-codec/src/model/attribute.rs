//! Attribute collections for writing to and reading from an item.

use std::collections::BTreeMap;

use crate::model::TypedValue;

/// Attributes to write to a single item.
///
/// Entries keep insertion order. A multi-valued attribute is several entries
/// with the same name; an entry without a value names the attribute alone,
/// which an attribute store reads as "every value of this attribute".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    entries: Vec<(String, Option<TypedValue>)>,
}

impl AttributeSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one value for an attribute.
    pub fn add(mut self, name: impl Into<String>, value: impl Into<TypedValue>) -> Self {
        self.push(name, Some(value.into()));
        self
    }

    /// Adds every value in `values` for an attribute, in order.
    pub fn add_all<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<TypedValue>,
    {
        let name = name.into();
        for value in values {
            self.push(name.clone(), Some(value.into()));
        }
        self
    }

    /// Adds an attribute name without a value.
    pub fn add_name(mut self, name: impl Into<String>) -> Self {
        self.push(name, None);
        self
    }

    /// Appends an entry in place.
    pub fn push(&mut self, name: impl Into<String>, value: Option<TypedValue>) {
        self.entries.push((name.into(), value));
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&TypedValue>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }
}

impl<N, V> FromIterator<(N, V)> for AttributeSet
where
    N: Into<String>,
    V: Into<TypedValue>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut set = AttributeSet::new();
        for (name, value) in iter {
            set.push(name, Some(value.into()));
        }
        set
    }
}

/// Decoded attributes of a single item, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemAttributes {
    values: BTreeMap<String, Vec<TypedValue>>,
}

impl ItemAttributes {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value under `name`, keeping earlier values.
    pub fn insert(&mut self, name: impl Into<String>, value: TypedValue) {
        self.values.entry(name.into()).or_default().push(value);
    }

    /// Returns the values of an attribute, or an empty slice if it is absent.
    pub fn get(&self, name: &str) -> &[TypedValue] {
        self.values.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the first value of an attribute.
    pub fn first(&self, name: &str) -> Option<&TypedValue> {
        self.get(name).first()
    }

    /// Returns true if the attribute has at least one value.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the number of distinct attribute names.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no attributes are present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TypedValue])> {
        self.values
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Consumes the collection, returning the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, Vec<TypedValue>> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_set_order() {
        let set = AttributeSet::new()
            .add("Code", "AAPL")
            .add_all("Price", [10.5, 11.0])
            .add_name("Obsolete");

        let entries: Vec<_> = set.iter().collect();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0], ("Code", Some(&TypedValue::Raw("AAPL".to_string()))));
        assert_eq!(entries[1], ("Price", Some(&TypedValue::Float(10.5))));
        assert_eq!(entries[2], ("Price", Some(&TypedValue::Float(11.0))));
        assert_eq!(entries[3], ("Obsolete", None));
    }

    #[test]
    fn test_attribute_set_from_iter() {
        let set: AttributeSet = [("a", 1i64), ("b", 2i64)].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
        assert!(AttributeSet::new().is_empty());
    }

    #[test]
    fn test_item_attributes() {
        let mut attrs = ItemAttributes::new();
        attrs.insert("Price", TypedValue::Float(1.0));
        attrs.insert("Price", TypedValue::Float(2.0));
        attrs.insert("Code", TypedValue::Raw("X".to_string()));

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("Price"), &[TypedValue::Float(1.0), TypedValue::Float(2.0)]);
        assert_eq!(attrs.first("Code").and_then(TypedValue::as_str), Some("X"));
        assert!(attrs.get("Missing").is_empty());
        assert!(!attrs.contains("Missing"));

        let names: Vec<_> = attrs.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Code", "Price"]);
    }
}
