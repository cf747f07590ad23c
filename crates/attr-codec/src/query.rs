//! Query expressions over encoded attribute values.
//!
//! Attribute stores compare query literals to stored strings byte-wise, so a
//! range query on typed data only works if its literals are encoded the same
//! way as the stored values. Predicates here hold typed values and encode
//! them at render time with the caller's [`EncodeOptions`].
//!
//! ```rust
//! use attr_codec::query::{Comparison, Expression, Predicate};
//! use attr_codec::EncodeOptions;
//!
//! let price = Predicate::new("Price")
//!     .compare(Comparison::GtEq, 10.0)
//!     .and(Comparison::Lt, 20.0);
//! let expr = Expression::from(price).intersection(Predicate::new("Code").compare(Comparison::Eq, "AAPL"));
//!
//! assert_eq!(
//!     expr.render(&EncodeOptions::default()).unwrap(),
//!     "['Price' >= '!f52!100000000000000' and 'Price' < '!f52!200000000000000'] \
//!      intersection ['Code' = 'AAPL']"
//! );
//! ```

use std::fmt::Write as _;

use crate::codec::value::{encode_attribute_value_with_options, EncodeOptions};
use crate::error::EncodeError;
use crate::model::TypedValue;

/// Comparison operators available inside a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    StartsWith,
}

impl Comparison {
    /// Returns the operator as written in a query.
    pub fn as_str(self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::NotEq => "!=",
            Comparison::Lt => "<",
            Comparison::LtEq => "<=",
            Comparison::Gt => ">",
            Comparison::GtEq => ">=",
            Comparison::StartsWith => "starts-with",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connective {
    And,
    Or,
}

/// Comparisons against a single attribute, rendered as one bracketed term.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    attribute: String,
    comparisons: Vec<(Connective, Comparison, TypedValue)>,
}

impl Predicate {
    /// Starts a predicate on `attribute` with no comparisons.
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            comparisons: Vec::new(),
        }
    }

    /// Matches values inside `low..=high`.
    pub fn between(
        attribute: impl Into<String>,
        low: impl Into<TypedValue>,
        high: impl Into<TypedValue>,
    ) -> Self {
        Self::new(attribute)
            .compare(Comparison::GtEq, low)
            .and(Comparison::LtEq, high)
    }

    /// Adds a comparison, joined with `and` if one is already present.
    pub fn compare(self, op: Comparison, value: impl Into<TypedValue>) -> Self {
        self.and(op, value)
    }

    /// Adds a comparison joined with `and`.
    pub fn and(mut self, op: Comparison, value: impl Into<TypedValue>) -> Self {
        self.comparisons.push((Connective::And, op, value.into()));
        self
    }

    /// Adds a comparison joined with `or`.
    pub fn or(mut self, op: Comparison, value: impl Into<TypedValue>) -> Self {
        self.comparisons.push((Connective::Or, op, value.into()));
        self
    }

    /// Returns the attribute name.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Renders `['attr' op 'value' and ...]`.
    pub fn render(&self, options: &EncodeOptions) -> Result<String, EncodeError> {
        if self.comparisons.is_empty() {
            return Err(EncodeError::EmptyPredicate {
                attribute: self.attribute.clone(),
            });
        }

        let name = quote(&self.attribute);
        let mut out = String::from("[");
        for (i, (connective, op, value)) in self.comparisons.iter().enumerate() {
            if i > 0 {
                out.push_str(match connective {
                    Connective::And => " and ",
                    Connective::Or => " or ",
                });
            }
            // Raw values encode to themselves, so this is never None
            let literal = encode_attribute_value_with_options(value, options)?.unwrap_or_default();
            let _ = write!(out, "{} {} {}", name, op.as_str(), quote(&literal));
        }
        out.push(']');
        Ok(out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetOperator {
    Intersection,
    Union,
}

/// Predicates combined with set operators, evaluated left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    first: (bool, Predicate),
    rest: Vec<(SetOperator, bool, Predicate)>,
}

impl From<Predicate> for Expression {
    fn from(predicate: Predicate) -> Self {
        Self {
            first: (false, predicate),
            rest: Vec::new(),
        }
    }
}

impl Expression {
    /// Starts an expression matching items the predicate does not match.
    pub fn not(predicate: Predicate) -> Self {
        Self {
            first: (true, predicate),
            rest: Vec::new(),
        }
    }

    /// Keeps only items also matching `predicate`.
    pub fn intersection(mut self, predicate: Predicate) -> Self {
        self.rest.push((SetOperator::Intersection, false, predicate));
        self
    }

    /// Adds items matching `predicate`.
    pub fn union(mut self, predicate: Predicate) -> Self {
        self.rest.push((SetOperator::Union, false, predicate));
        self
    }

    /// Removes items matching `predicate`.
    pub fn except(mut self, predicate: Predicate) -> Self {
        self.rest.push((SetOperator::Intersection, true, predicate));
        self
    }

    /// Renders the full query expression.
    pub fn render(&self, options: &EncodeOptions) -> Result<String, EncodeError> {
        let (negated, predicate) = &self.first;
        let mut out = render_term(*negated, predicate, options)?;

        for (op, negated, predicate) in &self.rest {
            out.push_str(match op {
                SetOperator::Intersection => " intersection ",
                SetOperator::Union => " union ",
            });
            out.push_str(&render_term(*negated, predicate, options)?);
        }
        Ok(out)
    }
}

fn render_term(
    negated: bool,
    predicate: &Predicate,
    options: &EncodeOptions,
) -> Result<String, EncodeError> {
    let term = predicate.render(options)?;
    Ok(if negated { format!("not {}", term) } else { term })
}

/// Single-quotes `s`, escaping quotes and backslashes.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Timestamp;

    #[test]
    fn test_single_comparison() {
        let predicate = Predicate::new("Code").compare(Comparison::NotEq, "AAPL");
        assert_eq!(
            predicate.render(&EncodeOptions::default()).unwrap(),
            "['Code' != 'AAPL']"
        );
    }

    #[test]
    fn test_encoded_literals() {
        let since: Timestamp = "2007-06-05T00:00:00Z".parse().unwrap();
        let options = EncodeOptions::new()
            .with_integer_digits(4)
            .with_timestamp_precision(crate::model::TimestampPrecision::Seconds);

        let predicate = Predicate::new("Date").compare(Comparison::Gt, since);
        assert_eq!(
            predicate.render(&options).unwrap(),
            "['Date' > '!d2007-06-05T00:00:00Z']"
        );

        let predicate = Predicate::between("Volume", -5i64, 250i64);
        assert_eq!(
            predicate.render(&options).unwrap(),
            "['Volume' >= '!I9995' and 'Volume' <= '!i0250']"
        );
    }

    #[test]
    fn test_or_and_starts_with() {
        let predicate = Predicate::new("Name")
            .compare(Comparison::StartsWith, "Al")
            .or(Comparison::Eq, "Bob");
        assert_eq!(
            predicate.render(&EncodeOptions::default()).unwrap(),
            "['Name' starts-with 'Al' or 'Name' = 'Bob']"
        );
    }

    #[test]
    fn test_expression_set_operators() {
        let options = EncodeOptions::default();
        let expr = Expression::not(Predicate::new("Active").compare(Comparison::Eq, false))
            .union(Predicate::new("Code").compare(Comparison::Eq, "X"))
            .except(Predicate::new("Code").compare(Comparison::Eq, "Y"));
        assert_eq!(
            expr.render(&options).unwrap(),
            "not ['Active' = '!B'] union ['Code' = 'X'] intersection not ['Code' = 'Y']"
        );
    }

    #[test]
    fn test_quoting() {
        let predicate = Predicate::new("it's").compare(Comparison::Eq, r"a\b'c");
        assert_eq!(
            predicate.render(&EncodeOptions::default()).unwrap(),
            r"['it\'s' = 'a\\b\'c']"
        );
    }

    #[test]
    fn test_render_errors() {
        let options = EncodeOptions::default();
        assert_eq!(
            Predicate::new("Empty").render(&options),
            Err(EncodeError::EmptyPredicate { attribute: "Empty".to_string() })
        );

        let expr = Expression::from(Predicate::new("A").compare(Comparison::Eq, 1i64))
            .intersection(Predicate::new("B").compare(Comparison::Lt, f64::NAN));
        assert!(matches!(
            expr.render(&options),
            Err(EncodeError::NonFiniteFloat { .. })
        ));
    }
}
