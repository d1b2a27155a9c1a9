//! Structured item metadata
//!
//! Items may carry arbitrary extra state (enchantments, dye colors, book
//! pages, ...) as a tree of scalars, lists and string-keyed compounds. Two
//! stacks only merge when this tree is structurally identical on both sides.
//!
//! # Equality rules
//!
//! - Scalars are equal when they have the same variant and the same value.
//!   Widths are part of the variant: `Int(1)` and `Long(1)` differ.
//! - Floats use IEEE comparison, so a `NaN` payload is never equal to itself.
//! - Lists are equal when they have the same length and equal elements in
//!   the same order.
//! - Compounds are equal when they have exactly the same keys and the values
//!   under each key are equal. Insertion order is irrelevant.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node in an item's structured metadata tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Metadata {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),

    /// Ordered sequence of nodes
    List(Vec<Metadata>),

    /// Mapping from string keys to nodes
    Compound(BTreeMap<String, Metadata>),
}

impl Metadata {
    /// Creates an empty compound, the usual root of an item's metadata
    pub fn compound() -> Self {
        Metadata::Compound(BTreeMap::new())
    }

    /// Returns a copy of this compound with `key` set to `value`
    ///
    /// Non-compound nodes are returned unchanged.
    ///
    /// # Example
    /// ```
    /// use item_stack::item::Metadata;
    ///
    /// let meta = Metadata::compound().with("color", "red").with("level", 3);
    /// assert_eq!(meta.get("level"), Some(&Metadata::Int(3)));
    /// ```
    pub fn with(self, key: impl Into<String>, value: impl Into<Metadata>) -> Self {
        match self {
            Metadata::Compound(mut entries) => {
                entries.insert(key.into(), value.into());
                Metadata::Compound(entries)
            }
            other => other,
        }
    }

    /// Looks up a key in a compound node
    pub fn get(&self, key: &str) -> Option<&Metadata> {
        match self {
            Metadata::Compound(entries) => entries.get(key),
            _ => None,
        }
    }

    /// Recursively compares two trees
    pub fn deep_eq(&self, other: &Metadata) -> bool {
        use Metadata::*;

        match (self, other) {
            (Bool(a), Bool(b)) => a == b,
            (Byte(a), Byte(b)) => a == b,
            (Short(a), Short(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Long(a), Long(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Double(a), Double(b)) => a == b,
            (String(a), String(b)) => a == b,
            (List(a), List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.deep_eq(y))
            }
            (Compound(a), Compound(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, value)| {
                        b.get(key).is_some_and(|other| value.deep_eq(other))
                    })
            }
            _ => false,
        }
    }
}

impl PartialEq for Metadata {
    fn eq(&self, other: &Self) -> bool {
        self.deep_eq(other)
    }
}

impl From<bool> for Metadata {
    fn from(value: bool) -> Self {
        Metadata::Bool(value)
    }
}

impl From<i8> for Metadata {
    fn from(value: i8) -> Self {
        Metadata::Byte(value)
    }
}

impl From<i16> for Metadata {
    fn from(value: i16) -> Self {
        Metadata::Short(value)
    }
}

impl From<i32> for Metadata {
    fn from(value: i32) -> Self {
        Metadata::Int(value)
    }
}

impl From<i64> for Metadata {
    fn from(value: i64) -> Self {
        Metadata::Long(value)
    }
}

impl From<f32> for Metadata {
    fn from(value: f32) -> Self {
        Metadata::Float(value)
    }
}

impl From<f64> for Metadata {
    fn from(value: f64) -> Self {
        Metadata::Double(value)
    }
}

impl From<&str> for Metadata {
    fn from(value: &str) -> Self {
        Metadata::String(value.to_string())
    }
}

impl From<String> for Metadata {
    fn from(value: String) -> Self {
        Metadata::String(value)
    }
}

impl<T: Into<Metadata>> From<Vec<T>> for Metadata {
    fn from(values: Vec<T>) -> Self {
        Metadata::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Metadata {
    /// Converts loosely-typed JSON into a metadata tree
    ///
    /// JSON has a single number type, so integers become `Long` and every
    /// other number becomes `Double`. `null` becomes an empty compound.
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Metadata::compound(),
            Value::Bool(b) => Metadata::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Metadata::Long(i),
                None => Metadata::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Metadata::String(s),
            Value::Array(values) => {
                Metadata::List(values.into_iter().map(Metadata::from).collect())
            }
            Value::Object(entries) => Metadata::Compound(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Metadata::from(value)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn enchanted() -> Metadata {
        Metadata::compound()
            .with("enchantments", vec![
                Metadata::compound().with("id", 16i16).with("lvl", 3i16),
                Metadata::compound().with("id", 34i16).with("lvl", 1i16),
            ])
            .with("repair_cost", 2)
    }

    #[test]
    fn test_identical_trees_are_equal() {
        assert_eq!(enchanted(), enchanted());
    }

    #[test]
    fn test_list_order_matters() {
        let reversed = Metadata::compound()
            .with("enchantments", vec![
                Metadata::compound().with("id", 34i16).with("lvl", 1i16),
                Metadata::compound().with("id", 16i16).with("lvl", 3i16),
            ])
            .with("repair_cost", 2);

        assert_ne!(enchanted(), reversed);
    }

    #[test]
    fn test_list_length_matters() {
        let short = Metadata::from(vec![1, 2]);
        let long = Metadata::from(vec![1, 2, 3]);

        assert_ne!(short, long);
        assert_ne!(long, short);
    }

    #[test]
    fn test_compound_key_sets_must_match() {
        let base = Metadata::compound().with("a", 1);
        let extra = Metadata::compound().with("a", 1).with("b", 2);

        assert_ne!(base, extra);
        assert_ne!(extra, base);
    }

    #[test]
    fn test_compound_insertion_order_irrelevant() {
        let first = Metadata::compound().with("a", 1).with("b", "x");
        let second = Metadata::compound().with("b", "x").with("a", 1);

        assert_eq!(first, second);
    }

    #[test]
    fn test_scalar_width_matters() {
        assert_ne!(Metadata::Int(1), Metadata::Long(1));
        assert_ne!(Metadata::Float(1.0), Metadata::Double(1.0));
    }

    #[test]
    fn test_nan_is_not_equal() {
        assert_ne!(Metadata::Double(f64::NAN), Metadata::Double(f64::NAN));
    }

    #[test]
    fn test_with_on_scalar_is_noop() {
        let scalar = Metadata::Int(7).with("ignored", 1);
        assert_eq!(scalar, Metadata::Int(7));
        assert_eq!(scalar.get("ignored"), None);
    }

    #[test]
    fn test_from_json() {
        let meta = Metadata::from(json!({
            "display": { "color": 16711680 },
            "pages": ["one", "two"],
            "weight": 1.5,
            "signed": true,
            "extra": null
        }));

        let expected = Metadata::compound()
            .with("display", Metadata::compound().with("color", 16711680i64))
            .with("pages", vec!["one", "two"])
            .with("weight", 1.5f64)
            .with("signed", true)
            .with("extra", Metadata::compound());

        assert_eq!(meta, expected);
    }

    #[test]
    fn test_serde_json_roundtrip_keeps_widths() {
        let meta = enchanted();
        let encoded = serde_json::to_string(&meta).unwrap();
        let decoded: Metadata = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, meta);
    }
}
