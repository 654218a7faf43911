//! Attribute values: structurally comparable data plus the deletion marker.
//!
//! An attribute value is an owned tree of scalars, sequences, and maps, or the
//! [`AttributeValue::Remove`] marker. The marker means "this attribute is
//! explicitly removed here" and is distinct from the key simply being absent
//! from a map, which means the map says nothing about that attribute.
//!
//! On the wire (JSON) the marker is carried as `null`, matching the format the
//! delta interchange encoding uses. In memory it is its own variant so that
//! "explicitly deleted" can never be confused with an empty or zero value.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// A single attribute value.
///
/// Equality is derived and therefore deep: two values are equal iff they are
/// structurally equal, recursively through sequences and maps. Cloning is
/// likewise deep; a clone shares no structure with its source.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// The deletion marker: this attribute is explicitly removed.
    Remove,
    /// A boolean scalar.
    Bool(bool),
    /// A numeric scalar (integer or floating point).
    Number(serde_json::Number),
    /// A string scalar.
    String(String),
    /// An ordered sequence of nested values.
    Sequence(Vec<AttributeValue>),
    /// A nested string-keyed map of values.
    Map(BTreeMap<String, AttributeValue>),
}

impl AttributeValue {
    /// Returns `true` if this value is the deletion marker.
    #[must_use]
    pub fn is_remove(&self) -> bool {
        matches!(self, Self::Remove)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<serde_json::Value> for AttributeValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Remove,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(entries) => {
                Self::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<AttributeValue> for serde_json::Value {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::Remove => serde_json::Value::Null,
            AttributeValue::Bool(b) => serde_json::Value::Bool(b),
            AttributeValue::Number(n) => serde_json::Value::Number(n),
            AttributeValue::String(s) => serde_json::Value::String(s),
            AttributeValue::Sequence(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            AttributeValue::Map(entries) => serde_json::Value::Object(
                entries.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Remove => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Sequence(items) => items.serialize(serializer),
            Self::Map(entries) => entries.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_maps_to_remove_and_back() {
        let value = AttributeValue::from(json!(null));
        assert!(value.is_remove());
        assert_eq!(serde_json::Value::from(value), json!(null));
    }

    #[test]
    fn deep_equality_over_nested_values() {
        let a = AttributeValue::from(json!({"font": {"family": "mono", "size": 12}}));
        let b = AttributeValue::from(json!({"font": {"size": 12, "family": "mono"}}));
        let c = AttributeValue::from(json!({"font": {"family": "mono", "size": 13}}));

        // Key order is irrelevant, content is not.
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn remove_is_not_an_empty_value() {
        assert_ne!(AttributeValue::Remove, AttributeValue::Bool(false));
        assert_ne!(AttributeValue::Remove, AttributeValue::String(String::new()));
        assert_ne!(AttributeValue::Remove, AttributeValue::Sequence(Vec::new()));
        assert_ne!(AttributeValue::Remove, AttributeValue::Map(BTreeMap::new()));
    }

    #[test]
    fn clone_is_independent() {
        let original = AttributeValue::from(json!({"list": [1, 2, 3]}));
        let mut copy = original.clone();
        if let AttributeValue::Map(entries) = &mut copy {
            entries.insert("extra".to_string(), AttributeValue::Bool(true));
        }
        assert_eq!(original, AttributeValue::from(json!({"list": [1, 2, 3]})));
    }

    #[test]
    fn serde_round_trip_preserves_marker() {
        let value = AttributeValue::from(json!({"bold": null, "size": 12}));
        let text = serde_json::to_string(&value).unwrap();
        let back: AttributeValue = serde_json::from_str(&text).unwrap();
        assert_eq!(value, back);
    }
}
