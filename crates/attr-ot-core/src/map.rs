//! Attribute maps: string-keyed sets of attribute values.
//!
//! An [`AttributeMap`] is an order-irrelevant mapping from attribute name to
//! [`AttributeValue`]. Identity is by content; the backing `BTreeMap` keeps
//! iteration and printing deterministic regardless of insertion order.
//!
//! Absence of a key means "this map says nothing about that attribute". A key
//! stored with [`AttributeValue::Remove`] means "this attribute is explicitly
//! removed". The two are never conflated: there is no way to store absence.

use crate::value::AttributeValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Error returned when parsing an attribute map from JSON text.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The input was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string-keyed map of attribute values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap(BTreeMap<String, AttributeValue>);

impl AttributeMap {
    /// Create an empty attribute map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Interpret a JSON value as an attribute map.
    ///
    /// Returns `Some` iff the value is a JSON object; every `null` member
    /// becomes the deletion marker. Any other JSON value is not a map and
    /// yields `None`; callers that want the lenient "coerce to empty"
    /// behavior use `from_json(v).unwrap_or_default()` or [`Self::parse`].
    #[must_use]
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Object(entries) => Some(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Parse JSON text, coercing any non-object value to an empty map.
    ///
    /// This is the permissive entry point: `"null"`, `"42"`, or `"[]"` all
    /// parse to an empty map rather than an error. Only malformed JSON fails.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] if the input is not valid JSON.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Ok(Self::parse_opt(input)?.unwrap_or_default())
    }

    /// Parse JSON text, yielding `None` when the value is not an object.
    ///
    /// Used where the distinction between "empty map" and "no map at all"
    /// matters, as it does for [`crate::transform`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] if the input is not valid JSON.
    pub fn parse_opt(input: &str) -> Result<Option<Self>, ParseError> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        Ok(Self::from_json(value))
    }

    /// Convert back to a JSON object, with deletion markers as `null`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(key, value)| (key.clone(), value.clone().into()))
                .collect(),
        )
    }

    /// Get the value stored for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    /// Returns `true` if `key` is present, including as a deletion marker.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert a value, returning the previous value for the key if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a key entirely (the map then says nothing about it).
    pub fn remove(&mut self, key: &str) -> Option<AttributeValue> {
        self.0.remove(key)
    }

    /// Keep only the entries for which `predicate` returns `true`.
    pub fn retain(&mut self, predicate: impl FnMut(&String, &mut AttributeValue) -> bool) {
        self.0.retain(predicate);
    }

    /// Number of keys present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no keys are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.0.iter()
    }

    /// Iterate over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

impl fmt::Display for AttributeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl FromIterator<(String, AttributeValue)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (String, AttributeValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<(String, AttributeValue)> for AttributeMap {
    fn extend<I: IntoIterator<Item = (String, AttributeValue)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for AttributeMap {
    type Item = (String, AttributeValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = (&'a String, &'a AttributeValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
