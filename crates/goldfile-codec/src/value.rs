//! Dynamic fixture values.
//!
//! Codecs decode fixture files into [`Value`] rather than into an untyped
//! hole, so directory-overlay merges and diff rendering can walk the data
//! without knowing the caller's types. Strongly-typed fields convert through
//! [`Value`] with [`to_value`] / [`from_value`].

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CodecError;

/// A number literal preserved exactly as it appeared in the fixture file.
///
/// Keeping the literal (rather than an eagerly-parsed binary form) means a
/// decode/encode round trip writes the same bytes back, which is what keeps
/// golden files stable under high-precision values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Number {
    repr: String,
}

impl Number {
    /// Parse a JSON number literal, validating its syntax.
    pub fn from_literal(literal: impl Into<String>) -> Result<Self, CodecError> {
        let repr = literal.into();
        serde_json::from_str::<serde_json::Number>(&repr).map_err(CodecError::Json)?;
        Ok(Self { repr })
    }

    /// Lossless conversion from a finite float. Returns `None` for NaN and
    /// infinities, which have no JSON representation.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        serde_json::Number::from_f64(value).map(|n| Self {
            repr: n.to_string(),
        })
    }

    /// The underlying literal.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.repr
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.repr.parse().ok()
    }

    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.repr.parse().ok()
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.repr.parse().ok().filter(|f: &f64| f.is_finite())
    }

    pub(crate) fn from_json_number(n: &serde_json::Number) -> Self {
        Self {
            repr: n.to_string(),
        }
    }

    pub(crate) fn to_json_number(&self) -> serde_json::Number {
        serde_json::Number::from_string_unchecked(self.repr.clone())
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self {
            repr: value.to_string(),
        }
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Self {
            repr: value.to_string(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

/// Explicit tagged variant for dynamically-decoded fixture data.
///
/// Mappings are string-keyed and sorted so that every walk over a value is
/// deterministic. `Bytes` never comes out of the JSON/YAML codecs; it exists
/// so raw slots have a uniform snapshot representation during comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Bytes(Vec<u8>),
    Sequence(Vec<Value>),
    Mapping(BTreeMap<String, Value>),
}

impl Value {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Overlay `other` on top of `self`.
    ///
    /// Mappings merge recursively per key; every other pairing is replaced by
    /// `other` wholesale. This is the loader's pre-seed rule: a later overlay
    /// file only has to mention the keys it changes.
    #[must_use]
    pub fn merge(self, other: Value) -> Value {
        match (self, other) {
            (Value::Mapping(mut base), Value::Mapping(overlay)) => {
                for (key, incoming) in overlay {
                    let merged = match base.remove(&key) {
                        Some(existing) => existing.merge(incoming),
                        None => incoming,
                    };
                    base.insert(key, merged);
                }
                Value::Mapping(base)
            }
            (_, other) => other,
        }
    }

    /// Convert to the `serde_json` data model (bytes become a number array).
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.to_json_number()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => serde_json::Value::Array(
                b.iter()
                    .map(|byte| serde_json::Value::Number(u64::from(*byte).into()))
                    .collect(),
            ),
            Value::Sequence(seq) => serde_json::Value::Array(seq.iter().map(Value::to_json).collect()),
            Value::Mapping(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// Convert from the `serde_json` data model.
    #[must_use]
    pub fn from_json(value: serde_json::Value) -> Value {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(Number::from_json_number(&n)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(fields) => Value::Mapping(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.to_json()) {
            Ok(rendered) => f.write_str(&rendered),
            Err(_) => f.write_str("<unrenderable>"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::from(value))
    }
}

// Serde impls delegate to the serde_json data model, which handles the
// arbitrary-precision number representation on both ends.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from_json)
    }
}

/// Serialize any value into a [`Value`] tree.
pub fn to_value<T: Serialize>(value: &T) -> Result<Value, CodecError> {
    serde_json::to_value(value)
        .map(Value::from_json)
        .map_err(CodecError::Json)
}

/// Deserialize a [`Value`] tree into a concrete type.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, CodecError> {
    serde_json::from_value(value.to_json()).map_err(CodecError::Json)
}
