//! YAML codec.

use crate::error::{CodecError, Result};
use crate::registry::Codec;
use crate::value::{Number, Value};

/// YAML codec covering `.yaml` and `.yml` fixtures.
///
/// The indent width is part of the construction API for symmetry with
/// [`crate::JsonCodec`], but `serde_yaml_ng` always emits two-space
/// indentation; other widths are accepted and not honored.
#[derive(Debug, Clone)]
pub struct YamlCodec {
    pub indent: usize,
}

impl YamlCodec {
    #[must_use]
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }
}

impl Default for YamlCodec {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl Codec for YamlCodec {
    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let yaml = to_yaml(value)?;
        Ok(serde_yaml_ng::to_string(&yaml)?.into_bytes())
    }

    fn decode(&self, data: &[u8]) -> Result<Value> {
        let yaml: serde_yaml_ng::Value = serde_yaml_ng::from_slice(data)?;
        from_yaml(yaml)
    }
}

fn from_yaml(value: serde_yaml_ng::Value) -> Result<Value> {
    match value {
        serde_yaml_ng::Value::Null => Ok(Value::Null),
        serde_yaml_ng::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_yaml_ng::Value::Number(n) => from_yaml_number(&n).map(Value::Number),
        serde_yaml_ng::Value::String(s) => Ok(Value::String(s)),
        serde_yaml_ng::Value::Sequence(items) => Ok(Value::Sequence(
            items.into_iter().map(from_yaml).collect::<Result<_>>()?,
        )),
        serde_yaml_ng::Value::Mapping(mapping) => {
            let mut out = std::collections::BTreeMap::new();
            for (key, item) in mapping {
                let serde_yaml_ng::Value::String(key) = key else {
                    return Err(CodecError::Unsupported(
                        "mapping keys must be strings".to_owned(),
                    ));
                };
                out.insert(key, from_yaml(item)?);
            }
            Ok(Value::Mapping(out))
        }
        serde_yaml_ng::Value::Tagged(tagged) => Err(CodecError::Unsupported(format!(
            "YAML tag {} is not supported",
            tagged.tag
        ))),
    }
}

fn from_yaml_number(n: &serde_yaml_ng::Number) -> Result<Number> {
    if let Some(i) = n.as_i64() {
        Ok(Number::from(i))
    } else if let Some(u) = n.as_u64() {
        Ok(Number::from(u))
    } else if let Some(f) = n.as_f64() {
        Number::from_f64(f)
            .ok_or_else(|| CodecError::Unsupported("non-finite number".to_owned()))
    } else {
        Err(CodecError::Unsupported("unrepresentable number".to_owned()))
    }
}

fn to_yaml(value: &Value) -> Result<serde_yaml_ng::Value> {
    match value {
        Value::Null => Ok(serde_yaml_ng::Value::Null),
        Value::Bool(b) => Ok(serde_yaml_ng::Value::Bool(*b)),
        Value::Number(n) => to_yaml_number(n).map(serde_yaml_ng::Value::Number),
        Value::String(s) => Ok(serde_yaml_ng::Value::String(s.clone())),
        Value::Bytes(bytes) => Ok(serde_yaml_ng::Value::Sequence(
            bytes
                .iter()
                .map(|b| serde_yaml_ng::Value::Number(u64::from(*b).into()))
                .collect(),
        )),
        Value::Sequence(items) => Ok(serde_yaml_ng::Value::Sequence(
            items.iter().map(to_yaml).collect::<Result<_>>()?,
        )),
        Value::Mapping(map) => {
            let mut out = serde_yaml_ng::Mapping::new();
            for (key, item) in map {
                out.insert(serde_yaml_ng::Value::String(key.clone()), to_yaml(item)?);
            }
            Ok(serde_yaml_ng::Value::Mapping(out))
        }
    }
}

fn to_yaml_number(n: &Number) -> Result<serde_yaml_ng::Number> {
    if let Some(i) = n.as_i64() {
        Ok(i.into())
    } else if let Some(u) = n.as_u64() {
        Ok(u.into())
    } else if let Some(f) = n.as_f64() {
        Ok(f.into())
    } else {
        Err(CodecError::Unsupported(format!(
            "number {n} cannot be represented in YAML"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn round_trips_a_document() {
        let codec = YamlCodec::default();
        let value = codec
            .decode(b"name: demo\ncount: 3\nnested:\n  flag: true\n")
            .expect("decode");

        let Value::Mapping(map) = &value else {
            panic!("expected mapping, got {value:?}");
        };
        assert_eq!(map.get("name"), Some(&Value::String("demo".to_owned())));
        assert_eq!(map.get("count"), Some(&Value::from(3)));

        let encoded = codec.encode(&value).expect("encode");
        let again = codec.decode(&encoded).expect("decode encoded");
        assert_eq!(again, value);
    }

    #[test]
    fn rejects_non_string_keys() {
        let codec = YamlCodec::default();
        let err = codec.decode(b"1: one\n").expect_err("integer key");
        assert!(matches!(err, CodecError::Unsupported(_)));
    }

    #[test]
    fn rejects_yaml_tags() {
        let codec = YamlCodec::default();
        let err = codec.decode(b"value: !custom 1\n").expect_err("tagged node");
        assert!(matches!(err, CodecError::Unsupported(_)));
    }

    #[test]
    fn encodes_sorted_mappings() {
        let codec = YamlCodec::default();
        let mut map = BTreeMap::new();
        map.insert("b".to_owned(), Value::from(2));
        map.insert("a".to_owned(), Value::from(1));
        let out = codec.encode(&Value::Mapping(map)).expect("encode");
        assert_eq!(String::from_utf8(out).expect("utf8"), "a: 1\nb: 2\n");
    }
}
