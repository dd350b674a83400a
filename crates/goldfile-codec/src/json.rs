//! JSON codec.

use serde::Serialize;

use crate::error::Result;
use crate::registry::Codec;
use crate::value::Value;

/// JSON codec with configurable pretty-print indentation.
///
/// Decoding preserves number literals exactly, so a decode/encode round trip
/// does not perturb high-precision values in golden files.
#[derive(Debug, Clone)]
pub struct JsonCodec {
    /// Indent width in spaces; `0` emits compact output.
    pub indent: usize,
}

impl JsonCodec {
    #[must_use]
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl Codec for JsonCodec {
    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let json = value.to_json();
        if self.indent == 0 {
            return Ok(serde_json::to_vec(&json)?);
        }

        let indent = " ".repeat(self.indent);
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        json.serialize(&mut serializer)?;
        Ok(out)
    }

    fn decode(&self, data: &[u8]) -> Result<Value> {
        let json: serde_json::Value = serde_json::from_slice(data)?;
        Ok(Value::from_json(json))
    }
}
