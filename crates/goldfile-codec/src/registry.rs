//! Extension-keyed codec registry.
//!
//! Process-wide and mutable only at registration time: tests register any
//! custom codecs during startup, every later lookup is read-only. A lookup
//! miss is a hard error so a typo'd fixture extension fails loudly instead
//! of silently skipping decode.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::error::{CodecError, Result};
use crate::json::JsonCodec;
use crate::value::Value;
use crate::yaml::YamlCodec;

/// An extension-keyed (de)serialization strategy.
///
/// `encode` renders a dynamic value to file bytes; `decode` parses file bytes
/// into a dynamic value. Implementations must be stateless or internally
/// synchronized: the registry hands the same instance to every caller.
pub trait Codec: Send + Sync + std::fmt::Debug {
    fn encode(&self, value: &Value) -> Result<Vec<u8>>;
    fn decode(&self, data: &[u8]) -> Result<Value>;
}

type Registry = BTreeMap<String, Arc<dyn Codec>>;

static REGISTRY: OnceLock<RwLock<Registry>> = OnceLock::new();

fn registry() -> &'static RwLock<Registry> {
    REGISTRY.get_or_init(|| {
        let mut seeded: Registry = BTreeMap::new();
        let json: Arc<dyn Codec> = Arc::new(JsonCodec::default());
        let yaml: Arc<dyn Codec> = Arc::new(YamlCodec::default());
        seeded.insert(".json".to_owned(), json);
        seeded.insert(".yaml".to_owned(), Arc::clone(&yaml));
        seeded.insert(".yml".to_owned(), yaml);
        RwLock::new(seeded)
    })
}

/// Register a codec for a file extension (with leading dot, e.g. `".toml"`).
///
/// The last registration for a given extension wins, so callers can replace
/// the default JSON/YAML codecs with configured instances.
pub fn register(extension: &str, codec: Arc<dyn Codec>) {
    registry().write().insert(extension.to_owned(), codec);
}

/// Look up the codec registered for a file extension.
pub fn get(extension: &str) -> Result<Arc<dyn Codec>> {
    registry()
        .read()
        .get(extension)
        .cloned()
        .ok_or_else(|| CodecError::UnknownExtension(extension.to_owned()))
}
