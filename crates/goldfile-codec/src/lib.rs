//! Dynamic value model and extension-keyed codec registry for goldfile.
//!
//! This crate provides:
//! - [`Value`]: explicit tagged variant for dynamically-decoded fixture data
//! - [`Codec`]: pluggable encode/decode strategy keyed by file extension
//! - [`register`] / [`get`]: the process-wide codec registry, seeded with
//!   JSON (`.json`) and YAML (`.yaml`, `.yml`) defaults
//! - [`to_value`] / [`from_value`]: bridges between strongly-typed fixture
//!   fields and the dynamic value model

#![forbid(unsafe_code)]

mod error;
mod json;
mod registry;
mod value;
mod yaml;

pub use error::{CodecError, Result};
pub use json::JsonCodec;
pub use registry::{Codec, get, register};
pub use value::{Number, Value, from_value, to_value};
pub use yaml::YamlCodec;
