//! Codec error types.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Failures raised by codecs and the registry.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Lookup miss in the registry. Always a hard error, never a fallback.
    #[error("extension {0:?} has no registered codec")]
    UnknownExtension(String),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Input that decodes cleanly but cannot be represented as a fixture
    /// value (non-string mapping keys, YAML tags, non-finite numbers).
    #[error("unsupported document shape: {0}")]
    Unsupported(String),
}
