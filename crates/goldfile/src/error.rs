//! Error types for fixture loading, saving, and assertion.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using goldfile's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// Identifies the struct field an error is scoped to, rendered `Type.field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRef {
    type_name: &'static str,
    field: &'static str,
}

impl FieldRef {
    #[must_use]
    pub fn new(type_name: &'static str, field: &'static str) -> Self {
        Self { type_name, field }
    }

    #[must_use]
    pub fn field(&self) -> &'static str {
        self.field
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `std::any::type_name` yields a fully-qualified path; keep the bare
        // type name so messages match the declaration site.
        let short = self.type_name.rsplit("::").next().unwrap_or(self.type_name);
        write!(f, "{short}.{}", self.field)
    }
}

/// Filesystem operation that failed, for error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    Read,
    CreateDir,
    Write,
    Delete,
}

impl fmt::Display for FsOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FsOp::Read => "read",
            FsOp::CreateDir => "create dir",
            FsOp::Write => "write",
            FsOp::Delete => "delete",
        })
    }
}

/// Boxed underlying cause for decode/encode failures.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures surfaced by the loader, saver, assertion engine, and suite
/// runner. Every field-level variant carries a [`FieldRef`] so a failure
/// reads `Type.field: ...` all the way up.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller misuse: empty batch of outputs or values.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed field tag. Aborts the whole load/save for the struct.
    #[error("{field}: failed to parse tag {tag:?}: {reason}")]
    TagParse {
        field: FieldRef,
        tag: String,
        reason: String,
    },

    /// A structured field's file extension has no registered codec.
    #[error("{field}: extension {extension:?} has no registered codec")]
    CodecNotFound {
        field: FieldRef,
        extension: String,
    },

    #[error("{field}: failed to decode {path}: {source}", path = .path.display())]
    Decode {
        field: FieldRef,
        path: PathBuf,
        source: Cause,
    },

    #[error("{field}: failed to encode {path}: {source}", path = .path.display())]
    Encode {
        field: FieldRef,
        path: PathBuf,
        source: Cause,
    },

    /// Filesystem failure other than "file not found" (which is never an
    /// error during load).
    #[error("{field}: failed to {op} {path}: {source}", path = .path.display())]
    Filesystem {
        field: FieldRef,
        op: FsOp,
        path: PathBuf,
        source: std::io::Error,
    },

    /// Structural divergence between golden fixtures and runtime values.
    #[error("{type_name}: golden fixture mismatch\n{diff}")]
    AssertionMismatch { type_name: String, diff: String },

    /// A suite root or shared directory could not be enumerated.
    #[error("failed to read dir {path}: {source}", path = .path.display())]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn tag_parse(field: FieldRef, tag: &str, reason: impl Into<String>) -> Self {
        Self::TagParse {
            field,
            tag: tag.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn codec_not_found(field: FieldRef, extension: &str) -> Self {
        Self::CodecNotFound {
            field,
            extension: extension.to_owned(),
        }
    }

    pub(crate) fn decode(field: FieldRef, path: impl Into<PathBuf>, source: impl Into<Cause>) -> Self {
        Self::Decode {
            field,
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn encode(field: FieldRef, path: impl Into<PathBuf>, source: impl Into<Cause>) -> Self {
        Self::Encode {
            field,
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn filesystem(
        field: FieldRef,
        op: FsOp,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Filesystem {
            field,
            op,
            path: path.into(),
            source,
        }
    }
}
