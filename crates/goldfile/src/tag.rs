//! Field tag parsing.
//!
//! A tag is `"name[,option]*"`: the name is a path relative to the fixture
//! directory (or a glob pattern for exploded fields), followed by
//! comma-separated options. Recognized options: `optional`, `explode`,
//! `golden`, `omitempty`. `optional`, `golden`, and `omitempty` are accepted
//! for compatibility but carry no behavior: missing files are universally
//! non-fatal and zero values always delete on save.

/// Parsed form of a field tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Relative path, or glob pattern when `explode` is set.
    pub name: String,
    pub optional: bool,
    pub explode: bool,
    pub golden: bool,
    pub omitempty: bool,
}

impl Tag {
    /// Parse a raw tag string.
    ///
    /// Returns `Ok(None)` for an empty or `-` name (field is skipped, not an
    /// error) and `Err(reason)` for malformed syntax, which aborts the whole
    /// load/save for the struct.
    pub fn parse(raw: &str) -> Result<Option<Tag>, String> {
        let mut parts = raw.split(',');
        let name = parts.next().unwrap_or_default();

        if name.is_empty() || name == "-" {
            return Ok(None);
        }

        let mut tag = Tag {
            name: name.to_owned(),
            optional: false,
            explode: false,
            golden: false,
            omitempty: false,
        };

        for option in parts {
            match option {
                "" => return Err("empty option".to_owned()),
                "optional" => tag.optional = true,
                "explode" => tag.explode = true,
                "golden" => tag.golden = true,
                "omitempty" => tag.omitempty = true,
                other => return Err(format!("unknown option {other:?}")),
            }
        }

        Ok(Some(tag))
    }

    /// Extension of the tag's path, with leading dot (`".json"`), or the
    /// empty string when the path has none.
    #[must_use]
    pub fn extension(&self) -> String {
        extension_of(&self.name)
    }
}

/// Extension of a relative path string, with leading dot, or `""`.
pub(crate) fn extension_of(path: &str) -> String {
    std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}
