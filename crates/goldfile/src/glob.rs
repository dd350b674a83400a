//! Glob expansion for exploded fields.
//!
//! [`expand`] is a pure function from `(root, pattern)` to the sorted set of
//! `(relative key, absolute path)` matches, independent of any decode step,
//! so pattern semantics can be tested directly against a scratch directory.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlobError {
    #[error("invalid glob pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("failed to inspect matched path: {0}")]
    Walk(#[from] glob::GlobError),

    #[error("non-UTF-8 path under {0}")]
    NonUtf8(PathBuf),

    #[error("match {matched} escapes search root {root}", matched = .matched.display(), root = .root.display())]
    Escaped { matched: PathBuf, root: PathBuf },
}

/// Expand `pattern` relative to `root`.
///
/// Returns `(relative key, matched path)` pairs sorted by key, files only.
/// A root that does not exist simply yields no matches.
pub fn expand(root: &Path, pattern: &str) -> Result<Vec<(String, PathBuf)>, GlobError> {
    let full = root.join(pattern);
    let full = match full.to_str() {
        Some(s) => s.to_owned(),
        None => return Err(GlobError::NonUtf8(full)),
    };

    let mut matches = Vec::new();
    let paths = glob::glob(&full).map_err(|source| GlobError::Pattern {
        pattern: pattern.to_owned(),
        source,
    })?;
    for entry in paths {
        let path = entry?;
        if !path.is_file() {
            continue;
        }
        let relative = path
            .strip_prefix(root)
            .map_err(|_| GlobError::Escaped {
                matched: path.clone(),
                root: root.to_owned(),
            })?;
        let key = match relative.to_str() {
            Some(key) => key.to_owned(),
            None => return Err(GlobError::NonUtf8(path)),
        };
        matches.push((key, path));
    }

    matches.sort();
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_relative_to_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("b.txt"), "b").expect("write");
        std::fs::write(dir.path().join("a.txt"), "a").expect("write");
        std::fs::write(dir.path().join("c.json"), "{}").expect("write");

        let matches = expand(dir.path(), "*.txt").expect("expand");
        let keys: Vec<&str> = matches.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a.txt", "b.txt"]);
        assert!(matches.iter().all(|(_, p)| p.starts_with(dir.path())));
    }

    #[test]
    fn matches_in_subdirectories() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join("sub")).expect("mkdir");
        std::fs::write(dir.path().join("sub/c.txt"), "c").expect("write");

        let matches = expand(dir.path(), "sub/*.txt").expect("expand");
        let keys: Vec<&str> = matches.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["sub/c.txt"]);
    }

    #[test]
    fn directories_are_not_matches() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join("nested.txt")).expect("mkdir");
        assert!(expand(dir.path(), "*.txt").expect("expand").is_empty());
    }

    #[test]
    fn missing_root_yields_no_matches() {
        let dir = tempfile::tempdir().expect("tempdir");
        let gone = dir.path().join("does-not-exist");
        assert!(expand(&gone, "*.txt").expect("expand").is_empty());
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = expand(dir.path(), "[").expect_err("bad pattern");
        assert!(matches!(err, GlobError::Pattern { .. }));
    }
}
