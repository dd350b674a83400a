//! Fixture tree validation, backing the `goldfile validate` CLI command.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::trace;

use crate::error::{Error, Result};
use crate::tag::extension_of;

/// Outcome of walking a fixture tree.
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    /// Files decoded through a registered codec.
    pub checked: usize,
    /// Files whose extension has no registered codec (raw fixtures).
    pub skipped: usize,
    pub failures: Vec<ValidationFailure>,
}

impl ValidationReport {
    #[must_use]
    pub fn ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One file that could not be read or decoded.
#[derive(Debug, Serialize)]
pub struct ValidationFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Recursively decode every file under `root` that has a registered codec.
///
/// Read and decode failures are collected in the report rather than aborting
/// the walk; only an unenumerable directory is a hard error.
pub fn validate_tree(root: &Path) -> Result<ValidationReport> {
    let mut report = ValidationReport::default();
    walk(root, &mut report)?;
    Ok(report)
}

fn walk(dir: &Path, report: &mut ValidationReport) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|source| Error::DirectoryRead {
        path: dir.to_owned(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::DirectoryRead {
            path: dir.to_owned(),
            source,
        })?;
        paths.push(entry.path());
    }
    paths.sort();

    for path in paths {
        if path.is_dir() {
            walk(&path, report)?;
            continue;
        }

        let extension = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(extension_of)
            .unwrap_or_default();
        let Ok(codec) = goldfile_codec::get(&extension) else {
            report.skipped += 1;
            continue;
        };

        let data = match std::fs::read(&path) {
            Ok(data) => data,
            Err(err) => {
                report.failures.push(ValidationFailure {
                    path,
                    message: format!("read failed: {err}"),
                });
                continue;
            }
        };

        match codec.decode(&data) {
            Ok(_) => {
                report.checked += 1;
                trace!(path = %path.display(), "fixture file decoded cleanly");
            }
            Err(err) => report.failures.push(ValidationFailure {
                path,
                message: format!("decode failed: {err}"),
            }),
        }
    }
    Ok(())
}
