//! Field-level structural diff between two fixture value trees.
//!
//! The assertion engine reports *where* values diverge, not just that they
//! do: entries are path-qualified (`field.key[2].name`) and walk into
//! mappings and sequences.

use std::collections::BTreeSet;

use goldfile_codec::Value;

/// One point of divergence. `expected`/`actual` are `None` when the value is
/// absent on that side entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub path: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

/// Collect the divergences between `expected` and `actual` under `path`.
pub fn diff_values(path: &str, expected: &Value, actual: &Value, out: &mut Vec<DiffEntry>) {
    match (expected, actual) {
        (Value::Mapping(expected_map), Value::Mapping(actual_map)) => {
            let keys: BTreeSet<&String> = expected_map.keys().chain(actual_map.keys()).collect();
            for key in keys {
                let child = format!("{path}.{key}");
                match (expected_map.get(key), actual_map.get(key)) {
                    (Some(e), Some(a)) => diff_values(&child, e, a, out),
                    (Some(e), None) => out.push(DiffEntry {
                        path: child,
                        expected: Some(e.to_string()),
                        actual: None,
                    }),
                    (None, Some(a)) => out.push(DiffEntry {
                        path: child,
                        expected: None,
                        actual: Some(a.to_string()),
                    }),
                    (None, None) => {}
                }
            }
        }
        (Value::Sequence(expected_seq), Value::Sequence(actual_seq)) => {
            let len = expected_seq.len().max(actual_seq.len());
            for index in 0..len {
                let child = format!("{path}[{index}]");
                match (expected_seq.get(index), actual_seq.get(index)) {
                    (Some(e), Some(a)) => diff_values(&child, e, a, out),
                    (Some(e), None) => out.push(DiffEntry {
                        path: child,
                        expected: Some(e.to_string()),
                        actual: None,
                    }),
                    (None, Some(a)) => out.push(DiffEntry {
                        path: child,
                        expected: None,
                        actual: Some(a.to_string()),
                    }),
                    (None, None) => {}
                }
            }
        }
        (e, a) => {
            if e != a {
                out.push(DiffEntry {
                    path: path.to_owned(),
                    expected: Some(e.to_string()),
                    actual: Some(a.to_string()),
                });
            }
        }
    }
}

/// Render diff entries as indented plain-text lines.
#[must_use]
pub fn render(entries: &[DiffEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len());
    for entry in entries {
        let line = match (&entry.expected, &entry.actual) {
            (Some(expected), Some(actual)) => {
                format!("  {}: expected {expected}, got {actual}", entry.path)
            }
            (Some(expected), None) => format!("  {}: missing (expected {expected})", entry.path),
            (None, Some(actual)) => format!("  {}: unexpected {actual}", entry.path),
            (None, None) => continue,
        };
        lines.push(line);
    }
    lines.join("\n")
}
