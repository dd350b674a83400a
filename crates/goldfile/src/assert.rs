//! Golden-file assertion: compare fixtures on disk against runtime values,
//! or regenerate them on demand.
//!
//! The mode is an explicit parameter on [`assert_with`]; [`assert_fixtures`]
//! reads the process-wide default, resolved once from the `GOLDFILE_UPDATE`
//! environment variable (`GOLDFILE_UPDATE=1 cargo test` regenerates golden
//! files, a plain run compares against them).

use std::path::Path;
use std::sync::OnceLock;

use goldfile_codec::{CodecError, Value};

use crate::diff::{diff_values, render};
use crate::error::{Error, FieldRef, Result};
use crate::fixture::{Fixture, Slot};
use crate::loader::load;
use crate::saver::save;

/// Assertion engine behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoldenMode {
    /// Load fresh "expected" values from disk and compare structurally.
    #[default]
    Assert,
    /// Persist the supplied values as the new golden fixtures.
    Update,
}

static UPDATE_GOLDEN: OnceLock<bool> = OnceLock::new();

/// Whether the process-wide update-golden default is enabled.
///
/// Resolved from `GOLDFILE_UPDATE` on first call and cached; read-only
/// during test execution.
#[must_use]
pub fn update_golden() -> bool {
    *UPDATE_GOLDEN.get_or_init(|| std::env::var("GOLDFILE_UPDATE").is_ok_and(|raw| parse_switch(&raw)))
}

/// Parse the update-golden switch value (case-insensitive).
fn parse_switch(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// The process-wide default mode.
#[must_use]
pub fn golden_mode() -> GoldenMode {
    if update_golden() {
        GoldenMode::Update
    } else {
        GoldenMode::Assert
    }
}

/// Assert (or update, per the process-wide default) golden fixtures in `dir`
/// against `values`.
pub fn assert_fixtures(dir: impl AsRef<Path>, values: &mut [&mut dyn Fixture]) -> Result<()> {
    assert_with(golden_mode(), dir, values)
}

/// Assert or update with an explicit mode, overriding the process default.
///
/// In assert mode the first failing value aborts the call; values after it
/// are not visited.
pub fn assert_with(
    mode: GoldenMode,
    dir: impl AsRef<Path>,
    values: &mut [&mut dyn Fixture],
) -> Result<()> {
    if values.is_empty() {
        return Err(Error::invalid_argument("at least one value is required"));
    }

    let dir = dir.as_ref();
    for value in values.iter_mut() {
        match mode {
            GoldenMode::Update => save(dir, &mut **value)?,
            GoldenMode::Assert => assert_one(dir, &mut **value)?,
        }
    }
    Ok(())
}

fn assert_one(dir: &Path, actual: &mut dyn Fixture) -> Result<()> {
    let mut expected = actual.fresh();
    load(dir, expected.as_mut())?;

    let type_name = actual.type_name();
    let expected_bindings: Vec<_> = expected.bindings().into_iter().collect();
    let actual_bindings: Vec<_> = actual.bindings().into_iter().collect();

    let mut entries = Vec::new();
    for (expected_binding, actual_binding) in expected_bindings.iter().zip(&actual_bindings) {
        let field = FieldRef::new(type_name, actual_binding.field);
        let expected_value =
            snapshot_slot(&expected_binding.slot).map_err(|err| Error::encode(field, dir, err))?;
        let actual_value =
            snapshot_slot(&actual_binding.slot).map_err(|err| Error::encode(field, dir, err))?;
        diff_values(
            actual_binding.field,
            &expected_value,
            &actual_value,
            &mut entries,
        );
    }

    if entries.is_empty() {
        Ok(())
    } else {
        Err(Error::AssertionMismatch {
            type_name: type_name.to_owned(),
            diff: render(&entries),
        })
    }
}

/// Uniform dynamic view of a slot's current contents, for comparison.
fn snapshot_slot(slot: &Slot<'_>) -> std::result::Result<Value, CodecError> {
    match slot {
        Slot::Text(text) => Ok(Value::String((**text).clone())),
        Slot::Bytes(bytes) => Ok(Value::Bytes((**bytes).clone())),
        Slot::Structured(slot) => slot.snapshot(),
        Slot::ExplodeText(map) => Ok(Value::Mapping(
            map.iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )),
        Slot::ExplodeBytes(map) => Ok(Value::Mapping(
            map.iter()
                .map(|(k, v)| (k.clone(), Value::Bytes(v.clone())))
                .collect(),
        )),
        Slot::ExplodeStructured(slot) => Ok(Value::Mapping(slot.snapshot()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_values_parse_loosely() {
        for enabled in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(parse_switch(enabled), "{enabled:?} should enable updates");
        }
        for disabled in ["", "0", "false", "off", "anything-else"] {
            assert!(!parse_switch(disabled), "{disabled:?} should not enable");
        }
    }

    #[test]
    fn default_mode_is_assert() {
        assert_eq!(GoldenMode::default(), GoldenMode::Assert);
    }
}
