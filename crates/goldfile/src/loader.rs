//! Populate fixtures from one or more ordered input directories.
//!
//! Resolution rules:
//! - A missing file is never an error; the field keeps its prior value.
//! - When several directories define the same file, the last one wins, which
//!   is how shared defaults + per-case overrides compose.
//! - Structured fields merge decoded values over a pre-seed of the field's
//!   current value (mappings merge per key, everything else replaces), so an
//!   overlay file only has to mention the keys it changes.
//! - Exploded fields union their glob matches across directories, the later
//!   directory overriding per key; zero matches contribute nothing.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;

use goldfile_codec::Value;

use crate::error::{Error, FieldRef, FsOp, Result};
use crate::fixture::{ExplodeSlot, Fixture, Slot, StructuredSlot};
use crate::glob::{self, GlobError};
use crate::mapper::{self, Plan};
use crate::tag::{Tag, extension_of};

/// Load one fixture from a single directory.
pub fn load(dir: impl AsRef<Path>, output: &mut dyn Fixture) -> Result<()> {
    load_many(&[dir.as_ref()], &mut [output])
}

/// Load fixtures from an ordered list of directories.
///
/// Later directories override earlier ones per field. Fails with
/// `InvalidArgument` when no outputs are given.
pub fn load_many<P: AsRef<Path>>(dirs: &[P], outputs: &mut [&mut dyn Fixture]) -> Result<()> {
    if outputs.is_empty() {
        return Err(Error::invalid_argument("at least one output is required"));
    }

    for output in outputs.iter_mut() {
        load_one(dirs, &mut **output)?;
    }
    Ok(())
}

fn load_one<P: AsRef<Path>>(dirs: &[P], output: &mut dyn Fixture) -> Result<()> {
    let type_name = output.type_name();
    for binding in output.bindings() {
        let tag = match mapper::plan(type_name, &binding)? {
            Plan::Skip => continue,
            Plan::Bind(tag) => tag,
        };
        let field = FieldRef::new(type_name, binding.field);

        match binding.slot {
            Slot::Text(slot) => load_text(dirs, field, &tag, slot)?,
            Slot::Bytes(slot) => load_bytes(dirs, field, &tag, slot)?,
            Slot::Structured(slot) => load_structured(dirs, field, &tag, slot)?,
            Slot::ExplodeText(slot) => load_explode_text(dirs, field, &tag, slot)?,
            Slot::ExplodeBytes(slot) => load_explode_bytes(dirs, field, &tag, slot)?,
            Slot::ExplodeStructured(slot) => load_explode_structured(dirs, field, &tag, slot)?,
        }
    }
    Ok(())
}

fn load_text<P: AsRef<Path>>(
    dirs: &[P],
    field: FieldRef,
    tag: &Tag,
    slot: &mut String,
) -> Result<()> {
    if let Some((path, data)) = read_last(dirs, field, &tag.name)? {
        *slot = String::from_utf8(data).map_err(|err| Error::decode(field, &path, err))?;
        trace!(field = %field, path = %path.display(), "loaded text field");
    }
    Ok(())
}

fn load_bytes<P: AsRef<Path>>(
    dirs: &[P],
    field: FieldRef,
    tag: &Tag,
    slot: &mut Vec<u8>,
) -> Result<()> {
    if let Some((path, data)) = read_last(dirs, field, &tag.name)? {
        *slot = data;
        trace!(field = %field, path = %path.display(), "loaded bytes field");
    }
    Ok(())
}

fn load_structured<P: AsRef<Path>>(
    dirs: &[P],
    field: FieldRef,
    tag: &Tag,
    slot: &mut dyn StructuredSlot,
) -> Result<()> {
    let extension = tag.extension();
    let mut accumulated: Option<Value> = None;
    let mut last_path = PathBuf::new();

    for dir in dirs {
        let path = dir.as_ref().join(&tag.name);
        let Some(data) = read_optional(field, &path)? else {
            continue;
        };
        let codec = goldfile_codec::get(&extension)
            .map_err(|_| Error::codec_not_found(field, &extension))?;
        let decoded = codec
            .decode(&data)
            .map_err(|err| Error::decode(field, &path, err))?;

        // Pre-seed with the field's current value so overlays are additive.
        let base = match accumulated.take() {
            Some(value) => value,
            None => slot
                .snapshot()
                .map_err(|err| Error::decode(field, &path, err))?,
        };
        accumulated = Some(base.merge(decoded));
        last_path = path;
    }

    if let Some(value) = accumulated {
        slot.replace(value)
            .map_err(|err| Error::decode(field, &last_path, err))?;
        trace!(field = %field, path = %last_path.display(), "loaded structured field");
    }
    Ok(())
}

fn load_explode_text<P: AsRef<Path>>(
    dirs: &[P],
    field: FieldRef,
    tag: &Tag,
    slot: &mut BTreeMap<String, String>,
) -> Result<()> {
    for (key, path) in expand_all(dirs, field, tag)? {
        let Some(data) = read_optional(field, &path)? else {
            continue;
        };
        let text = String::from_utf8(data).map_err(|err| Error::decode(field, &path, err))?;
        slot.insert(key, text);
    }
    Ok(())
}

fn load_explode_bytes<P: AsRef<Path>>(
    dirs: &[P],
    field: FieldRef,
    tag: &Tag,
    slot: &mut BTreeMap<String, Vec<u8>>,
) -> Result<()> {
    for (key, path) in expand_all(dirs, field, tag)? {
        let Some(data) = read_optional(field, &path)? else {
            continue;
        };
        slot.insert(key, data);
    }
    Ok(())
}

fn load_explode_structured<P: AsRef<Path>>(
    dirs: &[P],
    field: FieldRef,
    tag: &Tag,
    slot: &mut dyn ExplodeSlot,
) -> Result<()> {
    for (key, path) in expand_all(dirs, field, tag)? {
        let Some(data) = read_optional(field, &path)? else {
            continue;
        };
        let extension = extension_of(&key);
        let codec = goldfile_codec::get(&extension)
            .map_err(|_| Error::codec_not_found(field, &extension))?;
        let decoded = codec
            .decode(&data)
            .map_err(|err| Error::decode(field, &path, err))?;
        slot.set_entry(key, decoded)
            .map_err(|err| Error::decode(field, &path, err))?;
    }
    Ok(())
}

/// Glob matches across all directories, in directory order. Later
/// directories appear later, so inserting in order makes them win per key.
fn expand_all<P: AsRef<Path>>(
    dirs: &[P],
    field: FieldRef,
    tag: &Tag,
) -> Result<Vec<(String, PathBuf)>> {
    let mut matches = Vec::new();
    for dir in dirs {
        let root = dir.as_ref();
        let expanded = glob::expand(root, &tag.name).map_err(|err| match err {
            GlobError::Walk(walk) => {
                let path = walk.path().to_owned();
                Error::filesystem(field, FsOp::Read, path, walk.into_error())
            }
            other => Error::tag_parse(field, &tag.name, other.to_string()),
        })?;
        matches.extend(expanded);
        trace!(field = %field, root = %root.display(), pattern = %tag.name, "expanded glob");
    }
    Ok(matches)
}

/// Read `name` under each directory in order, returning the last hit.
///
/// Every candidate is read so that a filesystem failure in any directory is
/// surfaced even when a later directory would override it.
fn read_last<P: AsRef<Path>>(
    dirs: &[P],
    field: FieldRef,
    name: &str,
) -> Result<Option<(PathBuf, Vec<u8>)>> {
    let mut found = None;
    for dir in dirs {
        let path = dir.as_ref().join(name);
        if let Some(data) = read_optional(field, &path)? {
            found = Some((path, data));
        }
    }
    Ok(found)
}

/// Read a file, treating "not found" as absence rather than an error.
fn read_optional(field: FieldRef, path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(data) => Ok(Some(data)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(Error::filesystem(field, FsOp::Read, path, err)),
    }
}
