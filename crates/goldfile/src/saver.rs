//! Persist a fixture's fields to files under one directory.
//!
//! The inverse of the loader, used for golden-file generation. A zero-valued
//! field deletes its target file (ignoring "not found"), which prunes stale
//! golden files automatically when output shrinks.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, FieldRef, FsOp, Result};
use crate::fixture::{Fixture, Slot};
use crate::mapper::{self, Plan};
use crate::tag::extension_of;

/// Save one fixture's fields under `dir`.
pub fn save(dir: impl AsRef<Path>, input: &mut dyn Fixture) -> Result<()> {
    let dir = dir.as_ref();
    let type_name = input.type_name();

    for binding in input.bindings() {
        let tag = match mapper::plan(type_name, &binding)? {
            Plan::Skip => continue,
            Plan::Bind(tag) => tag,
        };
        let field = FieldRef::new(type_name, binding.field);

        match binding.slot {
            Slot::Text(slot) => {
                let payload = (!slot.is_empty()).then(|| slot.clone().into_bytes());
                write_or_delete(field, &dir.join(&tag.name), payload)?;
            }
            Slot::Bytes(slot) => {
                let payload = (!slot.is_empty()).then(|| slot.clone());
                write_or_delete(field, &dir.join(&tag.name), payload)?;
            }
            Slot::Structured(slot) => {
                let path = dir.join(&tag.name);
                let payload = if slot.is_zero() {
                    None
                } else {
                    let extension = tag.extension();
                    let codec = goldfile_codec::get(&extension)
                        .map_err(|_| Error::codec_not_found(field, &extension))?;
                    let value = slot
                        .snapshot()
                        .map_err(|err| Error::encode(field, &path, err))?;
                    Some(
                        codec
                            .encode(&value)
                            .map_err(|err| Error::encode(field, &path, err))?,
                    )
                };
                write_or_delete(field, &path, payload)?;
            }
            Slot::ExplodeText(slot) => {
                for (key, text) in slot.iter() {
                    let payload = (!text.is_empty()).then(|| text.clone().into_bytes());
                    write_or_delete(field, &dir.join(key), payload)?;
                }
            }
            Slot::ExplodeBytes(slot) => {
                for (key, bytes) in slot.iter() {
                    let payload = (!bytes.is_empty()).then(|| bytes.clone());
                    write_or_delete(field, &dir.join(key), payload)?;
                }
            }
            Slot::ExplodeStructured(slot) => {
                let zero = slot
                    .zero_entry()
                    .map_err(|err| Error::encode(field, dir, err))?;
                let entries = slot
                    .snapshot()
                    .map_err(|err| Error::encode(field, dir, err))?;
                // BTreeMap iteration gives deterministic sorted key order.
                for (key, value) in entries {
                    let path = dir.join(&key);
                    let payload = if value == zero {
                        None
                    } else {
                        let extension = extension_of(&key);
                        let codec = goldfile_codec::get(&extension)
                            .map_err(|_| Error::codec_not_found(field, &extension))?;
                        Some(
                            codec
                                .encode(&value)
                                .map_err(|err| Error::encode(field, &path, err))?,
                        )
                    };
                    write_or_delete(field, &path, payload)?;
                }
            }
        }
    }
    Ok(())
}

fn write_or_delete(field: FieldRef, path: &Path, payload: Option<Vec<u8>>) -> Result<()> {
    match payload {
        Some(data) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|err| Error::filesystem(field, FsOp::CreateDir, parent, err))?;
            }
            fs::write(path, data).map_err(|err| Error::filesystem(field, FsOp::Write, path, err))?;
            debug!(field = %field, path = %path.display(), "wrote fixture file");
            Ok(())
        }
        None => match fs::remove_file(path) {
            Ok(()) => {
                debug!(field = %field, path = %path.display(), "deleted stale fixture file");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Error::filesystem(field, FsOp::Delete, path, err)),
        },
    }
}
