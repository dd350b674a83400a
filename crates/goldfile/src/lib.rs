//! Directory-backed test fixtures with golden-file assertion.
//!
//! This crate provides:
//! - [`Fixture`]: a per-field binding of struct fields to fixture files,
//!   written by hand with [`Bindings`] or generated by [`fixture!`]
//! - [`load`] / [`load_many`]: populate fixtures from one or more ordered
//!   directories (later directories override earlier ones)
//! - [`save`]: the inverse, for golden-file generation; zero-valued fields
//!   delete their files so stale goldens are pruned automatically
//! - [`assert_fixtures`] / [`assert_with`]: compare runtime values against
//!   golden fixtures, or regenerate them when `GOLDFILE_UPDATE=1`
//! - [`TestSuite`]: run each subdirectory of a fixture root as a named
//!   sub-test, with `.skip`/`.only` suffixes and shared-directory defaults
//!
//! Fixture files are decoded by extension through the codec registry in
//! [`codec`] (JSON and YAML by default), or loaded raw into `String` /
//! `Vec<u8>` fields.
//!
//! ```
//! goldfile::fixture! {
//!     #[derive(Debug)]
//!     struct TextCase {
//!         input: String => text "input.txt",
//!         expected: String => text "expected.txt",
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! std::fs::write(dir.path().join("input.txt"), "hello world")?;
//! std::fs::write(dir.path().join("expected.txt"), "HELLO WORLD")?;
//!
//! let mut case = TextCase::default();
//! goldfile::load(dir.path(), &mut case)?;
//! assert_eq!(case.input.to_uppercase(), case.expected);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod assert;
mod diff;
mod error;
mod fixture;
pub mod glob;
mod inspect;
mod loader;
mod mapper;
mod reporter;
mod saver;
mod suite;
mod tag;

pub use goldfile_codec as codec;
pub use goldfile_codec::{Number, Value};

pub use assert::{GoldenMode, assert_fixtures, assert_with, golden_mode, update_golden};
pub use diff::{DiffEntry, diff_values, render};
pub use error::{Error, FieldRef, FsOp, Result};
pub use fixture::{Binding, Bindings, ExplodeSlot, Fixture, Slot, StructuredSlot};
pub use inspect::{ValidationFailure, ValidationReport, validate_tree};
pub use loader::{load, load_many};
pub use reporter::{PanicReporter, RecordingReporter, Reporter, ReporterEvent};
pub use saver::save;
pub use suite::{TestCase, TestSuite, subdirs};
pub use tag::Tag;
