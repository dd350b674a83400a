//! The fixture capability: a visitor over a struct's file-backed fields.
//!
//! Instead of runtime reflection, a fixture exposes its participating fields
//! as [`Binding`]s: the field name (for error scoping), the raw tag string,
//! and a [`Slot`] holding a mutable view of the field. Implement [`Fixture`]
//! by hand with the [`Bindings`] builder, or generate struct and impl
//! together with the [`fixture!`](crate::fixture!) macro.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use goldfile_codec::{CodecError, Value, from_value, to_value};

/// A struct whose fields are populated from (and saved back to) fixture
/// files on disk.
pub trait Fixture {
    /// The field bindings, in declaration order.
    fn bindings(&mut self) -> Bindings<'_>;

    /// A fresh default-valued instance, used by the assertion engine to load
    /// an "expected" twin for comparison.
    fn fresh(&self) -> Box<dyn Fixture>;

    /// Type name for error scoping.
    fn type_name(&self) -> &'static str;
}

/// Erased view of a structured field: anything serde can move through the
/// dynamic [`Value`] model. Blanket-implemented; user code never implements
/// this directly.
pub trait StructuredSlot {
    fn snapshot(&self) -> Result<Value, CodecError>;
    fn replace(&mut self, value: Value) -> Result<(), CodecError>;
    /// Whether the current value equals the type's default. Zero values are
    /// deleted on save rather than written.
    fn is_zero(&self) -> bool;
}

impl<T> StructuredSlot for T
where
    T: Serialize + DeserializeOwned + Default + PartialEq,
{
    fn snapshot(&self) -> Result<Value, CodecError> {
        to_value(self)
    }

    fn replace(&mut self, value: Value) -> Result<(), CodecError> {
        *self = from_value(value)?;
        Ok(())
    }

    fn is_zero(&self) -> bool {
        *self == T::default()
    }
}

/// Erased view of an exploded map field with structured (codec-decoded)
/// entries, keyed by path relative to the fixture directory.
pub trait ExplodeSlot {
    fn snapshot(&self) -> Result<BTreeMap<String, Value>, CodecError>;
    fn set_entry(&mut self, key: String, value: Value) -> Result<(), CodecError>;
    /// The dynamic form of a default-valued entry; entries equal to this are
    /// deleted on save.
    fn zero_entry(&self) -> Result<Value, CodecError>;
}

impl<T> ExplodeSlot for BTreeMap<String, T>
where
    T: Serialize + DeserializeOwned + Default + PartialEq,
{
    fn snapshot(&self) -> Result<BTreeMap<String, Value>, CodecError> {
        self.iter()
            .map(|(key, value)| Ok((key.clone(), to_value(value)?)))
            .collect()
    }

    fn set_entry(&mut self, key: String, value: Value) -> Result<(), CodecError> {
        self.insert(key, from_value(value)?);
        Ok(())
    }

    fn zero_entry(&self) -> Result<Value, CodecError> {
        to_value(&T::default())
    }
}

/// Mutable view of one bound field. The variant fixes the decode/encode
/// strategy: raw text, raw bytes, codec-structured, or the exploded map
/// forms of the same three.
pub enum Slot<'a> {
    Text(&'a mut String),
    Bytes(&'a mut Vec<u8>),
    Structured(&'a mut dyn StructuredSlot),
    ExplodeText(&'a mut BTreeMap<String, String>),
    ExplodeBytes(&'a mut BTreeMap<String, Vec<u8>>),
    ExplodeStructured(&'a mut dyn ExplodeSlot),
}

/// One field binding: name, raw tag, slot.
pub struct Binding<'a> {
    pub(crate) field: &'static str,
    pub(crate) raw_tag: &'static str,
    pub(crate) slot: Slot<'a>,
}

impl<'a> Binding<'a> {
    /// The struct field name this binding maps.
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// The unparsed tag string.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.raw_tag
    }

    /// The field's slot.
    #[must_use]
    pub fn slot(&self) -> &Slot<'a> {
        &self.slot
    }
}

/// Builder collecting a fixture's bindings in declaration order.
///
/// The method picks the decode strategy; the tag string carries the path and
/// options. Exploded methods require the `explode` option in the tag; a
/// whole-map-from-one-file field is a plain [`Bindings::value`] binding.
#[derive(Default)]
pub struct Bindings<'a> {
    entries: Vec<Binding<'a>>,
}

impl<'a> Bindings<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Raw file contents as text.
    #[must_use]
    pub fn text(mut self, field: &'static str, tag: &'static str, slot: &'a mut String) -> Self {
        self.entries.push(Binding {
            field,
            raw_tag: tag,
            slot: Slot::Text(slot),
        });
        self
    }

    /// Raw file contents as bytes.
    #[must_use]
    pub fn bytes(mut self, field: &'static str, tag: &'static str, slot: &'a mut Vec<u8>) -> Self {
        self.entries.push(Binding {
            field,
            raw_tag: tag,
            slot: Slot::Bytes(slot),
        });
        self
    }

    /// Structured value decoded by the codec matching the tag path's
    /// extension.
    #[must_use]
    pub fn value<T>(mut self, field: &'static str, tag: &'static str, slot: &'a mut T) -> Self
    where
        T: StructuredSlot,
    {
        self.entries.push(Binding {
            field,
            raw_tag: tag,
            slot: Slot::Structured(slot),
        });
        self
    }

    /// Glob-exploded map of raw text files.
    #[must_use]
    pub fn explode_text(
        mut self,
        field: &'static str,
        tag: &'static str,
        slot: &'a mut BTreeMap<String, String>,
    ) -> Self {
        self.entries.push(Binding {
            field,
            raw_tag: tag,
            slot: Slot::ExplodeText(slot),
        });
        self
    }

    /// Glob-exploded map of raw byte files.
    #[must_use]
    pub fn explode_bytes(
        mut self,
        field: &'static str,
        tag: &'static str,
        slot: &'a mut BTreeMap<String, Vec<u8>>,
    ) -> Self {
        self.entries.push(Binding {
            field,
            raw_tag: tag,
            slot: Slot::ExplodeBytes(slot),
        });
        self
    }

    /// Glob-exploded map of structured files, each decoded by the codec
    /// matching its own extension.
    #[must_use]
    pub fn explode_value<T>(
        mut self,
        field: &'static str,
        tag: &'static str,
        slot: &'a mut T,
    ) -> Self
    where
        T: ExplodeSlot,
    {
        self.entries.push(Binding {
            field,
            raw_tag: tag,
            slot: Slot::ExplodeStructured(slot),
        });
        self
    }
}

impl<'a> IntoIterator for Bindings<'a> {
    type Item = Binding<'a>;
    type IntoIter = std::vec::IntoIter<Binding<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Define a fixture struct and its [`Fixture`] impl in one declaration.
///
/// Each field is `name: Type => mode "tag"`, where `mode` is one of `text`,
/// `bytes`, `value`, `explode_text`, `explode_bytes`, or `explode_value`.
/// `Default` is derived automatically (it backs [`Fixture::fresh`]), so do
/// not list it in the derive attribute.
///
/// ```
/// goldfile::fixture! {
///     #[derive(Debug)]
///     pub struct TextCase {
///         input: String => text "input.txt",
///         expected: String => text "expected.txt",
///     }
/// }
/// ```
#[macro_export]
macro_rules! fixture {
    ($(
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $field_ty:ty => $mode:ident $tag:literal
            ),* $(,)?
        }
    )+) => {$(
        $(#[$meta])*
        #[derive(Default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $field_ty,
            )*
        }

        impl $crate::Fixture for $name {
            fn bindings(&mut self) -> $crate::Bindings<'_> {
                $crate::Bindings::new()
                    $(.$mode(stringify!($field), $tag, &mut self.$field))*
            }

            fn fresh(&self) -> ::std::boxed::Box<dyn $crate::Fixture> {
                ::std::boxed::Box::new(Self::default())
            }

            fn type_name(&self) -> &'static str {
                stringify!($name)
            }
        }
    )+};
}
