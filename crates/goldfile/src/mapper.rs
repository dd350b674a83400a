//! Tag-to-plan translation for one field binding.
//!
//! Pure planning: no filesystem access. The loader and saver call [`plan`]
//! per binding and act on the result immediately. A malformed tag aborts the
//! whole load/save for the struct.

use crate::error::{Error, FieldRef, Result};
use crate::fixture::{Binding, Slot};
use crate::tag::Tag;

/// Outcome of planning one binding.
pub(crate) enum Plan {
    /// Tag absent, empty, or `-`: the field takes no part in load/save.
    Skip,
    /// Field participates with the parsed tag.
    Bind(Tag),
}

pub(crate) fn plan(type_name: &'static str, binding: &Binding<'_>) -> Result<Plan> {
    let field = FieldRef::new(type_name, binding.field);
    let tag = match Tag::parse(binding.raw_tag) {
        Ok(None) => return Ok(Plan::Skip),
        Ok(Some(tag)) => tag,
        Err(reason) => return Err(Error::tag_parse(field, binding.raw_tag, reason)),
    };

    let explode_slot = matches!(
        binding.slot,
        Slot::ExplodeText(_) | Slot::ExplodeBytes(_) | Slot::ExplodeStructured(_)
    );
    if tag.explode && !explode_slot {
        return Err(Error::tag_parse(
            field,
            binding.raw_tag,
            "the explode option requires an exploded map binding",
        ));
    }
    if explode_slot && !tag.explode {
        return Err(Error::tag_parse(
            field,
            binding.raw_tag,
            "an exploded map binding requires the explode option",
        ));
    }

    Ok(Plan::Bind(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::Bindings;

    #[test]
    fn skips_unbound_fields() {
        let mut ignored = String::new();
        let bindings = Bindings::new().text("ignored", "-", &mut ignored);
        let binding = bindings.into_iter().next().expect("one binding");
        assert!(matches!(plan("Sample", &binding), Ok(Plan::Skip)));
    }

    #[test]
    fn explode_option_must_match_slot_shape() {
        let mut text = String::new();
        let bindings = Bindings::new().text("field", "*.txt,explode", &mut text);
        let binding = bindings.into_iter().next().expect("one binding");
        let err = plan("Sample", &binding).err().expect("mismatch rejected");
        assert!(matches!(err, Error::TagParse { .. }), "got {err:?}");

        let mut map = std::collections::BTreeMap::new();
        let bindings = Bindings::new().explode_text("field", "*.txt", &mut map);
        let binding = bindings.into_iter().next().expect("one binding");
        let err = plan("Sample", &binding).err().expect("missing option rejected");
        assert!(matches!(err, Error::TagParse { .. }), "got {err:?}");
    }

    #[test]
    fn malformed_tag_is_field_scoped() {
        let mut text = String::new();
        let bindings = Bindings::new().text("config", "a.json,bogus", &mut text);
        let binding = bindings.into_iter().next().expect("one binding");
        let err = plan("Sample", &binding).err().expect("rejected");
        assert!(err.to_string().starts_with("Sample.config:"), "got {err}");
    }
}
