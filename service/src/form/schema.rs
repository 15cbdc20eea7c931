//! Form [`Schema`] definitions.

use crate::domain::Entity;

use super::{FormInput, RuleSet};

/// Kind of a form field, driving how its raw input is coerced into the
/// [`Payload`].
///
/// [`Payload`]: super::Payload
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    /// Trimmed free text.
    Text,

    /// Decimal number.
    Number,

    /// Checkbox coerced into `0` or `1`.
    Boolean,

    /// Integer code of a fixed or referenced set.
    Enum,

    /// Repeated inputs collected into a set of strings.
    MultiSelect,
}

/// Field of a form [`Schema`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Field {
    /// Name of this [`Field`], matching the wire name of the entity field.
    pub name: &'static str,

    /// [`FieldKind`] of this [`Field`].
    pub kind: FieldKind,

    /// [`RuleSet`] validating this [`Field`].
    pub rules: RuleSet,
}

impl Field {
    /// Creates a new [`Field`] without any rules, labeled by its `name`.
    #[must_use]
    pub const fn plain(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            rules: RuleSet::new(name, &[]),
        }
    }

    /// Creates a new [`Field`] validated by the provided [`RuleSet`].
    #[must_use]
    pub const fn checked(
        name: &'static str,
        kind: FieldKind,
        rules: RuleSet,
    ) -> Self {
        Self { name, kind, rules }
    }
}

/// [`Entity`] editable through a form.
pub trait Schema: Entity {
    /// [`Field`]s of the form, in display order.
    const FIELDS: &'static [Field];

    /// Looks up the [`Field`] with the provided `name`.
    #[must_use]
    fn field(name: &str) -> Option<&'static Field> {
        Self::FIELDS.iter().find(|f| f.name == name)
    }

    /// Fills a [`FormInput`] with the current values of this [`Entity`].
    fn fill(&self) -> FormInput;
}
