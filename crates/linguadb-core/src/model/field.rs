///
/// FieldModel
/// Runtime field metadata used by translatable-field resolution.
///

#[derive(Debug)]
pub struct FieldModel {
    /// Field name as used in overlay and persist addressing.
    pub name: &'static str,
    /// Runtime type shape.
    pub kind: FieldKind,
}

///
/// FieldKind
///
/// Minimal type surface the engines need; a lossy projection of the
/// application's own field types.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Bool,
    /// Email-like text; excluded from the automatic translatable set.
    Email,
    /// Enumerated/choice text; excluded from the automatic translatable set.
    Enum,
    Float,
    Int,
    Text,
    Timestamp,
    Uint,

    /// Marker for fields the engines never touch.
    Unsupported,
}

impl FieldKind {
    /// True for fields that default into the translatable set when the
    /// entity declares `TranslatableSpec::Auto`.
    #[must_use]
    pub const fn is_translatable_default(self) -> bool {
        matches!(self, Self::Text)
    }
}
