use crate::model::{field::FieldModel, relation::RelationModel};

///
/// EntityModel
/// Minimal runtime model for one entity type.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Fully-qualified Rust type path (for diagnostics).
    pub path: &'static str,
    /// Stable external name used in side-table addressing.
    pub entity_name: &'static str,
    /// Ordered field list.
    pub fields: &'static [FieldModel],
    /// Declared relation edges (forward names).
    pub relations: &'static [RelationModel],
    /// How the translatable-field set is declared.
    pub translatable: TranslatableSpec,
}

impl EntityModel {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }

    #[must_use]
    pub fn relation(&self, name: &str) -> Option<&'static RelationModel> {
        self.relations.iter().find(|relation| relation.name == name)
    }
}

///
/// TranslatableSpec
///
/// `Explicit` keeps the declared field order; `Auto` derives the set
/// from field kinds; `NotTranslatable` opts the type out entirely.
/// The resolved set is computed once, at registry build time.
///

#[derive(Clone, Copy, Debug)]
pub enum TranslatableSpec {
    NotTranslatable,
    Auto,
    Explicit(&'static [&'static str]),
}
