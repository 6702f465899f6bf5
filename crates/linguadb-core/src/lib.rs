//! Core runtime for LinguaDB: entity models, the translation side table,
//! the fetch/overlay/persist engines, and the ergonomics exported via the
//! `prelude`.

// public exports are one module level down
pub mod db;
pub mod error;
pub mod key;
pub mod lang;
pub mod model;
pub mod obs;
pub mod registry;
pub mod traits;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Separator between segments of a relation path and of a composed
/// related query name.
pub const RELATION_SEP: &str = "__";

/// Name of the implicit relation from a translatable entity to its rows
/// in the side table.
pub const TRANSLATIONS_RELATION: &str = "translations";

/// Maximum length of a translated field name in the side table.
///
/// Matches the side table's column width; longer names are rejected
/// before any row is staged.
pub const MAX_FIELD_LEN: usize = 64;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No executors, stores, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::{Context, TranslationSet, Translations},
        key::RecordId,
        lang::LanguageConfig,
        model::{EntityModel, FieldKind, FieldModel, RelationModel, TranslatableSpec},
        registry::EntityRegistry,
        traits::{EntityKind, EntityValue, Path, Related},
    };
}
