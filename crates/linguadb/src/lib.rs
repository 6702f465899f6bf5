//! LinguaDB augments a relational data layer with per-field,
//! per-language text translations, without altering the base schema.
//!
//! ## Crate layout
//! - `core`: entity models, the registry, the translation side table,
//!   the fetch/overlay/persist engines, stores, and observability.
//!
//! The `prelude` module mirrors the runtime surface used inside
//! application code.

pub use linguadb_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::{error::Error, MAX_FIELD_LEN, RELATION_SEP, TRANSLATIONS_RELATION};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        db::{
            Context, FetchExecutor, MemoryStore, OverlayExecutor, PersistExecutor,
            RelationHierarchy, Translation, TranslationKey, TranslationQuery, TranslationSession,
            TranslationSet, TranslationStore, Translations,
        },
        error::Error,
        key::RecordId,
        lang::LanguageConfig,
        model::{EntityModel, FieldKind, FieldModel, RelationModel, TranslatableSpec},
        obs::MetricsSink,
        registry::EntityRegistry,
        traits::{EntityKind, EntityValue, Path, Related},
    };
}
