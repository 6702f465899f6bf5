use crate::key::RecordId;
use serde::{Deserialize, Serialize};

///
/// TranslationKey
///
/// Unique side-table address: at most one row exists per
/// (entity, id, field, language).
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct TranslationKey {
    pub entity: String,
    pub id: RecordId,
    pub field: String,
    pub language: String,
}

///
/// Translation
///
/// One stored (entity, field, language) -> text mapping. Rows are
/// written whole inside the persist transaction and never mutated in
/// place; an update is a delete plus a fresh row.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Translation {
    pub entity: String,
    pub id: RecordId,
    pub field: String,
    pub language: String,
    /// May be empty; empty text is never applied as an overlay.
    pub text: String,
}

impl Translation {
    #[must_use]
    pub fn key(&self) -> TranslationKey {
        TranslationKey {
            entity: self.entity.clone(),
            id: self.id.clone(),
            field: self.field.clone(),
            language: self.language.clone(),
        }
    }
}
