mod memory;

pub use memory::{MemoryStore, MemoryTransaction};

use crate::{
    db::{
        query::TranslationQuery,
        translation::{Translation, TranslationKey},
    },
    error::Error,
};
use thiserror::Error as ThisError;

///
/// StoreError
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("duplicate translation row: {entity}/{id}/{field}/{language}")]
    DuplicateRow {
        entity: String,
        id: String,
        field: String,
        language: String,
    },

    #[error("translated field name `{field}` exceeds {} chars", crate::MAX_FIELD_LEN)]
    FieldTooLong { field: String },

    #[error("related name `{0}` does not resolve to a translatable entity")]
    UnknownRelatedName(String),

    #[error("store lock poisoned")]
    LockPoisoned,
}

///
/// TranslationStore
///
/// The relational-store collaborator: filtered reads over the side
/// table plus transactional delete/insert with row-intent locking.
/// Implementations must keep `(entity, id, field, language)` unique
/// across committed state.
///

pub trait TranslationStore {
    type Txn<'a>: StoreTransaction
    where
        Self: 'a;

    /// Execute one read-only query; takes no locks and observes
    /// committed state only.
    fn select(&self, query: &TranslationQuery) -> Result<Vec<Translation>, StoreError>;

    /// Run `f` inside a transaction: `Ok` commits every staged
    /// mutation as one unit, `Err` rolls back and leaves the side table
    /// untouched.
    fn transaction<R>(
        &self,
        f: impl FnOnce(&mut Self::Txn<'_>) -> Result<R, Error>,
    ) -> Result<R, Error>;
}

///
/// StoreTransaction
///
/// Mutation surface available inside a transaction window. Mutations
/// are staged and only become visible when the transaction commits.
///

pub trait StoreTransaction {
    /// Select matching rows and take write-intent locks on their
    /// address range, serializing concurrent writers of the same
    /// addresses until this transaction completes.
    fn select_for_update(
        &mut self,
        query: &TranslationQuery,
    ) -> Result<Vec<Translation>, StoreError>;

    /// Stage deletion of the given keys.
    fn delete(&mut self, keys: &[TranslationKey]) -> Result<(), StoreError>;

    /// Stage a bulk insert.
    fn insert(&mut self, rows: Vec<Translation>) -> Result<(), StoreError>;
}
