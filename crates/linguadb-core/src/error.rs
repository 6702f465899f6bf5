use crate::{
    db::{context::ContextError, store::StoreError},
    lang::LanguageError,
    registry::{RelationError, SchemaError},
};
use thiserror::Error as ThisError;

///
/// Error
///
/// Top-level error surface: transparent composition of the module error
/// enums. Every variant is detected eagerly at the start of an
/// operation; none are swallowed or retried.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Language(#[from] LanguageError),

    #[error(transparent)]
    Relation(#[from] RelationError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
