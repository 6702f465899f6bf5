use crate::key::RecordId;
use serde::{Deserialize, Serialize};

///
/// FilterClause
///
/// One OR branch of a side-table query: rows whose owning entity,
/// reached by following `related_name` from the side table, has an id
/// in `ids`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FilterClause {
    /// Composed reverse query name from the side table to the context
    /// type.
    pub related_name: String,
    /// IN set of context ids, in context order.
    pub ids: Vec<RecordId>,
}

///
/// TranslationQuery
///
/// Declarative fetch filter: `language AND (clause OR clause OR …)`,
/// deduplicated. Built by the fetch engine, interpreted by the store.
/// No clauses means no rows can match; engines short-circuit instead of
/// executing such a query.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TranslationQuery {
    pub language: String,
    pub clauses: Vec<FilterClause>,
}

impl TranslationQuery {
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            clauses: Vec::new(),
        }
    }

    pub fn push(&mut self, clause: FilterClause) {
        self.clauses.push(clause);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}
