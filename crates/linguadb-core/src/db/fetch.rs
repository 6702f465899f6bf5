use crate::{
    db::{
        address::resolve_related_name,
        context::Context,
        query::{FilterClause, TranslationQuery},
        store::TranslationStore,
        translation::Translation,
        Translations,
    },
    error::Error,
    key::RecordId,
    obs::sink::{self, ExecKind, MetricsEvent},
    RELATION_SEP, TRANSLATIONS_RELATION,
};
use std::collections::HashMap;

///
/// TranslationSet
///
/// Eagerly materialized fetch result: rows grouped by owning
/// (entity, id) address for constant-time overlay lookups. Reused
/// across nested overlay calls instead of refetching per level.
///

#[derive(Debug, Default)]
pub struct TranslationSet {
    rows: HashMap<String, HashMap<RecordId, Vec<Translation>>>,
    len: usize,
}

impl TranslationSet {
    #[must_use]
    pub fn from_rows(rows: Vec<Translation>) -> Self {
        let mut set = Self::default();
        for row in rows {
            set.rows
                .entry(row.entity.clone())
                .or_default()
                .entry(row.id.clone())
                .or_default()
                .push(row);
            set.len += 1;
        }
        set
    }

    /// Rows owned by one entity instance, if any were fetched.
    #[must_use]
    pub fn get(&self, entity: &str, id: &RecordId) -> Option<&[Translation]> {
        self.rows
            .get(entity)
            .and_then(|by_id| by_id.get(id))
            .map(Vec::as_slice)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

///
/// FetchExecutor
///
/// Builds and runs the one-round-trip side-table query for a context
/// and its relation paths.
///

pub struct FetchExecutor<'a, S: TranslationStore> {
    db: Translations<'a, S>,
    debug: bool,
}

impl<'a, S: TranslationStore> FetchExecutor<'a, S> {
    #[must_use]
    pub const fn new(db: Translations<'a, S>, debug: bool) -> Self {
        Self { db, debug }
    }

    pub fn execute(
        &self,
        context: &Context<'_>,
        relations: &[&str],
        language: Option<&str>,
    ) -> Result<TranslationSet, Error> {
        let language = self.db.languages().resolve(language)?;
        let normalized = context.normalize()?;

        sink::emit(MetricsEvent::ExecStart {
            kind: ExecKind::Fetch,
            entity: normalized.entity,
        });

        let query = self.build_query(normalized.entity, &normalized.ids, relations, language)?;
        if query.is_empty() {
            // Nothing addresses the side table; skip the round trip.
            sink::emit(MetricsEvent::ExecFinish {
                kind: ExecKind::Fetch,
                entity: normalized.entity,
                rows_touched: 0,
            });
            return Ok(TranslationSet::default());
        }

        if self.debug {
            tracing::debug!(
                entity = normalized.entity,
                language,
                plural = normalized.plural,
                clauses = query.clauses.len(),
                ids = normalized.ids.len(),
                "executing translation fetch"
            );
        }

        let rows = self.db.store().select(&query)?;
        sink::emit(MetricsEvent::ExecFinish {
            kind: ExecKind::Fetch,
            entity: normalized.entity,
            rows_touched: rows.len() as u64,
        });

        Ok(TranslationSet::from_rows(rows))
    }

    /// One clause for the context type itself (when translatable) plus
    /// one OR'd clause per relation path, all sharing the context's id
    /// set.
    fn build_query(
        &self,
        entity: &'static str,
        ids: &[RecordId],
        relations: &[&str],
        language: &str,
    ) -> Result<TranslationQuery, Error> {
        let registry = self.db.registry();
        let mut query = TranslationQuery::new(language);

        if registry.is_translatable(entity)? {
            query.push(FilterClause {
                related_name: resolve_related_name(registry, entity, TRANSLATIONS_RELATION)?,
                ids: ids.to_vec(),
            });
        }

        for relation in relations {
            let path = format!("{relation}{RELATION_SEP}{TRANSLATIONS_RELATION}");
            query.push(FilterClause {
                related_name: resolve_related_name(registry, entity, &path)?,
                ids: ids.to_vec(),
            });
        }

        Ok(query)
    }
}
