use crate::{
    db::{
        address::resolve_related_name,
        context::{Context, ContextError},
        query::{FilterClause, TranslationQuery},
        store::{StoreError, StoreTransaction, TranslationStore},
        translation::Translation,
        Translations,
    },
    error::Error,
    obs::sink::{self, ExecKind, MetricsEvent},
    MAX_FIELD_LEN, TRANSLATIONS_RELATION,
};

///
/// PersistExecutor
///
/// Transactionally replaces every side-table row for a context and
/// language with freshly captured field values: select the existing
/// rows under write-intent locks, delete them, bulk-insert the new
/// snapshot. Any failure aborts the transaction whole.
///

pub struct PersistExecutor<'a, S: TranslationStore> {
    db: Translations<'a, S>,
    debug: bool,
}

impl<'a, S: TranslationStore> PersistExecutor<'a, S> {
    #[must_use]
    pub const fn new(db: Translations<'a, S>, debug: bool) -> Self {
        Self { db, debug }
    }

    pub fn execute(&self, context: &Context<'_>, language: Option<&str>) -> Result<(), Error> {
        let language = self.db.languages().resolve(language)?.to_string();

        // An empty plural context has nothing to capture and succeeds.
        let normalized = match context.normalize() {
            Ok(normalized) => normalized,
            Err(ContextError::Empty) => return Ok(()),
        };

        let registry = self.db.registry();
        if !registry.is_translatable(normalized.entity)? {
            return Ok(());
        }
        let fields = registry.translatable_fields(normalized.entity)?;
        if let Some(field) = fields
            .iter()
            .find(|field| field.chars().count() > MAX_FIELD_LEN)
        {
            return Err(StoreError::FieldTooLong {
                field: (*field).to_string(),
            }
            .into());
        }

        sink::emit(MetricsEvent::ExecStart {
            kind: ExecKind::Persist,
            entity: normalized.entity,
        });

        // Snapshot current values up front; staging reads no store
        // state.
        let mut staged = Vec::new();
        for instance in context.instances() {
            for field in fields {
                let Some(value) = instance.text_field(field) else {
                    continue;
                };
                if value.is_empty() {
                    continue;
                }
                staged.push(Translation {
                    entity: normalized.entity.to_string(),
                    id: instance.record_id(),
                    field: (*field).to_string(),
                    language: language.clone(),
                    text: value,
                });
            }
        }

        // One clause addressing every existing row for this context and
        // language (fetch with no relation paths).
        let mut query = TranslationQuery::new(language.clone());
        query.push(FilterClause {
            related_name: resolve_related_name(
                registry,
                normalized.entity,
                TRANSLATIONS_RELATION,
            )?,
            ids: normalized.ids,
        });

        if self.debug {
            tracing::debug!(
                entity = normalized.entity,
                language = %language,
                staged = staged.len(),
                "executing translation persist"
            );
        }

        let staged_len = staged.len() as u64;
        let deleted = self.db.store().transaction(|txn| {
            let existing = txn.select_for_update(&query)?;
            let keys: Vec<_> = existing.iter().map(Translation::key).collect();
            txn.delete(&keys)?;
            txn.insert(staged)?;
            Ok(keys.len() as u64)
        })?;

        sink::emit(MetricsEvent::RowsDeleted {
            entity: normalized.entity,
            rows: deleted,
        });
        sink::emit(MetricsEvent::ExecFinish {
            kind: ExecKind::Persist,
            entity: normalized.entity,
            rows_touched: staged_len,
        });

        Ok(())
    }
}
