use crate::{
    db::{
        context::Context,
        fetch::{FetchExecutor, TranslationSet},
        hierarchy::RelationHierarchy,
        store::TranslationStore,
        Translations,
    },
    error::Error,
    obs::sink::{self, ExecKind, MetricsEvent},
    traits::{EntityValue, Related},
};

///
/// OverlayExecutor
///
/// Walks the context graph along the relation hierarchy and overwrites
/// translatable field values in place with matching rows for one
/// language. One translation set feeds every level of the walk.
///

pub struct OverlayExecutor<'a, S: TranslationStore> {
    db: Translations<'a, S>,
    debug: bool,
}

impl<'a, S: TranslationStore> OverlayExecutor<'a, S> {
    #[must_use]
    pub const fn new(db: Translations<'a, S>, debug: bool) -> Self {
        Self { db, debug }
    }

    pub fn execute(
        &self,
        context: &mut Context<'_>,
        relations: &[&str],
        language: Option<&str>,
        translations: Option<&TranslationSet>,
    ) -> Result<(), Error> {
        let language = self.db.languages().resolve(language)?.to_string();
        let normalized = context.normalize()?;

        sink::emit(MetricsEvent::ExecStart {
            kind: ExecKind::Overlay,
            entity: normalized.entity,
        });

        let fetched;
        let translations = match translations {
            Some(set) => set,
            None => {
                fetched = FetchExecutor::new(self.db, self.debug).execute(
                    context,
                    relations,
                    Some(&language),
                )?;
                &fetched
            }
        };

        if self.debug {
            tracing::debug!(
                entity = normalized.entity,
                language = %language,
                rows = translations.len(),
                "executing translation overlay"
            );
        }

        let mut instances = context.instances_mut();
        let fields_set = self.overlay_instances(&mut instances, relations, translations)?;

        sink::emit(MetricsEvent::ExecFinish {
            kind: ExecKind::Overlay,
            entity: normalized.entity,
            rows_touched: fields_set,
        });

        Ok(())
    }

    /// Overlay one traversal level: apply matching rows to every
    /// instance, then recurse into each first-level relation with its
    /// descendant paths and the same translation set.
    fn overlay_instances<P: AsRef<str>>(
        &self,
        instances: &mut [&mut (dyn EntityValue + '_)],
        relations: &[P],
        translations: &TranslationSet,
    ) -> Result<u64, Error> {
        let mut fields_set = 0;

        for instance in instances.iter_mut() {
            fields_set += self.apply(&mut **instance, translations)?;
        }

        let hierarchy = RelationHierarchy::parse(relations)?;
        if hierarchy.is_empty() {
            return Ok(fields_set);
        }

        for instance in instances.iter_mut() {
            for (name, descendants) in hierarchy.iter() {
                match instance.relation_mut(name) {
                    Related::None => {}
                    Related::One(child) => {
                        let mut children: Vec<&mut dyn EntityValue> = vec![child];
                        fields_set +=
                            self.overlay_instances(&mut children, descendants, translations)?;
                    }
                    Related::Many(mut children) => {
                        fields_set +=
                            self.overlay_instances(&mut children, descendants, translations)?;
                    }
                }
            }
        }

        Ok(fields_set)
    }

    /// Apply matching rows to one instance. A missing lookup entry means
    /// "no translation for this entity" and leaves every value as-is;
    /// empty row text never overwrites.
    fn apply(
        &self,
        instance: &mut dyn EntityValue,
        translations: &TranslationSet,
    ) -> Result<u64, Error> {
        let registry = self.db.registry();
        let entity = instance.entity_name();

        if !registry.is_translatable(entity)? {
            return Ok(0);
        }
        let fields = registry.translatable_fields(entity)?;

        let Some(rows) = translations.get(entity, &instance.record_id()) else {
            return Ok(0);
        };

        let mut fields_set = 0;
        for row in rows {
            if fields.contains(&row.field.as_str())
                && !row.text.is_empty()
                && instance.set_text_field(&row.field, &row.text)
            {
                fields_set += 1;
            }
        }

        Ok(fields_set)
    }
}
