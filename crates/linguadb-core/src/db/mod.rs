pub mod address;
pub mod context;
pub mod fetch;
pub mod hierarchy;
pub mod overlay;
pub mod persist;
pub mod query;
pub mod store;
pub mod translation;


pub use context::Context;
pub use fetch::{FetchExecutor, TranslationSet};
pub use hierarchy::RelationHierarchy;
pub use overlay::OverlayExecutor;
pub use persist::PersistExecutor;
pub use query::{FilterClause, TranslationQuery};
pub use store::{MemoryStore, StoreTransaction, TranslationStore};
pub use translation::{Translation, TranslationKey};

use crate::{
    error::Error, lang::LanguageConfig, obs::sink::{with_metrics_sink, MetricsSink},
    registry::EntityRegistry,
};

///
/// Translations
///
/// Entry point binding a store, an entity registry, and a language
/// config. Acts as the handle every executor borrows; operations go
/// through [`TranslationSession`] or the shortcut methods here.
///

pub struct Translations<'a, S: TranslationStore> {
    store: &'a S,
    registry: &'a EntityRegistry,
    languages: &'a LanguageConfig,
}

impl<'a, S: TranslationStore> Translations<'a, S> {
    #[must_use]
    pub const fn new(
        store: &'a S,
        registry: &'a EntityRegistry,
        languages: &'a LanguageConfig,
    ) -> Self {
        Self {
            store,
            registry,
            languages,
        }
    }

    #[must_use]
    pub const fn session(&self) -> TranslationSession<'a, S> {
        TranslationSession::new(*self)
    }

    pub(crate) const fn store(&self) -> &'a S {
        self.store
    }

    pub(crate) const fn registry(&self) -> &'a EntityRegistry {
        self.registry
    }

    pub(crate) const fn languages(&self) -> &'a LanguageConfig {
        self.languages
    }

    //
    // High-level shortcuts (default session policy)
    //

    /// Fetch every translation row for the context graph in one round
    /// trip.
    pub fn fetch(
        &self,
        context: &Context<'_>,
        relations: &[&str],
        language: Option<&str>,
    ) -> Result<TranslationSet, Error> {
        self.session().fetch(context, relations, language)
    }

    /// Overlay translated values onto the context graph in place.
    pub fn translate(
        &self,
        context: &mut Context<'_>,
        relations: &[&str],
        language: Option<&str>,
    ) -> Result<(), Error> {
        self.session().translate(context, relations, language)
    }

    /// Transactionally capture the context's current field values as
    /// the translation rows for `language`.
    pub fn update(&self, context: &Context<'_>, language: Option<&str>) -> Result<(), Error> {
        self.session().update(context, language)
    }
}

// Manual Copy + Clone implementations.
// Safe because the handle only holds shared references; copying never
// requires S itself to be copyable.
impl<S: TranslationStore> Copy for Translations<'_, S> {}

impl<S: TranslationStore> Clone for Translations<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

///
/// TranslationSession
/// Session-scoped handle with policy (debug, metrics) and operation
/// routing.
///

pub struct TranslationSession<'a, S: TranslationStore> {
    db: Translations<'a, S>,
    debug: bool,
    metrics: Option<&'static dyn MetricsSink>,
}

impl<'a, S: TranslationStore> TranslationSession<'a, S> {
    #[must_use]
    pub const fn new(db: Translations<'a, S>) -> Self {
        Self {
            db,
            debug: false,
            metrics: None,
        }
    }

    /// Enable debug logging for subsequent operations in this session.
    #[must_use]
    pub const fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    /// Route this session's instrumentation events to `sink`.
    #[must_use]
    pub const fn metrics_sink(mut self, sink: &'static dyn MetricsSink) -> Self {
        self.metrics = Some(sink);
        self
    }

    fn with_metrics<T>(&self, f: impl FnOnce() -> T) -> T {
        if let Some(sink) = self.metrics {
            with_metrics_sink(sink, f)
        } else {
            f()
        }
    }

    /// Fetch the translation rows for a context and its relation paths.
    pub fn fetch(
        &self,
        context: &Context<'_>,
        relations: &[&str],
        language: Option<&str>,
    ) -> Result<TranslationSet, Error> {
        self.with_metrics(|| {
            FetchExecutor::new(self.db, self.debug).execute(context, relations, language)
        })
    }

    /// Overlay translated values onto the context graph, fetching the
    /// rows first.
    pub fn translate(
        &self,
        context: &mut Context<'_>,
        relations: &[&str],
        language: Option<&str>,
    ) -> Result<(), Error> {
        self.with_metrics(|| {
            OverlayExecutor::new(self.db, self.debug).execute(context, relations, language, None)
        })
    }

    /// Overlay translated values reusing an already fetched set.
    pub fn translate_with(
        &self,
        context: &mut Context<'_>,
        relations: &[&str],
        language: Option<&str>,
        translations: &TranslationSet,
    ) -> Result<(), Error> {
        self.with_metrics(|| {
            OverlayExecutor::new(self.db, self.debug).execute(
                context,
                relations,
                language,
                Some(translations),
            )
        })
    }

    /// Replace the side-table rows for a context and language with a
    /// snapshot of its current field values.
    pub fn update(&self, context: &Context<'_>, language: Option<&str>) -> Result<(), Error> {
        self.with_metrics(|| PersistExecutor::new(self.db, self.debug).execute(context, language))
    }
}
