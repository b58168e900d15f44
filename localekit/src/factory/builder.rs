//! Builder for [`PrinterFactory`].

use std::sync::{Arc, RwLock};

use camino::Utf8PathBuf;

use crate::catalog::{CatalogBuilder, MessageCatalog};
use crate::flight::Flight;
use crate::loader::LoaderRegistry;
use crate::{LocaleCache, LogCallback};

use super::{CatalogFactory, DEFAULT_FALLBACK, FactoryState, PrinterFactory};

/// Configures and constructs a [`PrinterFactory`].
///
/// Every knob has a default: fallback `en`, the built-in loader registry,
/// a fresh [`MessageCatalog`] per configuration, a parse cache of its own,
/// and a log callback forwarding to `tracing::warn!`.
pub struct PrinterFactoryBuilder {
    root: Option<Utf8PathBuf>,
    fallback: String,
    loaders: LoaderRegistry,
    locales: LocaleCache,
    log: Option<LogCallback>,
    new_catalog: Option<CatalogFactory>,
}

impl PrinterFactoryBuilder {
    pub(super) fn new() -> Self {
        Self {
            root: None,
            fallback: DEFAULT_FALLBACK.to_owned(),
            loaders: LoaderRegistry::default(),
            locales: LocaleCache::new(),
            log: None,
            new_catalog: None,
        }
    }

    /// Root translation directory scanned on build and on every reset.
    #[must_use]
    pub fn root(mut self, root: impl Into<Utf8PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Locale substituted when no registered source matches a request.
    #[must_use]
    pub fn fallback_locale(mut self, tag: impl Into<String>) -> Self {
        self.fallback = tag.into();
        self
    }

    /// Replaces the loader registry (defaults to the built-in formats).
    #[must_use]
    pub fn loaders(mut self, loaders: LoaderRegistry) -> Self {
        self.loaders = loaders;
        self
    }

    /// Shares a locale parse cache with the embedder (handy in tests).
    #[must_use]
    pub fn locale_cache(mut self, locales: LocaleCache) -> Self {
        self.locales = locales;
        self
    }

    /// Receives configuration and load warnings (defaults to
    /// `tracing::warn!`).
    #[must_use]
    pub fn log_callback(mut self, log: LogCallback) -> Self {
        self.log = Some(log);
        self
    }

    /// Supplies the accumulator constructed for each configuration
    /// (defaults to [`MessageCatalog`]).
    #[must_use]
    pub fn catalog_factory(
        mut self,
        new_catalog: impl Fn() -> Arc<dyn CatalogBuilder> + Send + Sync + 'static,
    ) -> Self {
        self.new_catalog = Some(Arc::new(new_catalog));
        self
    }

    /// Builds the factory, scanning the root directory when one was given.
    #[must_use]
    pub fn build(self) -> PrinterFactory {
        let log: LogCallback = self
            .log
            .unwrap_or_else(|| Arc::new(|message: &str| tracing::warn!("{message}")));
        let new_catalog: CatalogFactory = self
            .new_catalog
            .unwrap_or_else(|| Arc::new(|| Arc::new(MessageCatalog::new())));
        let fallback = self.locales.locale(&self.fallback);

        let factory = PrinterFactory {
            state: RwLock::new(Arc::new(FactoryState::empty(new_catalog()))),
            fallback: RwLock::new(fallback),
            flight: Flight::new(),
            loaders: self.loaders,
            locales: self.locales,
            log,
            new_catalog,
        };
        if let Some(root) = self.root {
            factory.reset(&root);
        }
        factory
    }
}

impl Default for PrinterFactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PrinterFactoryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrinterFactoryBuilder")
            .field("root", &self.root)
            .field("fallback", &self.fallback)
            .field("loaders", &self.loaders)
            .finish()
    }
}
