//! The resolution factory: source selection, load deduplication, printer
//! caching, and reconfiguration.
//!
//! All configuration-dependent state (sorted sources, registered set,
//! shared accumulator, printer cache) lives in one [`FactoryState`]
//! snapshot behind an `RwLock<Arc<_>>`. Resolutions clone the `Arc` and
//! drop the guard immediately, so no lock is held across file IO, and a
//! [`PrinterFactory::reset`] swaps the whole snapshot atomically: a
//! resolution can never mix sources and accumulator from different
//! configurations.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use camino::Utf8Path;

use crate::catalog::{CatalogBuilder, parse_tag};
use crate::discovery;
use crate::flight::Flight;
use crate::loader::LoaderRegistry;
use crate::locale_set::LocaleSet;
use crate::printer::Printer;
use crate::source::Source;
use crate::{Locale, LocaleCache, LogCallback};

mod builder;

pub use builder::PrinterFactoryBuilder;


/// Fallback locale used when the builder is given none.
pub const DEFAULT_FALLBACK: &str = "en";

/// Produces a fresh accumulator for each configuration.
pub(crate) type CatalogFactory = Arc<dyn Fn() -> Arc<dyn CatalogBuilder> + Send + Sync>;

/// One configuration's worth of resolution state, replaced as a unit.
struct FactoryState {
    /// Sorted ascending by `Locale::compare` (most specific first within a
    /// language), tie-broken on the raw tag.
    sources: Vec<Arc<Source>>,
    registered: LocaleSet,
    catalog: Arc<dyn CatalogBuilder>,
    /// Insert-once printer cache keyed by the exact requested tag text.
    printers: Mutex<HashMap<String, Arc<Printer>>>,
}

impl FactoryState {
    fn empty(catalog: Arc<dyn CatalogBuilder>) -> Self {
        Self {
            sources: Vec::new(),
            registered: LocaleSet::empty(),
            catalog,
            printers: Mutex::new(HashMap::new()),
        }
    }

    fn cached(&self, requested: &str) -> Option<Arc<Printer>> {
        self.printers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(requested)
            .map(Arc::clone)
    }

    /// Inserts once per key; a racing earlier insert wins and is returned.
    fn cache(&self, requested: &str, printer: Arc<Printer>) -> Arc<Printer> {
        let mut printers = self.printers.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(printers.entry(requested.to_owned()).or_insert(printer))
    }
}

/// Resolves locale requests to cached, locale-bound printers.
///
/// Construction goes through [`PrinterFactory::builder`]. Any number of
/// threads may call any operation concurrently; identical concurrent
/// requests collapse into a single source load and printer construction.
pub struct PrinterFactory {
    state: RwLock<Arc<FactoryState>>,
    fallback: RwLock<Locale>,
    flight: Flight<Arc<Printer>>,
    loaders: LoaderRegistry,
    locales: LocaleCache,
    log: LogCallback,
    new_catalog: CatalogFactory,
}

impl PrinterFactory {
    /// Starts building a factory.
    #[must_use]
    pub fn builder() -> PrinterFactoryBuilder {
        PrinterFactoryBuilder::new()
    }

    /// Returns the printer bound to `requested`, resolving it on first use.
    ///
    /// Resolution never fails: when no source matches and the fallback does
    /// not help either, the printer degrades to an empty catalogue and
    /// formats untranslated. Concurrent calls for the same textual tag share
    /// one resolution; the result is cached under the exact request string
    /// until the next [`PrinterFactory::reset`].
    pub fn printer(&self, requested: &str) -> Arc<Printer> {
        self.flight.run(requested, || self.resolve(requested))
    }

    fn resolve(&self, requested: &str) -> Arc<Printer> {
        let snapshot = {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(&state)
        };
        let locale = self.locales.locale(requested);
        if let Some(printer) = self.resolve_in(&snapshot, requested, &locale) {
            return printer;
        }

        // The fallback hop resolves directly within the snapshot instead of
        // re-entering the dedup group: a concurrent fallback swap could
        // otherwise route this thread back to a key it already leads and
        // leave it waiting on its own call. The insert-once cache keeps a
        // racing duplicate resolution harmless.
        let fallback = self.fallback_locale();
        let printer = if fallback == locale {
            None
        } else {
            self.resolve_in(&snapshot, fallback.as_str(), &fallback)
        };
        let printer = printer.unwrap_or_else(|| {
            tracing::debug!(
                locale = %fallback,
                "no source matches the fallback locale; printer degrades to an empty catalogue"
            );
            let tag = parse_tag(&fallback, &self.log);
            let printer =
                Arc::new(Printer::new(fallback.clone(), tag, (self.new_catalog)()));
            snapshot.cache(fallback.as_str(), printer)
        });
        snapshot.cache(requested, printer)
    }

    /// Cache lookup and source scan for one key within a snapshot; `None`
    /// when no source covers `locale`.
    fn resolve_in(
        &self,
        snapshot: &FactoryState,
        key: &str,
        locale: &Locale,
    ) -> Option<Arc<Printer>> {
        if let Some(existing) = snapshot.cached(key) {
            return Some(existing);
        }

        let source = snapshot.sources.iter().find(|source| {
            source.locale().contains(locale) || locale.contains(source.locale())
        })?;
        source.load(snapshot.catalog.as_ref(), &self.log);
        let tag = parse_tag(locale, &self.log);
        // The printer keeps the caller's tag, not the source's, so the
        // original request stays observable.
        let printer = Arc::new(Printer::new(locale.clone(), tag, Arc::clone(&snapshot.catalog)));
        Some(snapshot.cache(key, printer))
    }

    /// Whether a registered source covers `tag`, or it equals the fallback.
    #[must_use]
    pub fn supports_locale(&self, tag: &str) -> bool {
        let locale = self.locales.locale(tag);
        if locale == self.fallback_locale() {
            return true;
        }
        let snapshot = {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(&state)
        };
        snapshot.registered.contains(&locale)
    }

    /// A defensive copy of the registered locales, or a set holding just the
    /// fallback when nothing is registered.
    #[must_use]
    pub fn supported_locales(&self) -> LocaleSet {
        let snapshot = {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(&state)
        };
        if snapshot.registered.is_empty() {
            return LocaleSet::from_members(vec![self.fallback_locale()]);
        }
        snapshot.registered.clone()
    }

    /// The current fallback locale.
    #[must_use]
    pub fn fallback_locale(&self) -> Locale {
        self.fallback
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swaps the fallback locale, returning the previous value.
    pub fn set_fallback_locale(&self, tag: &str) -> Locale {
        let next = self.locales.locale(tag);
        let mut fallback = self.fallback.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *fallback, next)
    }

    /// Rebuilds every source from `root` and swaps the configuration
    /// atomically.
    ///
    /// The source list, registered set, accumulator, and printer cache are
    /// replaced as one unit; resolutions running against the previous
    /// snapshot finish coherently against it. An unreadable root is logged
    /// and yields an empty configuration, never an error.
    pub fn reset(&self, root: &Utf8Path) {
        tracing::debug!(root = %root, "rebuilding translation sources");
        let sources: Vec<Arc<Source>> =
            discovery::scan_root(root, &self.loaders, &self.locales, &self.log)
                .into_iter()
                .map(Arc::new)
                .collect();
        let registered: LocaleSet = sources
            .iter()
            .map(|source| source.locale().clone())
            .collect();
        let state = Arc::new(FactoryState {
            sources,
            registered,
            catalog: (self.new_catalog)(),
            printers: Mutex::new(HashMap::new()),
        });
        let mut slot = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *slot = state;
    }
}

impl std::fmt::Debug for PrinterFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(&state)
        };
        f.debug_struct("PrinterFactory")
            .field("fallback", &self.fallback_locale())
            .field("sources", &snapshot.sources.len())
            .field("loaders", &self.loaders)
            .finish()
    }
}
