//! Locale-bound handles over a shared catalogue.

use std::fmt;
use std::sync::Arc;

use unic_langid::LanguageIdentifier;

use crate::catalog::CatalogBuilder;
use crate::Locale;

/// A cached, locale-bound view over a shared catalogue accumulator.
///
/// A printer remembers the caller's original request tag (not the locale of
/// whichever source served it) so embedders can introspect what was asked
/// for. The heavy lifting of substitution and formatting belongs to an
/// external engine; this type exposes the lookup surface such an engine
/// consumes.
pub struct Printer {
    locale: Locale,
    tag: LanguageIdentifier,
    catalog: Arc<dyn CatalogBuilder>,
}

impl Printer {
    pub(crate) fn new(locale: Locale, tag: LanguageIdentifier, catalog: Arc<dyn CatalogBuilder>) -> Self {
        Self {
            locale,
            tag,
            catalog,
        }
    }

    /// The locale this printer was requested for.
    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The structured tag used to key catalogue lookups.
    #[must_use]
    pub fn language(&self) -> &LanguageIdentifier {
        &self.tag
    }

    /// Looks up the translation for `key` under this printer's tag.
    #[must_use]
    pub fn translate(&self, key: &str) -> Option<String> {
        self.catalog.message(&self.tag, key)
    }

    /// Looks up `key`, falling back to `fallback` when no entry exists.
    #[must_use]
    pub fn translate_or(&self, key: &str, fallback: &str) -> String {
        self.translate(key).unwrap_or_else(|| fallback.to_owned())
    }

    /// The shared catalogue this printer reads from.
    #[must_use]
    pub fn catalog(&self) -> &Arc<dyn CatalogBuilder> {
        &self.catalog
    }
}

impl fmt::Debug for Printer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Printer")
            .field("locale", &self.locale)
            .field("tag", &self.tag.to_string())
            .field("catalog", &"<shared>")
            .finish()
    }
}
