//! The catalog accumulator interface and its default in-memory form.
//!
//! Translation sources merge their entries into a [`CatalogBuilder`]; the
//! factory shares one accumulator across every source of a configuration.
//! The trait is object-safe and takes `&self` so concurrently loading
//! sources can merge without external locking; implementations provide
//! their own interior synchronisation.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use unic_langid::LanguageIdentifier;

use crate::LogCallback;
use crate::Locale;

#[cfg(test)]
mod tests;

/// Accumulates translation entries keyed by structured tag and message key.
///
/// Implementations may forward entries to an embedding application's own
/// message store; [`MessageCatalog`] is the built-in default. `message` is
/// the read side a string-formatting engine consumes.
pub trait CatalogBuilder: Send + Sync {
    /// Stores a plain translation string.
    fn set_string(&self, tag: &LanguageIdentifier, key: &str, value: &str);

    /// Stores a select/plural macro as an ordered list of forms.
    fn set_macro(&self, tag: &LanguageIdentifier, name: &str, forms: &[String]);

    /// Looks up the stored string for `key` under `tag`.
    fn message(&self, tag: &LanguageIdentifier, key: &str) -> Option<String>;
}

/// Default in-memory accumulator.
///
/// Entries are held in RwLock-guarded maps keyed by the tag's textual form
/// and then the message key, so the same catalogue can hold every locale a
/// factory routes to it.
#[derive(Debug, Default)]
pub struct MessageCatalog {
    strings: RwLock<HashMap<String, HashMap<String, String>>>,
    macros: RwLock<HashMap<String, HashMap<String, Vec<String>>>>,
}

impl MessageCatalog {
    /// Creates an empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored macro forms for `name` under `tag`.
    #[must_use]
    pub fn macro_forms(&self, tag: &LanguageIdentifier, name: &str) -> Option<Vec<String>> {
        self.macros
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&tag.to_string())
            .and_then(|entries| entries.get(name))
            .cloned()
    }

    /// Number of string entries stored under `tag`.
    #[must_use]
    pub fn len_for(&self, tag: &LanguageIdentifier) -> usize {
        self.strings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&tag.to_string())
            .map_or(0, HashMap::len)
    }
}

impl CatalogBuilder for MessageCatalog {
    fn set_string(&self, tag: &LanguageIdentifier, key: &str, value: &str) {
        self.strings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(tag.to_string())
            .or_default()
            .insert(key.to_owned(), value.to_owned());
    }

    fn set_macro(&self, tag: &LanguageIdentifier, name: &str, forms: &[String]) {
        self.macros
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(tag.to_string())
            .or_default()
            .insert(name.to_owned(), forms.to_vec());
    }

    /// Exact tag match first, then the nearest hierarchically related tag.
    ///
    /// A printer is bound to the caller's requested tag while sources store
    /// entries under their own locale, so a `zh` request served by a
    /// `zh-Hans` source still resolves its strings. Related tags are tried
    /// most specific first for determinism.
    fn message(&self, tag: &LanguageIdentifier, key: &str) -> Option<String> {
        let strings = self.strings.read().unwrap_or_else(PoisonError::into_inner);
        let wanted = tag.to_string();
        if let Some(value) = strings.get(&wanted).and_then(|entries| entries.get(key)) {
            return Some(value.clone());
        }

        let probe = Locale::new(&wanted);
        let mut related: Vec<(&String, Locale)> = strings
            .keys()
            .map(|stored| (stored, Locale::new(stored)))
            .filter(|(_, stored)| stored.contains(&probe) || probe.contains(stored))
            .collect();
        related.sort_by(|(a_raw, a), (b_raw, b)| {
            a.compare(b).then_with(|| a_raw.cmp(b_raw))
        });

        related.into_iter().find_map(|(stored, _)| {
            strings
                .get(stored)
                .and_then(|entries| entries.get(key))
                .cloned()
        })
    }
}

/// Parses a locale's textual form into a structured tag.
///
/// Parse failures are reported through `log` and substituted with the
/// default (undetermined) tag rather than aborting the caller.
pub(crate) fn parse_tag(locale: &Locale, log: &LogCallback) -> LanguageIdentifier {
    match locale.as_str().parse() {
        Ok(tag) => tag,
        Err(_) => {
            log(&format!(
                "locale '{locale}' is not a well-formed language tag; using the default tag"
            ));
            LanguageIdentifier::default()
        }
    }
}
