//! Immutable locale values with lazy, memoized decomposition.
//!
//! A [`Locale`] wraps one textual tag such as `zh-Hans-CN`. Construction is
//! cheap and never validates; decomposition into language, script, region,
//! extension, and private-use segments happens lazily on first access and is
//! memoized per distinct textual value through a [`LocaleCache`]. The cache
//! is an explicit value rather than hidden global state so tests can build
//! and reset their own instance; a process-wide default backs the
//! convenience constructors.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock, OnceLock, PoisonError, RwLock};

mod parse;

use parse::LocaleParts;

#[cfg(test)]
mod tests;

struct LocaleInner {
    raw: Box<str>,
    parts: OnceLock<LocaleParts>,
}

impl LocaleInner {
    fn parts(&self) -> &LocaleParts {
        self.parts.get_or_init(|| parse::parse(&self.raw))
    }
}

/// One structured language tag, e.g. `en`, `zh-Hans`, or `sr-Latn-RS`.
///
/// Equality is exact textual equality of the raw tag; the hierarchical
/// relationships live in [`Locale::contains`] and [`Locale::compare`].
/// Cloning is an `Arc` bump.
#[derive(Clone)]
pub struct Locale(Arc<LocaleInner>);

impl Locale {
    /// Wraps `raw` using the process-wide parse cache.
    pub fn new(raw: &str) -> Self {
        process_cache().locale(raw)
    }

    /// The full textual tag as supplied at construction.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0.raw
    }

    /// The language segment: text up to the first separator.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.0.parts().language
    }

    /// The four-letter script segment, or the empty string when absent.
    #[must_use]
    pub fn script(&self) -> &str {
        &self.0.parts().script
    }

    /// The 2–3 character region segment, or the empty string when absent.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.0.parts().region
    }

    /// The value paired with `name` in the Unicode extension block.
    #[must_use]
    pub fn extension(&self, name: &str) -> Option<&str> {
        self.0
            .parts()
            .extensions
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All key/value pairs of the Unicode extension block, in tag order.
    #[must_use]
    pub fn extensions(&self) -> &[(String, String)] {
        &self.0.parts().extensions
    }

    /// The raw text of the private-use block, or the empty string.
    #[must_use]
    pub fn private_use(&self) -> &str {
        &self.0.parts().private_use
    }

    /// Number of optional segments (script, region) this locale specifies.
    ///
    /// Fewer specified segments means a more general locale.
    #[must_use]
    pub fn specificity(&self) -> usize {
        let parts = self.0.parts();
        usize::from(!parts.script.is_empty()) + usize::from(!parts.region.is_empty())
    }

    /// Hierarchical containment.
    ///
    /// Equal locales contain each other. Different languages never contain
    /// each other. Otherwise the receiver must be strictly more general and
    /// every segment it specifies must be present and equal in `other`.
    /// The relation is not symmetric: `zh` contains `zh-Hans-CN` but not the
    /// reverse, and sibling branches such as `zh-CN` and `zh-TW` never
    /// contain each other.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        if self == other {
            return true;
        }
        if self.language() != other.language() {
            return false;
        }
        if !self.script().is_empty() && self.script() != other.script() {
            return false;
        }
        if !self.region().is_empty() && self.region() != other.region() {
            return false;
        }
        // A locale never contains one at its own specificity or below; the
        // only same-specificity relation is textual equality, handled above.
        self.specificity() < other.specificity()
    }

    /// Ordering used to sort translation sources.
    ///
    /// Languages order lexicographically. Within a language, a more specific
    /// locale sorts before a more general one, so ascending order scans the
    /// most specific candidates first and containment agrees with the
    /// ordering: if `a.contains(b)` and `a != b` then
    /// `a.compare(b) == Ordering::Greater`. At equal specificity a
    /// region-only locale sorts before a script-only one (region is the more
    /// common real-world discriminator), then script and region order
    /// lexicographically.
    ///
    /// Locales identical in all compared segments are `Equal` even when the
    /// raw tags differ (say, in private-use blocks); callers needing a strict
    /// total order tie-break on [`Locale::as_str`].
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        let by_language = self.language().cmp(other.language());
        if by_language != Ordering::Equal {
            return by_language;
        }

        // More specific first: higher specificity is "less".
        let by_specificity = other.specificity().cmp(&self.specificity());
        if by_specificity != Ordering::Equal {
            return by_specificity;
        }

        // Region-only outranks script-only at specificity one.
        match (self.script().is_empty(), other.script().is_empty()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }

        self.script()
            .cmp(other.script())
            .then_with(|| self.region().cmp(other.region()))
    }
}

impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.raw == other.0.raw
    }
}

impl Eq for Locale {}

impl Hash for Locale {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.raw.hash(state);
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.raw)
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Locale").field(&&*self.0.raw).finish()
    }
}

impl From<&str> for Locale {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Locale {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

/// Concurrent read-through cache from raw tag text to interned locale values.
///
/// Interning keeps repeated decomposition of identical tags cheap: every
/// [`Locale`] handed out for one textual value shares the same lazily parsed
/// segments. The cache is cheap to clone (shared interior) and safe for
/// concurrent readers and writers.
#[derive(Clone, Default)]
pub struct LocaleCache {
    map: Arc<RwLock<HashMap<String, Arc<LocaleInner>>>>,
}

impl LocaleCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the interned locale for `raw`, inserting it on first sight.
    pub fn locale(&self, raw: &str) -> Locale {
        {
            let map = self.map.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(inner) = map.get(raw) {
                return Locale(Arc::clone(inner));
            }
        }
        let mut map = self.map.write().unwrap_or_else(PoisonError::into_inner);
        let inner = map.entry(raw.to_owned()).or_insert_with(|| {
            Arc::new(LocaleInner {
                raw: raw.into(),
                parts: OnceLock::new(),
            })
        });
        Locale(Arc::clone(inner))
    }

    /// Drops every interned value. Existing `Locale`s remain valid.
    pub fn clear(&self) {
        self.map
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of distinct textual values currently interned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache holds no interned values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

static PROCESS_CACHE: LazyLock<LocaleCache> = LazyLock::new(LocaleCache::new);

/// The process-wide cache backing [`Locale::new`].
#[must_use]
pub fn process_cache() -> &'static LocaleCache {
    &PROCESS_CACHE
}
