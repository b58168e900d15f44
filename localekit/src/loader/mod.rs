//! Pluggable translation-file loaders and their registry.
//!
//! A [`Loader`] turns one file's bytes into catalogue entries for a given
//! tag. Loaders are matched to files by dot-prefixed extension,
//! case-insensitively, and the first registered match wins. The default
//! registry carries the built-in JSON and TOML loaders; embedders can
//! register their own formats ahead of or instead of those.

use std::sync::Arc;

use camino::Utf8Path;
use uncased::UncasedStr;
use unic_langid::LanguageIdentifier;

use crate::catalog::CatalogBuilder;
use crate::error::CatalogError;

mod json;
mod toml;

pub use json::JsonLoader;
pub use toml::TomlLoader;

#[cfg(test)]
mod tests;

/// Parses one translation file format into catalogue entries.
pub trait Loader: Send + Sync {
    /// Short format name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Dot-prefixed file suffixes this loader accepts, e.g. `[".json"]`.
    fn extensions(&self) -> &'static [&'static str];

    /// Whether `filename` carries one of this loader's suffixes.
    ///
    /// Matching is case-insensitive on the suffix text.
    fn can_load(&self, filename: &str) -> bool {
        self.extensions()
            .iter()
            .any(|extension| has_suffix(filename, extension))
    }

    /// Parses `raw` and merges its entries into `builder` under `tag`.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::Parse`] when the bytes are not a valid
    /// document for this format.
    fn load(
        &self,
        path: &Utf8Path,
        raw: &[u8],
        builder: &dyn CatalogBuilder,
        tag: &LanguageIdentifier,
    ) -> Result<(), CatalogError>;
}

fn has_suffix(filename: &str, suffix: &str) -> bool {
    filename
        .len()
        .checked_sub(suffix.len())
        .and_then(|start| filename.get(start..))
        .is_some_and(|tail| UncasedStr::new(tail) == UncasedStr::new(suffix))
}

/// Ordered collection of loaders; first extension match wins.
#[derive(Clone)]
pub struct LoaderRegistry {
    loaders: Vec<Arc<dyn Loader>>,
}

impl LoaderRegistry {
    /// Creates a registry with no loaders.
    #[must_use]
    pub fn bare() -> Self {
        Self {
            loaders: Vec::new(),
        }
    }

    /// Appends a loader after the ones already registered.
    pub fn register(&mut self, loader: Arc<dyn Loader>) {
        self.loaders.push(loader);
    }

    /// Returns the first registered loader that accepts `filename`.
    #[must_use]
    pub fn for_file(&self, filename: &str) -> Option<Arc<dyn Loader>> {
        self.loaders
            .iter()
            .find(|loader| loader.can_load(filename))
            .map(Arc::clone)
    }

    /// Whether no loader is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl Default for LoaderRegistry {
    /// The built-in formats: JSON first, then TOML.
    fn default() -> Self {
        Self {
            loaders: vec![Arc::new(JsonLoader), Arc::new(TomlLoader)],
        }
    }
}

impl std::fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.loaders.iter().map(|loader| loader.name()).collect();
        f.debug_struct("LoaderRegistry").field("loaders", &names).finish()
    }
}

/// Merges a parsed JSON document into the builder under `tag`.
///
/// Nested objects flatten into `.`-joined keys. Strings become plain
/// entries, arrays of strings become macros, and scalar numbers or booleans
/// are stored via their textual form. Shared by the built-in loaders: the
/// TOML loader converts its document into the same value model first.
fn merge_value(
    value: &serde_json::Value,
    prefix: &str,
    builder: &dyn CatalogBuilder,
    tag: &LanguageIdentifier,
) {
    match value {
        serde_json::Value::Object(entries) => {
            for (name, child) in entries {
                let key = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                merge_value(child, &key, builder, tag);
            }
        }
        serde_json::Value::Array(items) => {
            let forms: Vec<String> = items
                .iter()
                .map(|item| match item {
                    serde_json::Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect();
            builder.set_macro(tag, prefix, &forms);
        }
        serde_json::Value::String(text) => builder.set_string(tag, prefix, text),
        serde_json::Value::Bool(_) | serde_json::Value::Number(_) => {
            builder.set_string(tag, prefix, &value.to_string());
        }
        serde_json::Value::Null => {}
    }
}
