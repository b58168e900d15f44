//! Built-in TOML translation loader.

use camino::Utf8Path;
use unic_langid::LanguageIdentifier;

use crate::catalog::CatalogBuilder;
use crate::error::CatalogError;

use super::{Loader, merge_value};

/// Loads `.toml` translation files.
///
/// The parsed document is converted into the JSON value model so both
/// built-in formats share one flattening pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct TomlLoader;

impl Loader for TomlLoader {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".toml"]
    }

    fn load(
        &self,
        path: &Utf8Path,
        raw: &[u8],
        builder: &dyn CatalogBuilder,
        tag: &LanguageIdentifier,
    ) -> Result<(), CatalogError> {
        let text = std::str::from_utf8(raw)
            .map_err(|e| CatalogError::parse(path, e))?;
        let document: toml::Value =
            toml::from_str(text).map_err(|e| CatalogError::parse(path, e))?;
        let document =
            serde_json::to_value(document).map_err(|e| CatalogError::parse(path, e))?;
        merge_value(&document, "", builder, tag);
        Ok(())
    }
}
