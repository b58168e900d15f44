//! Built-in JSON translation loader.

use camino::Utf8Path;
use unic_langid::LanguageIdentifier;

use crate::catalog::CatalogBuilder;
use crate::error::CatalogError;

use super::{Loader, merge_value};

/// Loads `.json` translation files.
///
/// The document root must be an object; nested objects flatten into
/// `.`-joined message keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLoader;

impl Loader for JsonLoader {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".json"]
    }

    fn load(
        &self,
        path: &Utf8Path,
        raw: &[u8],
        builder: &dyn CatalogBuilder,
        tag: &LanguageIdentifier,
    ) -> Result<(), CatalogError> {
        let document: serde_json::Value =
            serde_json::from_slice(raw).map_err(|e| CatalogError::parse(path, e))?;
        if !document.is_object() {
            return Err(CatalogError::parse(
                path,
                std::io::Error::other("translation document root must be an object"),
            ));
        }
        merge_value(&document, "", builder, tag);
        Ok(())
    }
}
