//! Error types produced while discovering and loading translation catalogues.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning for or loading translation files.
///
/// None of these are fatal to a [`crate::PrinterFactory`]: discovery skips the
/// offending entry and load failures degrade to a partially (or entirely)
/// untranslated catalogue. The variants exist so loaders and embedders can
/// report precisely what went wrong through the log callback.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// A translation file could not be read from disk.
    #[error("failed to read translation file '{path}': {source}")]
    Io {
        /// Path of the file that failed to read.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A translation file was read but its contents failed to parse.
    #[error("failed to parse translation file '{path}': {source}")]
    Parse {
        /// Path of the file that failed to parse.
        path: Utf8PathBuf,
        /// Parser error reported by the format loader.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A directory or file name did not validate as a base locale tag.
    #[error("invalid locale name '{name}': {reason}")]
    InvalidLocaleName {
        /// The offending directory or file stem.
        name: String,
        /// Human-readable explanation of the rejection.
        reason: String,
    },

    /// No registered loader matched the file's extension.
    #[error("no loader registered for '{path}'")]
    UnsupportedFormat {
        /// Path of the unmatched file.
        path: Utf8PathBuf,
    },
}

impl CatalogError {
    /// Builds an [`CatalogError::Io`] from a path and IO error.
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Builds a [`CatalogError::Parse`] from a path and any parser error.
    pub fn parse(
        path: impl Into<Utf8PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Builds a [`CatalogError::InvalidLocaleName`] with the given reason.
    pub fn invalid_locale_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLocaleName {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
