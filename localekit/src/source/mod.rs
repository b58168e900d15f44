//! Pending, not-yet-loaded translation entries for one locale.

use std::fs;
use std::sync::{Arc, Mutex, PoisonError};

use camino::Utf8PathBuf;

use crate::catalog::{CatalogBuilder, parse_tag};
use crate::error::CatalogError;
use crate::loader::Loader;
use crate::{Locale, LogCallback};


/// One translation file paired with the loader that will parse it.
#[derive(Clone)]
pub struct SourceEntry {
    path: Utf8PathBuf,
    loader: Arc<dyn Loader>,
}

impl SourceEntry {
    /// Pairs a file path with its format loader.
    #[must_use]
    pub fn new(path: Utf8PathBuf, loader: Arc<dyn Loader>) -> Self {
        Self { path, loader }
    }

    /// The file this entry will read.
    #[must_use]
    pub fn path(&self) -> &Utf8PathBuf {
        &self.path
    }
}

impl std::fmt::Debug for SourceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceEntry")
            .field("path", &self.path)
            .field("loader", &self.loader.name())
            .finish()
    }
}

/// The pending translation entries for exactly one locale.
///
/// A source is a single-use unit: the first [`Source::load`] call takes the
/// entry list, merges each file into the accumulator, and leaves the list
/// permanently empty, so any later call is a guaranteed no-op. Two different
/// requested tags can route to the same source concurrently; taking the list
/// under the lock keeps that race benign.
#[derive(Debug)]
pub struct Source {
    locale: Locale,
    entries: Mutex<Vec<SourceEntry>>,
}

impl Source {
    /// Creates a source for `locale` over the given file entries.
    #[must_use]
    pub fn new(locale: Locale, entries: Vec<SourceEntry>) -> Self {
        Self {
            locale,
            entries: Mutex::new(entries),
        }
    }

    /// The locale this source's entries translate.
    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Number of entries not yet loaded (zero once loaded).
    #[must_use]
    pub fn pending_entries(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Loads every pending entry into `builder`, at most once.
    ///
    /// Per-file read or parse failures are reported through `log` and the
    /// remaining files are still attempted; partial success is acceptable.
    /// Whatever the outcome, the entry list ends up empty and the source
    /// counts as loaded.
    pub fn load(&self, builder: &dyn CatalogBuilder, log: &LogCallback) {
        let entries = {
            let mut guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *guard)
        };
        if entries.is_empty() {
            return;
        }

        let tag = parse_tag(&self.locale, log);
        for entry in entries {
            let raw = match fs::read(entry.path.as_std_path()) {
                Ok(raw) => raw,
                Err(source) => {
                    log(&CatalogError::io(entry.path.clone(), source).to_string());
                    continue;
                }
            };
            if let Err(error) = entry.loader.load(&entry.path, &raw, builder, &tag) {
                log(&error.to_string());
            }
        }
    }
}
