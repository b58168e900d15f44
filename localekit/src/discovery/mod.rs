//! Translation-root scanning and locale-name validation.
//!
//! The directory contract: a per-locale file is named `<locale>.<suffix>`
//! and a per-locale directory is named `<locale>`; directories are scanned
//! one level deep for further files of the same locale. Names that fail
//! validation are skipped with a warning, never fatally.

use std::collections::HashMap;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::CatalogError;
use crate::loader::LoaderRegistry;
use crate::source::{Source, SourceEntry};
use crate::{LocaleCache, LogCallback};


/// Checks that `name` is a well-formed base locale tag.
///
/// Only `language[-script][-region]` shapes are accepted: extension and
/// private-use segments belong in requests, not in directory names.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidLocaleName`] describing the first
/// violation found.
pub fn validate_locale_name(name: &str) -> Result<(), CatalogError> {
    let reject = |reason: &str| Err(CatalogError::invalid_locale_name(name, reason));

    if name.is_empty() {
        return reject("name is empty");
    }
    if name.starts_with('-') || name.ends_with('-') {
        return reject("leading or trailing separator");
    }
    if name.contains("--") {
        return reject("doubled separator");
    }
    if let Some(offender) = name
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '-')
    {
        return Err(CatalogError::invalid_locale_name(
            name,
            format!("reserved character '{offender}'"),
        ));
    }

    let mut segments = name.split('-');
    let language = segments.next().unwrap_or_default();
    if !(1..=8).contains(&language.len())
        || !language.chars().all(|c| c.is_ascii_alphabetic())
    {
        return reject("language subtag must be one to eight letters");
    }

    let mut script_seen = false;
    let mut region_seen = false;
    for segment in segments {
        if segment.eq_ignore_ascii_case("u") || segment.eq_ignore_ascii_case("x") {
            return reject("extension and private-use segments are not allowed");
        }
        let is_script =
            segment.len() == 4 && segment.chars().all(|c| c.is_ascii_alphabetic());
        let is_region = (segment.len() == 2
            && segment.chars().all(|c| c.is_ascii_alphabetic()))
            || (segment.len() == 3 && segment.chars().all(|c| c.is_ascii_digit()));

        if !script_seen && !region_seen && is_script {
            script_seen = true;
        } else if !region_seen && is_region {
            region_seen = true;
        } else {
            return Err(CatalogError::invalid_locale_name(
                name,
                format!("unexpected subtag '{segment}'"),
            ));
        }
    }
    Ok(())
}

/// Lists the loadable files directly inside `dir`, in name order.
///
/// Files without a matching loader are skipped; there is no recursion into
/// subdirectories.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] when the directory cannot be read.
pub fn scan_dir(
    dir: &Utf8Path,
    registry: &LoaderRegistry,
) -> Result<Vec<SourceEntry>, CatalogError> {
    let mut names = Vec::new();
    let listing = fs::read_dir(dir.as_std_path())
        .map_err(|source| CatalogError::io(dir.to_owned(), source))?;
    for entry in listing {
        let entry = entry.map_err(|source| CatalogError::io(dir.to_owned(), source))?;
        if !entry.file_type().is_ok_and(|kind| kind.is_file()) {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    names.sort_unstable();

    Ok(names
        .into_iter()
        .filter_map(|name| {
            registry
                .for_file(&name)
                .map(|loader| SourceEntry::new(dir.join(&name), loader))
        })
        .collect())
}

/// Scans `root` and builds one pending [`Source`] per discovered locale.
///
/// Entries for the same locale (a file and a same-named directory, say)
/// group into a single source. The result is sorted ascending by
/// [`crate::Locale::compare`], tie-broken on the raw tag, so the factory scan is
/// deterministic and considers the most specific candidate first. Invalid
/// names and unreadable directories are reported through `log` and
/// skipped.
pub(crate) fn scan_root(
    root: &Utf8Path,
    registry: &LoaderRegistry,
    locales: &LocaleCache,
    log: &LogCallback,
) -> Vec<Source> {
    let listing = match fs::read_dir(root.as_std_path()) {
        Ok(listing) => listing,
        Err(source) => {
            log(&format!("cannot read translation root '{root}': {source}"));
            return Vec::new();
        }
    };

    let mut names = Vec::new();
    for entry in listing.flatten() {
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    names.sort_unstable();

    let mut grouped: HashMap<String, Vec<SourceEntry>> = HashMap::new();
    for name in names {
        let path = root.join(&name);
        if path.is_dir() {
            collect_locale_dir(&path, &name, registry, log, &mut grouped);
        } else {
            collect_locale_file(path, &name, registry, log, &mut grouped);
        }
    }

    let mut sources: Vec<Source> = grouped
        .into_iter()
        .map(|(tag, entries)| Source::new(locales.locale(&tag), entries))
        .collect();
    sources.sort_by(|a, b| {
        a.locale()
            .compare(b.locale())
            .then_with(|| a.locale().as_str().cmp(b.locale().as_str()))
    });
    sources
}

fn collect_locale_dir(
    path: &Utf8Path,
    name: &str,
    registry: &LoaderRegistry,
    log: &LogCallback,
    grouped: &mut HashMap<String, Vec<SourceEntry>>,
) {
    if let Err(error) = validate_locale_name(name) {
        log(&format!("skipping directory: {error}"));
        return;
    }
    match scan_dir(path, registry) {
        Ok(entries) if entries.is_empty() => {
            tracing::debug!(directory = %path, "locale directory holds no loadable files");
        }
        Ok(entries) => grouped.entry(name.to_owned()).or_default().extend(entries),
        Err(error) => log(&error.to_string()),
    }
}

fn collect_locale_file(
    path: Utf8PathBuf,
    name: &str,
    registry: &LoaderRegistry,
    log: &LogCallback,
    grouped: &mut HashMap<String, Vec<SourceEntry>>,
) {
    let Some(loader) = registry.for_file(name) else {
        return;
    };
    let stem = path.file_stem().unwrap_or_default().to_owned();
    if let Err(error) = validate_locale_name(&stem) {
        log(&format!("skipping file '{name}': {error}"));
        return;
    }
    grouped
        .entry(stem)
        .or_default()
        .push(SourceEntry::new(path, loader));
}
