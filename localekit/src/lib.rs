//! Locale resolution and translation-catalogue loading.
//!
//! `localekit` turns a directory of translation files into cached,
//! locale-bound [`Printer`] handles. A [`PrinterFactory`] scans a
//! translation root once per configuration, orders the discovered sources
//! so the most specific locale wins, loads each source's files at most
//! once, and collapses identical concurrent requests into a single
//! resolution. Requests that match no source degrade to a configured
//! fallback locale instead of failing.
//!
//! Locale tags follow the BCP-47 `language[-script][-region]` shape, with
//! Unicode extension and private-use segments tolerated in requests. The
//! [`Locale`] type gives them a containment and ordering algebra; parsing
//! is total, so malformed input still yields a usable value.
//!
//! # Examples
//!
//! ```
//! use localekit::PrinterFactory;
//!
//! let factory = PrinterFactory::builder().fallback_locale("en").build();
//! let printer = factory.printer("de-AT");
//! assert_eq!(printer.locale().as_str(), "de-AT");
//! assert_eq!(printer.translate_or("greeting", "Hello"), "Hello");
//! ```
//!
//! Point the builder at a directory of `<locale>.json` or `<locale>.toml`
//! files (or `<locale>/` directories of them) to serve real translations:
//!
//! ```no_run
//! use localekit::PrinterFactory;
//!
//! let factory = PrinterFactory::builder()
//!     .root("translations")
//!     .fallback_locale("en")
//!     .build();
//! let printer = factory.printer("zh-Hans-CN");
//! println!("{}", printer.translate_or("greeting", "Hello"));
//! ```

use std::sync::Arc;

mod catalog;
/// Translation-root scanning and locale-name validation.
pub mod discovery;
mod error;
mod factory;
mod flight;
/// File-format loaders and their registry.
pub mod loader;
mod locale;
mod locale_set;
mod printer;
mod source;

pub use catalog::{CatalogBuilder, MessageCatalog};
pub use error::CatalogError;
pub use factory::{DEFAULT_FALLBACK, PrinterFactory, PrinterFactoryBuilder};
pub use loader::{JsonLoader, Loader, LoaderRegistry, TomlLoader};
pub use locale::{Locale, LocaleCache, process_cache};
pub use locale_set::LocaleSet;
pub use printer::Printer;
pub use source::{Source, SourceEntry};
pub use unic_langid::LanguageIdentifier;

/// Receives human-readable warnings from scanning and loading.
///
/// The default callback forwards each message to `tracing::warn!`;
/// embedders route diagnostics elsewhere by supplying their own via
/// [`PrinterFactoryBuilder::log_callback`].
pub type LogCallback = Arc<dyn Fn(&str) + Send + Sync>;
