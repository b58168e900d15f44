//! Unit tests for the default message catalogue and tag parsing.

use super::*;
use std::sync::{Arc, Mutex};
use unic_langid::langid;

#[test]
fn stores_and_reads_strings_per_tag() {
    let catalog = MessageCatalog::new();
    catalog.set_string(&langid!("en"), "greeting", "Hello");
    catalog.set_string(&langid!("fr"), "greeting", "Bonjour");

    assert_eq!(
        catalog.message(&langid!("en"), "greeting").as_deref(),
        Some("Hello")
    );
    assert_eq!(
        catalog.message(&langid!("fr"), "greeting").as_deref(),
        Some("Bonjour")
    );
    assert_eq!(catalog.message(&langid!("de"), "greeting"), None);
    assert_eq!(catalog.message(&langid!("en"), "missing"), None);
}

#[test]
fn later_writes_replace_earlier_ones() {
    let catalog = MessageCatalog::new();
    catalog.set_string(&langid!("en"), "greeting", "Hi");
    catalog.set_string(&langid!("en"), "greeting", "Hello");
    assert_eq!(
        catalog.message(&langid!("en"), "greeting").as_deref(),
        Some("Hello")
    );
    assert_eq!(catalog.len_for(&langid!("en")), 1);
}

#[test]
fn stores_macros_separately_from_strings() {
    let catalog = MessageCatalog::new();
    let forms = vec!["one item".to_owned(), "many items".to_owned()];
    catalog.set_macro(&langid!("en"), "items", &forms);

    assert_eq!(catalog.macro_forms(&langid!("en"), "items"), Some(forms));
    assert_eq!(catalog.message(&langid!("en"), "items"), None);
}

#[test]
fn lookup_falls_back_to_related_tags() {
    let catalog = MessageCatalog::new();
    catalog.set_string(&langid!("zh-Hans-CN"), "greeting", "Nihao");

    // A broader request resolves entries stored under a narrower tag…
    assert_eq!(
        catalog.message(&langid!("zh"), "greeting").as_deref(),
        Some("Nihao")
    );
    // …and a narrower request resolves entries stored under a broader one.
    catalog.set_string(&langid!("fr"), "greeting", "Bonjour");
    assert_eq!(
        catalog.message(&langid!("fr-CA"), "greeting").as_deref(),
        Some("Bonjour")
    );
    // Sibling branches stay separate.
    assert_eq!(catalog.message(&langid!("zh-TW"), "greeting"), None);
}

#[test]
fn exact_tag_wins_over_related_tags() {
    let catalog = MessageCatalog::new();
    catalog.set_string(&langid!("zh"), "greeting", "broad");
    catalog.set_string(&langid!("zh-Hans-CN"), "greeting", "narrow");

    assert_eq!(
        catalog.message(&langid!("zh"), "greeting").as_deref(),
        Some("broad")
    );
    assert_eq!(
        catalog.message(&langid!("zh-Hans-CN"), "greeting").as_deref(),
        Some("narrow")
    );
    // An unrelated-but-contained probe prefers the most specific entry.
    assert_eq!(
        catalog.message(&langid!("zh-Hans"), "greeting").as_deref(),
        Some("narrow")
    );
}

#[test]
fn parse_tag_accepts_well_formed_locales() {
    let log: LogCallback = Arc::new(|_| panic!("no warning expected"));
    let tag = parse_tag(&Locale::new("zh-Hans-CN"), &log);
    assert_eq!(tag, langid!("zh-Hans-CN"));
}

#[test]
fn parse_tag_substitutes_default_on_failure() {
    let warnings = Arc::new(Mutex::new(Vec::new()));
    let log: LogCallback = {
        let captured = Arc::clone(&warnings);
        Arc::new(move |message: &str| {
            captured
                .lock()
                .expect("warning log mutex poisoned")
                .push(message.to_owned());
        })
    };

    let tag = parse_tag(&Locale::new("not a tag"), &log);
    assert_eq!(tag, LanguageIdentifier::default());

    let logged = warnings.lock().expect("warning log mutex poisoned");
    assert_eq!(logged.len(), 1);
    assert!(logged[0].contains("not a tag"));
}
