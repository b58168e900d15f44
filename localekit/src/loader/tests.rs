//! Unit tests for the built-in loaders and the registry.

use super::*;
use crate::catalog::MessageCatalog;
use camino::Utf8PathBuf;
use rstest::rstest;
use unic_langid::langid;

fn load_into(loader: &dyn Loader, raw: &[u8]) -> MessageCatalog {
    let catalog = MessageCatalog::new();
    let path = Utf8PathBuf::from("en.test");
    loader
        .load(&path, raw, &catalog, &langid!("en"))
        .expect("document should parse");
    catalog
}

#[test]
fn json_loader_flattens_nested_tables() {
    let catalog = load_into(
        &JsonLoader,
        br#"{"greeting": "Hello", "menu": {"file": {"open": "Open"}}}"#,
    );
    assert_eq!(
        catalog.message(&langid!("en"), "greeting").as_deref(),
        Some("Hello")
    );
    assert_eq!(
        catalog.message(&langid!("en"), "menu.file.open").as_deref(),
        Some("Open")
    );
}

#[test]
fn json_loader_stores_arrays_as_macros() {
    let catalog = load_into(&JsonLoader, br#"{"items": ["one item", "many items"]}"#);
    assert_eq!(
        catalog.macro_forms(&langid!("en"), "items"),
        Some(vec!["one item".to_owned(), "many items".to_owned()])
    );
}

#[test]
fn json_loader_stores_scalars_textually() {
    let catalog = load_into(&JsonLoader, br#"{"max": 10, "enabled": true}"#);
    assert_eq!(catalog.message(&langid!("en"), "max").as_deref(), Some("10"));
    assert_eq!(
        catalog.message(&langid!("en"), "enabled").as_deref(),
        Some("true")
    );
}

#[test]
fn json_loader_rejects_non_object_root() {
    let catalog = MessageCatalog::new();
    let path = Utf8PathBuf::from("en.json");
    let err = JsonLoader
        .load(&path, b"[1, 2]", &catalog, &langid!("en"))
        .expect_err("array root should be rejected");
    assert!(matches!(err, CatalogError::Parse { .. }));
}

#[test]
fn json_loader_rejects_malformed_bytes() {
    let catalog = MessageCatalog::new();
    let path = Utf8PathBuf::from("en.json");
    let err = JsonLoader
        .load(&path, b"{not json", &catalog, &langid!("en"))
        .expect_err("malformed document should be rejected");
    assert!(matches!(err, CatalogError::Parse { .. }));
}

#[test]
fn toml_loader_flattens_nested_tables() {
    let catalog = load_into(
        &TomlLoader,
        b"greeting = \"Hallo\"\n\n[menu.file]\nopen = \"Offnen\"\n",
    );
    assert_eq!(
        catalog.message(&langid!("en"), "greeting").as_deref(),
        Some("Hallo")
    );
    assert_eq!(
        catalog.message(&langid!("en"), "menu.file.open").as_deref(),
        Some("Offnen")
    );
}

#[test]
fn toml_loader_rejects_invalid_utf8() {
    let catalog = MessageCatalog::new();
    let path = Utf8PathBuf::from("en.toml");
    let err = TomlLoader
        .load(&path, &[0xff, 0xfe], &catalog, &langid!("en"))
        .expect_err("invalid UTF-8 should be rejected");
    assert!(matches!(err, CatalogError::Parse { .. }));
}

#[rstest]
#[case("en.json", true)]
#[case("en.JSON", true)]
#[case("zh-Hans.Json", true)]
#[case("en.toml", false)]
#[case("json", false)]
#[case("en", false)]
fn json_extension_matches_case_insensitively(#[case] filename: &str, #[case] expected: bool) {
    assert_eq!(JsonLoader.can_load(filename), expected);
}

#[test]
fn registry_first_match_wins() {
    struct GreedyLoader;
    impl Loader for GreedyLoader {
        fn name(&self) -> &'static str {
            "greedy"
        }
        fn extensions(&self) -> &'static [&'static str] {
            &[".json", ".toml"]
        }
        fn load(
            &self,
            _path: &Utf8Path,
            _raw: &[u8],
            _builder: &dyn CatalogBuilder,
            _tag: &LanguageIdentifier,
        ) -> Result<(), CatalogError> {
            Ok(())
        }
    }

    let mut registry = LoaderRegistry::bare();
    registry.register(Arc::new(GreedyLoader));
    registry.register(Arc::new(JsonLoader));

    let matched = registry
        .for_file("en.json")
        .expect("a loader should match");
    assert_eq!(matched.name(), "greedy");
}

#[test]
fn default_registry_covers_built_in_formats() {
    let registry = LoaderRegistry::default();
    assert_eq!(
        registry.for_file("en.json").map(|l| l.name()),
        Some("json")
    );
    assert_eq!(
        registry.for_file("en.toml").map(|l| l.name()),
        Some("toml")
    );
    assert!(registry.for_file("en.yaml").is_none());
}

#[test]
fn suffix_matching_requires_full_extension() {
    assert!(!has_suffix("en.json5", ".json"));
    assert!(has_suffix("a.b.JSON", ".json"));
    assert!(!has_suffix(".js", ".json"));
}
