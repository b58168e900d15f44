//! Unit tests for locale decomposition, containment, and ordering.

use super::*;
use rstest::rstest;
use serial_test::serial;

#[rstest]
#[case("en", "en", "", "")]
#[case("en-US", "en", "", "US")]
#[case("zh-Hans", "zh", "Hans", "")]
#[case("zh-Hans-CN", "zh", "Hans", "CN")]
#[case("es-419", "es", "", "419")]
#[case("sr-Latn-RS", "sr", "Latn", "RS")]
fn decomposes_base_segments(
    #[case] raw: &str,
    #[case] language: &str,
    #[case] script: &str,
    #[case] region: &str,
) {
    let locale = Locale::new(raw);
    assert_eq!(locale.language(), language);
    assert_eq!(locale.script(), script);
    assert_eq!(locale.region(), region);
}

#[rstest]
#[case("", "")]
#[case("-US", "")]
#[case("zh--CN", "zh")]
#[case("not a tag", "not a tag")]
fn malformed_tags_decompose_without_error(#[case] raw: &str, #[case] language: &str) {
    let locale = Locale::new(raw);
    assert_eq!(locale.language(), language);
    // Decomposition is total: accessors answer for any input.
    let _ = locale.script();
    let _ = locale.region();
    let _ = locale.private_use();
}

#[test]
fn doubled_separator_skips_empty_segment() {
    let locale = Locale::new("zh--CN");
    assert_eq!(locale.region(), "CN");
}

#[test]
fn extension_block_splits_into_pairs() {
    let locale = Locale::new("de-DE-u-co-phonebk-nu-latn");
    assert_eq!(locale.extension("co"), Some("phonebk"));
    assert_eq!(locale.extension("nu"), Some("latn"));
    assert_eq!(locale.extension("ca"), None);
    assert_eq!(
        locale.extensions(),
        &[
            ("co".to_owned(), "phonebk".to_owned()),
            ("nu".to_owned(), "latn".to_owned()),
        ]
    );
}

#[test]
fn private_use_block_is_raw_text() {
    let locale = Locale::new("en-x-foo-bar");
    assert_eq!(locale.private_use(), "foo-bar");
    assert_eq!(locale.region(), "");
}

#[test]
fn extension_then_private_use() {
    let locale = Locale::new("th-TH-u-nu-thai-x-corp");
    assert_eq!(locale.region(), "TH");
    assert_eq!(locale.extension("nu"), Some("thai"));
    assert_eq!(locale.private_use(), "corp");
}

#[test]
fn equality_is_exact_textual() {
    assert_eq!(Locale::new("zh-CN"), Locale::new("zh-CN"));
    assert_ne!(Locale::new("zh-CN"), Locale::new("zh-cn"));
    assert_ne!(Locale::new("en"), Locale::new("en-US"));
    assert_ne!(Locale::new("en"), Locale::new("en-x-foo"));
}

#[rstest]
#[case("zh", "zh-Hans-CN", true)]
#[case("zh-Hans-CN", "zh", false)]
#[case("zh", "zh-CN", true)]
#[case("zh-Hans", "zh-Hans-CN", true)]
#[case("zh-CN", "zh-TW", false)]
#[case("zh-TW", "zh-CN", false)]
#[case("zh-Hans", "zh-CN", false)]
#[case("zh-CN", "zh-Hans", false)]
#[case("en", "zh-Hans-CN", false)]
#[case("en", "en", true)]
#[case("zh-Hans-CN", "zh-Hans-CN", true)]
fn containment(#[case] container: &str, #[case] contained: &str, #[case] expected: bool) {
    let container = Locale::new(container);
    let contained = Locale::new(contained);
    assert_eq!(container.contains(&contained), expected);
}

#[rstest]
#[case("zh", "zh-Hans")]
#[case("zh", "zh-Hans-CN")]
#[case("zh-Hans", "zh-Hans-CN")]
#[case("en", "en-GB")]
fn containment_is_antisymmetric(#[case] general: &str, #[case] specific: &str) {
    let general = Locale::new(general);
    let specific = Locale::new(specific);
    assert!(general.contains(&specific));
    assert!(!specific.contains(&general));
    // Containment agrees with ordering: the container sorts after.
    assert_eq!(general.compare(&specific), Ordering::Greater);
    assert_eq!(specific.compare(&general), Ordering::Less);
}

#[test]
fn region_only_sorts_before_script_only() {
    let region = Locale::new("zh-CN");
    let script = Locale::new("zh-Hans");
    assert_eq!(region.compare(&script), Ordering::Less);
    assert_eq!(script.compare(&region), Ordering::Greater);
}

#[test]
fn languages_order_lexicographically() {
    assert_eq!(Locale::new("en").compare(&Locale::new("zh")), Ordering::Less);
    assert_eq!(
        Locale::new("zh-Hans-CN").compare(&Locale::new("en")),
        Ordering::Greater
    );
}

#[test]
fn equal_specificity_orders_by_script_then_region() {
    let hans = Locale::new("zh-Hans-CN");
    let hant = Locale::new("zh-Hant-CN");
    assert_eq!(hans.compare(&hant), Ordering::Less);

    let cn = Locale::new("zh-Hans-CN");
    let sg = Locale::new("zh-Hans-SG");
    assert_eq!(cn.compare(&sg), Ordering::Less);
}

#[test]
fn compare_ignores_extension_blocks() {
    let plain = Locale::new("en-US");
    let extended = Locale::new("en-US-u-ca-gregory");
    assert_eq!(plain.compare(&extended), Ordering::Equal);
    assert_ne!(plain, extended);
}

#[test]
fn cache_interns_per_textual_value() {
    let cache = LocaleCache::new();
    let first = cache.locale("fr-CA");
    let second = cache.locale("fr-CA");
    assert!(Arc::ptr_eq(&first.0, &second.0));
    assert_eq!(cache.len(), 1);

    cache.locale("fr");
    assert_eq!(cache.len(), 2);
}

#[test]
fn cache_clear_keeps_existing_locales_valid() {
    let cache = LocaleCache::new();
    let locale = cache.locale("pt-BR");
    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(locale.region(), "BR");

    let reinterned = cache.locale("pt-BR");
    assert_eq!(reinterned, locale);
    assert!(!Arc::ptr_eq(&reinterned.0, &locale.0));
}

#[test]
#[serial]
fn process_cache_backs_locale_new() {
    process_cache().clear();
    let before = process_cache().len();
    let _ = Locale::new("nb-NO");
    let _ = Locale::new("nb-NO");
    assert_eq!(process_cache().len(), before + 1);
}
