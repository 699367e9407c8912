use std::sync::Arc;
use std::thread;

use rstest::{fixture, rstest};

use super::*;
use crate::i18n::testing::{CountingReader, FailingReader, RecordingSource};
use crate::i18n::{DefaultReader, MemorySource, SourceReader};

type RecordingReader = SourceReader<RecordingSource<MemorySource>>;

fn locale(raw: &str) -> LocaleId {
    LocaleId::parse(raw).expect("locale should parse")
}

fn table(pairs: &[(&str, &str)]) -> TranslationTable {
    pairs.iter().copied().collect()
}

fn english_source() -> MemorySource {
    MemorySource::new()
        .with_table("i18n", locale("en-us"), table(&[("A", "1"), ("B", "2")]))
        .with_table("i18n", locale("en"), table(&[("A", "X"), ("C", "3")]))
        .with_table("i18n", locale("fr"), table(&[("A", "un")]))
}

struct Harness {
    translator: Translator,
    reader: Arc<RecordingReader>,
}

#[fixture]
fn harness() -> Harness {
    let reader = Arc::new(SourceReader::new(RecordingSource::new(english_source())));
    let translator = Translator::default();
    translator.attach_reader(reader.clone(), Placement::First);
    translator.attach_reader(Arc::new(DefaultReader::new()), Placement::Last);
    Harness { translator, reader }
}

#[rstest]
#[case("A", "1")]
#[case("B", "2")]
#[case("C", "3")]
fn specific_values_survive_the_merge(harness: Harness, #[case] key: &str, #[case] expected: &str) {
    assert_eq!(harness.translator.get(key, Some("en-us")), expected);
}

#[rstest]
fn missing_keys_come_back_unchanged(harness: Harness) {
    assert_eq!(harness.translator.get("unknown.key", None), "unknown.key");
    assert_eq!(harness.translator.get("unknown.key", Some("xx")), "unknown.key");
}

#[rstest]
fn default_locale_is_used_when_none_is_given(harness: Harness) {
    assert_eq!(harness.translator.default_locale().as_str(), FALLBACK_LOCALE);
    assert_eq!(harness.translator.get("A", None), "1");
}

#[rstest]
fn repeated_lookups_query_the_store_once(harness: Harness) {
    let first = harness.translator.get("A", Some("en-us"));
    let second = harness.translator.get("A", Some("en-us"));

    assert_eq!(first, second);
    assert_eq!(harness.reader.source().requests(), ["en-us", "en"]);
}

#[rstest]
#[case("en_US")]
#[case("en US")]
#[case("EN-us")]
fn equivalent_spellings_share_a_cache_entry(harness: Harness, #[case] spelling: &str) {
    assert_eq!(harness.translator.get("A", Some("en-us")), "1");
    assert_eq!(harness.translator.get("A", Some(spelling)), "1");

    assert_eq!(harness.translator.cache().len(), 1);
    assert_eq!(harness.reader.source().requests().len(), 2);
}

#[rstest]
fn changing_the_default_keeps_the_cache(harness: Harness) {
    assert_eq!(harness.translator.get("A", None), "1");

    let stored = harness
        .translator
        .set_default_locale("FR")
        .expect("locale should parse");

    assert_eq!(stored.as_str(), "fr");
    assert_eq!(harness.translator.get("A", None), "un");
    assert!(harness.translator.cache().contains(&locale("en-us")));
    assert_eq!(harness.translator.cache().len(), 2);
}

#[rstest]
fn blank_default_locale_is_rejected(harness: Harness) {
    assert!(matches!(
        harness.translator.set_default_locale("  "),
        Err(I18nError::InvalidLocale { .. })
    ));
    assert_eq!(harness.translator.default_locale().as_str(), FALLBACK_LOCALE);
}

#[rstest]
fn invalid_lookup_locale_is_reported_by_try_get(harness: Harness) {
    assert!(matches!(
        harness.translator.try_get("A", Some("")),
        Err(I18nError::InvalidLocale { .. })
    ));
    assert_eq!(harness.translator.get("A", Some("")), "A");
}

#[test]
fn empty_chain_is_an_error_by_default() {
    let translator = Translator::default();

    assert!(matches!(
        translator.try_get("A", None),
        Err(I18nError::NoReadersAttached { .. })
    ));
    assert_eq!(translator.get("A", None), "A");
}

#[test]
fn passthrough_policy_returns_keys_and_caches_nothing() {
    let translator = Translator::default().with_empty_chain_policy(EmptyChainPolicy::Passthrough);

    assert_eq!(translator.try_get("A", None), Ok(String::from("A")));
    assert!(translator.cache().is_empty());

    translator.attach_reader(
        Arc::new(CountingReader::new("late", table(&[("A", "1")]))),
        Placement::First,
    );
    assert_eq!(translator.try_get("A", None), Ok(String::from("1")));
}

#[test]
fn reader_failures_are_reported_but_not_fatal_to_get() {
    let translator = Translator::default();
    translator.attach_reader(Arc::new(FailingReader::new("broken")), Placement::First);

    assert!(matches!(
        translator.try_get("A", None),
        Err(I18nError::Source { .. })
    ));
    assert_eq!(translator.get("A", None), "A");
    assert!(translator.cache().is_empty());
}

#[test]
fn detaching_and_clearing_changes_later_lookups() {
    let translator = Translator::default();
    let primary = Arc::new(CountingReader::new("primary", table(&[("A", "1")])));
    translator.attach_reader(Arc::new(CountingReader::new("base", table(&[("A", "0")]))), Placement::First);
    translator.attach_reader(primary.clone(), Placement::First);
    assert_eq!(translator.get("A", None), "1");

    assert!(translator.detach_reader(&primary));
    assert_eq!(translator.get("A", None), "1");

    translator.clear_cache();
    assert_eq!(translator.get("A", None), "0");
    assert_eq!(translator.chain().reader_names(), ["base"]);
}

#[test]
fn concurrent_lookups_agree() {
    let translator = Arc::new(Translator::default());
    translator.attach_reader(
        Arc::new(SourceReader::new(english_source())),
        Placement::First,
    );

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let shared = Arc::clone(&translator);
            thread::spawn(move || shared.get("A", Some("en-us")))
        })
        .collect();

    for handle in handles {
        let value = handle.join().expect("lookup thread should not panic");
        assert_eq!(value, "1");
    }
    assert_eq!(translator.cache().len(), 1);
}
