//! Behaviour-driven coverage for translator lookups.
//!
//! Scenarios exercise fallback merging inside a source reader, first-match
//! resolution across readers, and the error reported by an empty chain.

use std::cell::RefCell;
use std::str::FromStr;
use std::sync::Arc;

use phrasebook_common::i18n::testing::{CountingReader, RecordingSource};
use phrasebook_common::i18n::{
    DefaultReader, I18nError, LocaleId, MemorySource, Placement, SourceReader, TranslationTable,
    Translator,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

type StoreReader = SourceReader<RecordingSource<MemorySource>>;

#[derive(Default)]
struct TranslatorWorld {
    translator: Translator,
    store: RefCell<MemorySource>,
    store_reader: RefCell<Option<Arc<StoreReader>>>,
    outcome: RefCell<Option<Result<String, I18nError>>>,
}

impl TranslatorWorld {
    fn outcome(&self) -> Result<String, I18nError> {
        self.outcome
            .borrow()
            .as_ref()
            .cloned()
            .unwrap_or_else(|| panic!("a lookup should have been performed"))
    }
}

#[fixture]
fn world() -> TranslatorWorld {
    TranslatorWorld::default()
}

#[derive(Debug)]
struct StepPlacement(Placement);

impl FromStr for StepPlacement {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim() {
            "first" => Ok(Self(Placement::First)),
            "last" => Ok(Self(Placement::Last)),
            other => Err(format!("unknown placement '{other}'")),
        }
    }
}

#[derive(Debug)]
struct StepNames(Vec<String>);

impl FromStr for StepNames {
    type Err = std::convert::Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(Self(input.split(',').map(|name| name.trim().to_owned()).collect()))
    }
}

fn parse_locale(raw: &str) -> LocaleId {
    LocaleId::parse(raw).unwrap_or_else(|error| panic!("step locale `{raw}`: {error}"))
}

#[given("the store holds {key} as {value} for {locale}")]
fn store_holds(world: &TranslatorWorld, key: String, value: String, locale: String) {
    let table = TranslationTable::from_iter([(key, value)]);
    world
        .store
        .borrow_mut()
        .insert("i18n", parse_locale(&locale), table);
}

#[given("the store reader is attached {placement}")]
fn attach_store(world: &TranslatorWorld, placement: StepPlacement) {
    let store = world.store.take();
    let reader = Arc::new(SourceReader::new(RecordingSource::new(store)).with_name("store"));
    world.translator.attach_reader(reader.clone(), placement.0);
    world.store_reader.replace(Some(reader));
}

#[given("a terminal reader is attached {placement}")]
fn attach_terminal(world: &TranslatorWorld, placement: StepPlacement) {
    world
        .translator
        .attach_reader(Arc::new(DefaultReader::new()), placement.0);
}

#[given("a reader named {name} holding {key} as {value} is attached {placement}")]
fn attach_fixed(
    world: &TranslatorWorld,
    name: String,
    key: String,
    value: String,
    placement: StepPlacement,
) {
    let reader = CountingReader::new(name, TranslationTable::from_iter([(key, value)]));
    world.translator.attach_reader(Arc::new(reader), placement.0);
}

#[given("no readers are attached")]
fn no_readers(world: &TranslatorWorld) {
    assert!(world.translator.chain().is_empty());
}

#[when("I translate {key} for {locale}")]
fn translate(world: &TranslatorWorld, key: String, locale: String) {
    let outcome = world.translator.try_get(&key, Some(locale.as_str()));
    world.outcome.replace(Some(outcome));
}

#[then("the translation is {expected}")]
fn translation_is(world: &TranslatorWorld, expected: String) {
    assert_eq!(world.outcome(), Ok(expected));
}

#[then("the store was queried {count} times")]
fn store_queried(world: &TranslatorWorld, count: usize) {
    let borrowed = world.store_reader.borrow();
    let reader = borrowed
        .as_ref()
        .unwrap_or_else(|| panic!("the store reader should be attached"));
    assert_eq!(reader.source().requests().len(), count);
}

#[then("the readers are consulted as {names}")]
fn reader_order(world: &TranslatorWorld, names: StepNames) {
    assert_eq!(world.translator.chain().reader_names(), names.0);
}

#[then("the lookup fails because no readers are attached")]
fn lookup_fails(world: &TranslatorWorld) {
    assert!(matches!(
        world.outcome(),
        Err(I18nError::NoReadersAttached { .. })
    ));
}

#[scenario(path = "tests/features/translator.feature", index = 0)]
fn scenario_fallback_merge(world: TranslatorWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/translator.feature", index = 1)]
fn scenario_missing_key(world: TranslatorWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/translator.feature", index = 2)]
fn scenario_first_reader_wins(world: TranslatorWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/translator.feature", index = 3)]
fn scenario_empty_chain(world: TranslatorWorld) {
    let _ = world;
}
