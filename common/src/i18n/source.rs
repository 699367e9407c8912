//! Backing stores that supply raw translation tables.
//!
//! A [`MessageSource`] answers a single question: which tables exist for this
//! namespace and this exact locale? It never walks fallbacks itself; that is
//! the job of [`SourceReader`](super::SourceReader).

use std::collections::HashMap;

use super::{LocaleId, SourceError, TranslationTable};

/// Capability implemented by stores that hold translation tables.
///
/// Implementations return one outcome per table stored for the exact `locale`
/// in `namespace`, ordered from lowest to highest priority. An empty vector
/// means the store has nothing for that locale.
///
/// A table the store holds but cannot deliver is reported as an `Err` in its
/// slot, so one broken file does not hide its siblings. Whether the failure
/// aborts the lookup is up to the reader.
#[cfg_attr(test, mockall::automock)]
pub trait MessageSource {
    /// Fetch the tables stored for `locale` under `namespace`.
    fn fetch(
        &self,
        namespace: &str,
        locale: &LocaleId,
    ) -> Vec<Result<TranslationTable, SourceError>>;
}

/// In-memory store keyed by namespace and locale.
///
/// Useful for embedding translations in a binary and for tests.
///
/// # Examples
///
/// ```
/// use phrasebook_common::i18n::{LocaleId, MemorySource, MessageSource, TranslationTable};
///
/// let locale = LocaleId::parse("es").expect("locale should parse");
/// let source = MemorySource::new().with_table(
///     "i18n",
///     locale.clone(),
///     TranslationTable::from_iter([("Hello", "Hola")]),
/// );
///
/// let tables = source.fetch("i18n", &locale);
/// assert_eq!(tables[0].as_ref().map(|table| table.get("Hello")), Ok(Some("Hola")));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    tables: HashMap<(String, LocaleId), Vec<TranslationTable>>,
}

impl MemorySource {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `table` for `locale` in `namespace`, after any existing tables.
    pub fn insert(&mut self, namespace: impl Into<String>, locale: LocaleId, table: TranslationTable) {
        self.tables
            .entry((namespace.into(), locale))
            .or_default()
            .push(table);
    }

    /// Builder form of [`Self::insert`].
    #[must_use]
    pub fn with_table(
        mut self,
        namespace: impl Into<String>,
        locale: LocaleId,
        table: TranslationTable,
    ) -> Self {
        self.insert(namespace, locale, table);
        self
    }
}

impl MessageSource for MemorySource {
    fn fetch(
        &self,
        namespace: &str,
        locale: &LocaleId,
    ) -> Vec<Result<TranslationTable, SourceError>> {
        self.tables
            .get(&(namespace.to_owned(), locale.clone()))
            .map(|tables| tables.iter().cloned().map(Ok).collect())
            .unwrap_or_default()
    }
}
