//! Ordered reader chain and first-match resolution.
//!
//! Readers sit in priority order. Resolution asks each in turn and the first
//! one that returns a non-empty table wins; nothing after it is consulted.
//! Merging across fallback locales happens inside a reader, never across
//! readers.
//!
//! The list is copy-on-write: attach and detach swap in a new vector, while
//! resolution iterates over a snapshot and never holds the lock.

use std::ptr;
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;
use serde::Deserialize;

use super::{I18nError, LocaleId, Reader, TranslationTable};

/// Where [`ReaderChain::attach`] inserts a reader.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Highest priority: consulted before every attached reader.
    #[default]
    First,
    /// Lowest priority: consulted after every attached reader.
    Last,
}

impl From<bool> for Placement {
    /// Map the historical `first` flag onto a placement.
    fn from(first: bool) -> Self {
        if first { Self::First } else { Self::Last }
    }
}

type Readers = Arc<Vec<Arc<dyn Reader>>>;

/// Ordered collection of readers consulted front to back.
#[derive(Debug, Default)]
pub struct ReaderChain {
    readers: RwLock<Readers>,
}

impl ReaderChain {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `reader` at the front or the back of the chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use phrasebook_common::i18n::{DefaultReader, Placement, ReaderChain};
    ///
    /// let chain = ReaderChain::new();
    /// chain.attach(Arc::new(DefaultReader::new()), Placement::Last);
    /// assert_eq!(chain.reader_names(), ["default"]);
    /// ```
    pub fn attach(&self, reader: Arc<dyn Reader>, placement: Placement) {
        let mut guard = self.readers.write().unwrap_or_else(PoisonError::into_inner);
        let readers = Arc::make_mut(&mut guard);
        match placement {
            Placement::First => readers.insert(0, reader),
            Placement::Last => readers.push(reader),
        }
    }

    /// Remove the first entry that is the very same reader as `reader`.
    ///
    /// Comparison is by identity, so a distinct reader with identical
    /// contents stays attached. Returns whether a reader was removed.
    pub fn detach<R>(&self, reader: &Arc<R>) -> bool
    where
        R: Reader + ?Sized,
    {
        let mut guard = self.readers.write().unwrap_or_else(PoisonError::into_inner);
        let Some(index) = guard
            .iter()
            .position(|candidate| ptr::addr_eq(Arc::as_ptr(candidate), Arc::as_ptr(reader)))
        else {
            return false;
        };

        Arc::make_mut(&mut guard).remove(index);
        true
    }

    /// Number of attached readers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Whether the chain has no readers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Reader names in resolution order.
    #[must_use]
    pub fn reader_names(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|reader| reader.name().to_owned())
            .collect()
    }

    fn snapshot(&self) -> Readers {
        Arc::clone(&self.readers.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Resolve `locale` to the table of the first reader with translations.
    ///
    /// When every reader comes back empty the result is an empty table, so a
    /// caller falls back to untranslated keys.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::NoReadersAttached`] for an empty chain and
    /// [`I18nError::Source`] when a reader reports a store failure.
    pub fn resolve(&self, locale: &LocaleId) -> Result<TranslationTable, I18nError> {
        let readers = self.snapshot();
        if readers.is_empty() {
            return Err(I18nError::NoReadersAttached {
                locale: locale.to_string(),
            });
        }

        for reader in readers.iter() {
            let loaded = reader
                .try_load(locale)
                .map_err(|source| I18nError::Source {
                    reader: reader.name().to_owned(),
                    locale: locale.to_string(),
                    source,
                })?;

            if let Some(table) = loaded.filter(|table| !table.is_empty()) {
                debug!(
                    target: "phrasebook::chain",
                    "reader `{}` resolved `{locale}` with {} entries",
                    reader.name(),
                    table.len(),
                );
                return Ok(table);
            }
        }

        debug!(
            target: "phrasebook::chain",
            "no reader had translations for `{locale}`",
        );
        Ok(TranslationTable::new())
    }
}

#[cfg(test)]
#[path = "chain_tests.rs"]
mod tests;
