//! Per-locale memo of resolved translation tables.
//!
//! Entries are created on first use and live until explicitly cleared. The map
//! is sharded, so lookups from many threads do not contend on a single lock.
//! Two callers racing on the same uncached locale may both resolve it; the
//! last write wins and both values are equal.

use std::sync::Arc;

use dashmap::DashMap;
use log::debug;

use super::{I18nError, LocaleId, TranslationTable};

/// Concurrent cache from locale to resolved table.
#[derive(Debug, Default)]
pub struct TableCache {
    tables: DashMap<LocaleId, Arc<TranslationTable>>,
}

impl TableCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `locale`, if any.
    #[must_use]
    pub fn get(&self, locale: &LocaleId) -> Option<Arc<TranslationTable>> {
        self.tables.get(locale).map(|entry| Arc::clone(entry.value()))
    }

    /// Return the cached table for `locale`, resolving and storing it first
    /// when missing.
    ///
    /// `resolve` runs without any shard lock held, so it may take its time or
    /// consult the cache itself.
    ///
    /// # Errors
    ///
    /// Propagates the error from `resolve`; nothing is cached in that case.
    pub fn get_or_resolve<F>(
        &self,
        locale: &LocaleId,
        resolve: F,
    ) -> Result<Arc<TranslationTable>, I18nError>
    where
        F: FnOnce(&LocaleId) -> Result<TranslationTable, I18nError>,
    {
        if let Some(table) = self.get(locale) {
            return Ok(table);
        }

        let table = Arc::new(resolve(locale)?);
        debug!(
            target: "phrasebook::cache",
            "caching {} entries for `{locale}`",
            table.len(),
        );
        self.tables.insert(locale.clone(), Arc::clone(&table));
        Ok(table)
    }

    /// Whether a table for `locale` is cached.
    #[must_use]
    pub fn contains(&self, locale: &LocaleId) -> bool {
        self.tables.contains_key(locale)
    }

    /// Drop the cached table for `locale`. Returns whether one was cached.
    pub fn invalidate(&self, locale: &LocaleId) -> bool {
        self.tables.remove(locale).is_some()
    }

    /// Drop every cached table.
    pub fn clear(&self) {
        self.tables.clear();
    }

    /// Number of cached locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
