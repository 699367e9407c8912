//! Caller-facing translation facade.
//!
//! A [`Translator`] owns a reader chain, a table cache, and the default
//! locale. Lookups never fail in [`Translator::get`]: when a key has no
//! translation, or resolution itself fails, the key is returned unchanged.
//! [`Translator::try_get`] exposes resolution failures for callers that want
//! to see them.

use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, warn};
use serde::Deserialize;

use super::{I18nError, LocaleId, Placement, Reader, ReaderChain, TableCache, TranslationTable};

/// Locale used when no default has been configured.
pub const FALLBACK_LOCALE: &str = "en-us";

/// Behaviour of a translator whose chain has no readers.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmptyChainPolicy {
    /// Report [`I18nError::NoReadersAttached`] from fallible lookups.
    #[default]
    Error,
    /// Treat the empty chain as an empty table and return keys unchanged.
    Passthrough,
}

/// Translation facade wiring the reader chain, the cache, and the default
/// locale together.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use phrasebook_common::i18n::{
///     LocaleId, MemorySource, Placement, SourceReader, TranslationTable, Translator,
/// };
///
/// let source = MemorySource::new().with_table(
///     "i18n",
///     LocaleId::parse("es").expect("locale should parse"),
///     TranslationTable::from_iter([("Hello, world", "Hola, mundo")]),
/// );
/// let translator = Translator::default();
/// translator.attach_reader(Arc::new(SourceReader::new(source)), Placement::First);
///
/// assert_eq!(translator.get("Hello, world", Some("es_ES")), "Hola, mundo");
/// assert_eq!(translator.get("Goodbye", Some("es")), "Goodbye");
/// ```
#[derive(Debug)]
pub struct Translator {
    default_locale: RwLock<LocaleId>,
    chain: ReaderChain,
    cache: TableCache,
    empty_chain: EmptyChainPolicy,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(LocaleId::from_normalised(FALLBACK_LOCALE))
    }
}

impl Translator {
    /// Create a translator with `default_locale` and no readers.
    #[must_use]
    pub fn new(default_locale: LocaleId) -> Self {
        Self {
            default_locale: RwLock::new(default_locale),
            chain: ReaderChain::new(),
            cache: TableCache::new(),
            empty_chain: EmptyChainPolicy::default(),
        }
    }

    /// Choose how lookups behave while no reader is attached.
    #[must_use]
    pub fn with_empty_chain_policy(mut self, policy: EmptyChainPolicy) -> Self {
        self.empty_chain = policy;
        self
    }

    /// Translate `key` into `locale`, or the default locale when `None`.
    ///
    /// Returns `key` unchanged when no translation exists. Resolution
    /// failures, including an invalid `locale`, are logged and also yield
    /// `key`.
    #[must_use]
    pub fn get(&self, key: &str, locale: Option<&str>) -> String {
        match self.try_get(key, locale) {
            Ok(translated) => translated,
            Err(error) => {
                warn!(
                    target: "phrasebook::translator",
                    "returning `{key}` untranslated: {error}",
                );
                key.to_owned()
            }
        }
    }

    /// Translate `key`, reporting resolution failures.
    ///
    /// A missing key is still not an error: the key comes back unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::InvalidLocale`] for a blank or malformed
    /// `locale`, [`I18nError::NoReadersAttached`] when the chain is empty and
    /// the policy is [`EmptyChainPolicy::Error`], and [`I18nError::Source`]
    /// when a reader reports a store failure.
    pub fn try_get(&self, key: &str, locale: Option<&str>) -> Result<String, I18nError> {
        let effective = self.effective_locale(locale)?;
        let table = self.table(&effective)?;
        Ok(table.get_or(key, key).to_owned())
    }

    /// Return the resolved table for `locale`, resolving it on first use.
    ///
    /// # Errors
    ///
    /// See [`Self::try_get`].
    pub fn table(&self, locale: &LocaleId) -> Result<Arc<TranslationTable>, I18nError> {
        match self
            .cache
            .get_or_resolve(locale, |requested| self.chain.resolve(requested))
        {
            Err(I18nError::NoReadersAttached { .. })
                if self.empty_chain == EmptyChainPolicy::Passthrough =>
            {
                Ok(Arc::default())
            }
            outcome => outcome,
        }
    }

    fn effective_locale(&self, locale: Option<&str>) -> Result<LocaleId, I18nError> {
        locale.map_or_else(|| Ok(self.default_locale()), LocaleId::parse)
    }

    /// The current default locale.
    #[must_use]
    pub fn default_locale(&self) -> LocaleId {
        self.default_locale
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Normalise and store a new default locale, returning the stored value.
    ///
    /// Cached tables are left alone: they are keyed by locale, not by which
    /// locale is the default.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::InvalidLocale`] when `locale` is blank or
    /// malformed; the previous default is kept.
    pub fn set_default_locale(&self, locale: &str) -> Result<LocaleId, I18nError> {
        let parsed = LocaleId::parse(locale)?;
        *self
            .default_locale
            .write()
            .unwrap_or_else(PoisonError::into_inner) = parsed.clone();
        debug!(
            target: "phrasebook::translator",
            "default locale set to `{parsed}`",
        );
        Ok(parsed)
    }

    /// Attach `reader` to the chain. See [`ReaderChain::attach`].
    pub fn attach_reader(&self, reader: Arc<dyn Reader>, placement: Placement) {
        self.chain.attach(reader, placement);
    }

    /// Detach `reader` by identity. See [`ReaderChain::detach`].
    pub fn detach_reader<R>(&self, reader: &Arc<R>) -> bool
    where
        R: Reader + ?Sized,
    {
        self.chain.detach(reader)
    }

    /// The reader chain consulted on cache misses.
    #[must_use]
    pub fn chain(&self) -> &ReaderChain {
        &self.chain
    }

    /// The table cache.
    #[must_use]
    pub fn cache(&self) -> &TableCache {
        &self.cache
    }

    /// Forget every resolved table, e.g. after changing the chain.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
#[path = "translator_tests.rs"]
mod tests;
