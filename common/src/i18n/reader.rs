//! Readers turn a locale into a translation table.
//!
//! The chain treats every reader alike through [`Reader::try_load`]. Two
//! implementations ship with the crate: [`SourceReader`], which walks the
//! locale fallback sequence over a [`MessageSource`], and [`DefaultReader`],
//! which always answers and so terminates a chain.

use std::fmt;

use log::{debug, warn};
use serde::Deserialize;

use super::{LocaleId, MessageSource, SourceError, TranslationTable, fallback_sequence};

/// Namespace consulted by source readers unless told otherwise.
pub const DEFAULT_NAMESPACE: &str = "i18n";

/// Capability shared by every translation reader.
pub trait Reader: Send + Sync {
    /// Short name used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Load the translation table for `locale`.
    ///
    /// `Ok(None)` means the reader has nothing for the locale. An empty table
    /// is a valid answer as well; the chain only stops on non-empty tables.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] when the reader's backing store fails and the
    /// reader is configured to report that failure.
    fn try_load(&self, locale: &LocaleId) -> Result<Option<TranslationTable>, SourceError>;
}

impl fmt::Debug for dyn Reader {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Reader").field(&self.name()).finish()
    }
}

/// How a [`SourceReader`] reacts when its store fails for one candidate.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceErrorPolicy {
    /// Log the failure and treat the candidate as absent.
    #[default]
    Skip,
    /// Abort the load and report the failure.
    Propagate,
}

/// Reader backed by a [`MessageSource`], merging fallback candidates.
///
/// For `en-us` the reader fetches `en-us` and then `en`. Keys found for a more
/// specific candidate are never replaced by a less specific one, so the
/// resulting table holds `en-us` overrides on top of the `en` base.
#[derive(Debug)]
pub struct SourceReader<S> {
    name: String,
    namespace: String,
    source: S,
    on_error: SourceErrorPolicy,
}

impl<S> SourceReader<S> {
    /// Create a reader over `source` using [`DEFAULT_NAMESPACE`].
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            name: String::from("source"),
            namespace: String::from(DEFAULT_NAMESPACE),
            source,
            on_error: SourceErrorPolicy::default(),
        }
    }

    /// Use `namespace` as the path hint passed to the store.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Rename the reader for logs.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Choose how store failures are handled.
    #[must_use]
    pub fn with_error_policy(mut self, on_error: SourceErrorPolicy) -> Self {
        self.on_error = on_error;
        self
    }

    /// The namespace passed to the store.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The wrapped store.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: MessageSource> SourceReader<S> {
    /// Merge the tables of every fallback candidate for `locale`.
    ///
    /// Returns `Ok(None)` when no candidate produced a table.
    ///
    /// # Errors
    ///
    /// Propagates the first table the store failed to deliver when the policy
    /// is [`SourceErrorPolicy::Propagate`]. Under [`SourceErrorPolicy::Skip`]
    /// only the failing table is dropped; its siblings still merge.
    pub fn load(&self, locale: &LocaleId) -> Result<Option<TranslationTable>, SourceError> {
        let mut merged: Option<TranslationTable> = None;

        for candidate in fallback_sequence(locale) {
            let mut candidate_table: Option<TranslationTable> = None;

            for fetched in self.source.fetch(&self.namespace, &candidate) {
                let table = match fetched {
                    Ok(table) => table,
                    Err(error) if self.on_error == SourceErrorPolicy::Skip => {
                        warn!(
                            target: "phrasebook::reader",
                            "reader `{}` skipped a table for `{candidate}`: {error}",
                            self.name,
                        );
                        continue;
                    }
                    Err(error) => return Err(error),
                };
                candidate_table
                    .get_or_insert_with(TranslationTable::new)
                    .overlay(table);
            }

            let Some(candidate_table) = candidate_table else {
                continue;
            };

            debug!(
                target: "phrasebook::reader",
                "reader `{}` found {} entries for `{candidate}`",
                self.name,
                candidate_table.len(),
            );

            merged
                .get_or_insert_with(TranslationTable::new)
                .fill_missing(candidate_table);
        }

        Ok(merged)
    }
}

impl<S> Reader for SourceReader<S>
where
    S: MessageSource + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn try_load(&self, locale: &LocaleId) -> Result<Option<TranslationTable>, SourceError> {
        self.load(locale)
    }
}

/// Terminal reader that answers every locale.
///
/// Attach it at the end of a chain to guarantee resolution never runs out of
/// readers. It may carry base translations shared by all locales.
#[derive(Clone, Debug, Default)]
pub struct DefaultReader {
    table: TranslationTable,
}

impl DefaultReader {
    /// Create a reader that answers with an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader that answers every locale with `table`.
    #[must_use]
    pub fn with_table(table: TranslationTable) -> Self {
        Self { table }
    }
}

impl Reader for DefaultReader {
    fn name(&self) -> &str {
        "default"
    }

    fn try_load(&self, _locale: &LocaleId) -> Result<Option<TranslationTable>, SourceError> {
        Ok(Some(self.table.clone()))
    }
}
