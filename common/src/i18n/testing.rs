//! Test doubles for exercising readers, chains, and translators.
//!
//! Shared by unit tests and the behaviour suites so spies record calls in the
//! same way everywhere.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use super::{LocaleId, MessageSource, Reader, SourceError, TranslationTable};

/// Reader that answers with a fixed table and counts how often it was asked.
#[derive(Debug)]
pub struct CountingReader {
    name: String,
    table: Option<TranslationTable>,
    calls: AtomicUsize,
}

impl CountingReader {
    /// Reader that answers every locale with `table`.
    #[must_use]
    pub fn new(name: impl Into<String>, table: TranslationTable) -> Self {
        Self {
            name: name.into(),
            table: Some(table),
            calls: AtomicUsize::new(0),
        }
    }

    /// Reader that never has translations.
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `try_load` calls received so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Reader for CountingReader {
    fn name(&self) -> &str {
        &self.name
    }

    fn try_load(&self, _locale: &LocaleId) -> Result<Option<TranslationTable>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.table.clone())
    }
}

/// Reader whose backing store is always unavailable.
#[derive(Clone, Debug)]
pub struct FailingReader {
    name: String,
}

impl FailingReader {
    /// Create a failing reader called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Reader for FailingReader {
    fn name(&self) -> &str {
        &self.name
    }

    fn try_load(&self, locale: &LocaleId) -> Result<Option<TranslationTable>, SourceError> {
        Err(SourceError::Unavailable {
            message: format!("`{}` cannot serve `{locale}`", self.name),
        })
    }
}

/// Store wrapper recording every locale it was asked for.
#[derive(Debug, Default)]
pub struct RecordingSource<S> {
    inner: S,
    requests: Mutex<Vec<String>>,
}

impl<S> RecordingSource<S> {
    /// Wrap `inner`, recording each fetch before delegating.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Locales fetched so far, in call order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<S: MessageSource> MessageSource for RecordingSource<S> {
    fn fetch(
        &self,
        namespace: &str,
        locale: &LocaleId,
    ) -> Vec<Result<TranslationTable, SourceError>> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(locale.to_string());
        self.inner.fetch(namespace, locale)
    }
}
