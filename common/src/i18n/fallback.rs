//! Locale fallback sequencing.
//!
//! A locale such as `zh-cn-guangdong` degrades to `zh-cn` and then `zh` by
//! dropping trailing segments. Source readers walk this sequence from the most
//! specific candidate to the least specific one.

use std::iter::FusedIterator;

use super::locale::SEGMENT_SEPARATOR;
use super::{I18nError, LocaleId};

/// Lazy, finite sequence of progressively less specific locales.
///
/// The sequence borrows the originating [`LocaleId`] and yields owned
/// candidates. Cloning it restarts from the current position without affecting
/// the original.
#[derive(Clone, Debug)]
pub struct FallbackSequence<'a> {
    remaining: Option<&'a str>,
}

impl Iterator for FallbackSequence<'_> {
    type Item = LocaleId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.remaining?;
        self.remaining = current
            .rsplit_once(SEGMENT_SEPARATOR)
            .map(|(parent, _)| parent);
        Some(LocaleId::from_normalised(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self
            .remaining
            .map_or(0, |rest| rest.matches(SEGMENT_SEPARATOR).count() + 1);
        (len, Some(len))
    }
}

impl ExactSizeIterator for FallbackSequence<'_> {}

impl FusedIterator for FallbackSequence<'_> {}

/// Produce the fallback candidates for `locale`, most specific first.
///
/// # Examples
///
/// ```
/// use phrasebook_common::i18n::{LocaleId, fallback_sequence};
///
/// let locale = LocaleId::parse("zh-cn-guangdong").expect("locale should parse");
/// let candidates: Vec<String> = fallback_sequence(&locale).map(String::from).collect();
/// assert_eq!(candidates, ["zh-cn-guangdong", "zh-cn", "zh"]);
/// ```
#[must_use]
pub fn fallback_sequence(locale: &LocaleId) -> FallbackSequence<'_> {
    FallbackSequence {
        remaining: Some(locale.as_str()),
    }
}

/// Normalise `raw` and collect its fallback candidates.
///
/// # Errors
///
/// Returns [`I18nError::InvalidLocale`] for blank input, which has no
/// meaningful candidates.
pub fn fallback_sequence_for(raw: &str) -> Result<Vec<LocaleId>, I18nError> {
    let locale = LocaleId::parse(raw)?;
    Ok(fallback_sequence(&locale).collect())
}
