//! Normalised locale identifiers.
//!
//! Translation directories, cache keys, and fallback candidates all use the
//! same lowercase, hyphen-separated spelling (`en-us`, `zh-cn-guangdong`), so
//! callers may pass `en_US`, `en US`, or `EN-us` and reach the same data.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use unic_langid::LanguageIdentifier;

use super::I18nError;

/// Separator placed between locale segments after normalisation.
pub const SEGMENT_SEPARATOR: char = '-';

/// A lowercase, hyphen-separated locale identifier such as `en-us`.
///
/// Equality, ordering, and hashing all operate on the normalised string.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocaleId(String);

impl LocaleId {
    /// Normalise `input` into a locale identifier.
    ///
    /// Runs of spaces, underscores, and hyphens collapse into a single hyphen,
    /// leading and trailing separators are dropped, and the result is
    /// lowercased. POSIX encoding and modifier suffixes (`.UTF-8`, `@euro`)
    /// are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::InvalidLocale`] when nothing remains after
    /// normalisation or a segment contains anything but ASCII letters and
    /// digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use phrasebook_common::i18n::LocaleId;
    ///
    /// let locale = LocaleId::parse("en_US").expect("locale should parse");
    /// assert_eq!(locale.as_str(), "en-us");
    /// assert!(LocaleId::parse("  ").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, I18nError> {
        let normalised = normalise(input);
        if normalised.is_empty() || !normalised.chars().all(is_locale_char) {
            return Err(I18nError::invalid_locale(input));
        }

        Ok(Self(normalised))
    }

    /// Wrap a string that is already known to be normalised.
    pub(crate) fn from_normalised(value: &str) -> Self {
        debug_assert_eq!(normalise(value), value);
        Self(value.to_owned())
    }

    /// Return the normalised identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the segments (language, region, variant, ...).
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.0.split(SEGMENT_SEPARATOR)
    }

    /// Number of segments in the identifier.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.0.matches(SEGMENT_SEPARATOR).count() + 1
    }

    /// The leading language segment, e.g. `zh` for `zh-cn-guangdong`.
    #[must_use]
    pub fn language(&self) -> &str {
        self.0
            .split_once(SEGMENT_SEPARATOR)
            .map_or(self.0.as_str(), |(language, _)| language)
    }

    /// Convert into a BCP 47 language identifier for use with other tooling.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::InvalidLocale`] when the identifier is not a valid
    /// BCP 47 tag, which happens for free-form variants such as `guangdong`.
    pub fn to_language_identifier(&self) -> Result<LanguageIdentifier, I18nError> {
        self.0
            .parse::<LanguageIdentifier>()
            .map_err(|_| I18nError::invalid_locale(&self.0))
    }
}

fn is_separator(character: char) -> bool {
    character == '_' || character == SEGMENT_SEPARATOR || character.is_whitespace()
}

fn is_locale_char(character: char) -> bool {
    character.is_ascii_alphanumeric() || character == SEGMENT_SEPARATOR
}

fn normalise(input: &str) -> String {
    let stem = input
        .split(['.', '@'])
        .next()
        .unwrap_or_default();

    stem.split(is_separator)
        .filter(|segment| !segment.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

impl FromStr for LocaleId {
    type Err = I18nError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl AsRef<str> for LocaleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LocaleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<LocaleId> for String {
    fn from(locale: LocaleId) -> Self {
        locale.0
    }
}
