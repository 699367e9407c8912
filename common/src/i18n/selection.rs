//! Default-locale selection with provenance.

use std::fmt;

use log::{debug, warn};

use super::{FALLBACK_LOCALE, LocaleId};

/// Source for a resolved default locale.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LocaleSource {
    /// Locale supplied explicitly by the caller.
    ExplicitArgument,
    /// Locale taken from the translator configuration file.
    Configuration,
    /// Built-in fallback locale.
    Fallback,
}

impl fmt::Display for LocaleSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExplicitArgument => formatter.write_str("explicit locale override"),
            Self::Configuration => formatter.write_str("configuration locale"),
            Self::Fallback => formatter.write_str("fallback locale"),
        }
    }
}

/// Outcome of default-locale resolution including its provenance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocaleSelection {
    locale: LocaleId,
    source: LocaleSource,
    requested: Option<String>,
}

impl LocaleSelection {
    /// Returns the effective locale source.
    #[must_use]
    pub const fn source(&self) -> LocaleSource {
        self.source
    }

    /// Returns the raw value supplied by the winning source, if any.
    #[must_use]
    pub fn requested(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    /// Returns the resolved locale.
    #[must_use]
    pub fn locale(&self) -> &LocaleId {
        &self.locale
    }

    /// Whether the built-in fallback was used.
    #[must_use]
    pub fn used_fallback(&self) -> bool {
        self.source == LocaleSource::Fallback
    }

    /// Consumes the selection, yielding the locale.
    #[must_use]
    pub fn into_locale(self) -> LocaleId {
        self.locale
    }

    /// Emit a debug log summarising the resolved locale.
    pub fn log_outcome(&self, target: &str) {
        debug!(
            target: target,
            "resolved {} to `{}`",
            self.source(),
            self.locale(),
        );
    }
}

fn try_resolve_candidate(source: LocaleSource, raw: Option<&str>) -> Option<LocaleSelection> {
    let candidate = normalise_locale(raw)?;

    match LocaleId::parse(candidate) {
        Ok(locale) => Some(LocaleSelection {
            locale,
            source,
            requested: Some(candidate.to_owned()),
        }),
        Err(error) => {
            warn!(
                target: "phrasebook::selection",
                "ignoring {source} `{candidate}`: {error}",
            );
            None
        }
    }
}

/// Resolve the default locale from an explicit override and configuration.
///
/// Candidates are considered in order:
///
/// 1. The explicit locale supplied by the caller.
/// 2. The configured locale.
/// 3. [`FALLBACK_LOCALE`] when neither candidate is usable.
#[must_use]
pub fn resolve_default_locale(
    explicit: Option<&str>,
    configuration: Option<&str>,
) -> LocaleSelection {
    let candidates = [
        (LocaleSource::ExplicitArgument, explicit),
        (LocaleSource::Configuration, configuration),
    ];

    candidates
        .into_iter()
        .find_map(|(source, raw)| try_resolve_candidate(source, raw))
        .unwrap_or_else(|| LocaleSelection {
            locale: LocaleId::from_normalised(FALLBACK_LOCALE),
            source: LocaleSource::Fallback,
            requested: None,
        })
}

/// Trim whitespace and discard empty locale candidates.
#[must_use]
pub fn normalise_locale(input: Option<&str>) -> Option<&str> {
    input
        .map(str::trim)
        .and_then(|value| if value.is_empty() { None } else { Some(value) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, LocaleSource::Fallback, "en-us", true)]
    #[case(Some("cy"), None, LocaleSource::ExplicitArgument, "cy", false)]
    #[case(None, Some("pt_BR"), LocaleSource::Configuration, "pt-br", false)]
    #[case(Some("  "), Some("gd"), LocaleSource::Configuration, "gd", false)]
    #[case(Some("../x"), Some("en/gb"), LocaleSource::Fallback, "en-us", true)]
    fn resolves_sources(
        #[case] explicit: Option<&str>,
        #[case] configuration: Option<&str>,
        #[case] expected_source: LocaleSource,
        #[case] expected_locale: &str,
        #[case] expected_fallback: bool,
    ) {
        let selection = resolve_default_locale(explicit, configuration);

        assert_eq!(selection.source(), expected_source);
        assert_eq!(selection.locale().as_str(), expected_locale);
        assert_eq!(selection.used_fallback(), expected_fallback);
    }

    #[test]
    fn records_the_requested_value() {
        let selection = resolve_default_locale(Some(" en_GB "), None);

        assert_eq!(selection.requested(), Some("en_GB"));
        assert_eq!(selection.into_locale().as_str(), "en-gb");
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("  "), None)]
    #[case(Some("cy"), Some("cy"))]
    #[case(Some(" cy "), Some("cy"))]
    fn normalises_candidates(#[case] input: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(normalise_locale(input), expected);
    }
}
