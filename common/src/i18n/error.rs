//! Error types shared by the translation pipeline.
//!
//! A missing message is never an error: lookups fall back to the original key.
//! The variants here cover the cases a caller can act on, namely an unusable
//! locale string, a chain with nothing attached, and backing stores that fail
//! while a source reader is configured to propagate failures.

use thiserror::Error;

/// Error raised when the translation pipeline cannot satisfy a caller request.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum I18nError {
    /// The locale string was empty after normalisation or is not a valid tag.
    #[error("invalid locale `{input}`")]
    InvalidLocale {
        /// Locale string as supplied by the caller.
        input: String,
    },

    /// Resolution was attempted against a chain without any readers.
    #[error("no readers attached; cannot resolve locale `{locale}`")]
    NoReadersAttached {
        /// Locale that was being resolved.
        locale: String,
    },

    /// A reader configured to propagate failures could not load its data.
    #[error("reader `{reader}` failed for locale `{locale}`: {source}")]
    Source {
        /// Name of the failing reader.
        reader: String,
        /// Locale that was being resolved.
        locale: String,
        /// The failure reported by the backing store.
        #[source]
        source: SourceError,
    },
}

impl I18nError {
    pub(crate) fn invalid_locale(input: &str) -> Self {
        Self::InvalidLocale {
            input: input.to_owned(),
        }
    }
}

/// Failure reported by a backing store while fetching raw tables.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    /// A translation file exists but could not be read.
    #[error("failed to read {path}: {message}")]
    Io {
        /// Path of the unreadable file.
        path: String,
        /// Description of the I/O failure.
        message: String,
    },

    /// A translation file could not be parsed.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// Path of the malformed file.
        path: String,
        /// Description reported by the parser.
        message: String,
    },

    /// A translation entry held something other than a string.
    #[error("translation `{key}` in {path} must be a string, found {kind}")]
    InvalidValue {
        /// Path of the document holding the entry.
        path: String,
        /// Dotted key of the offending entry.
        key: String,
        /// Type name of the value that was found.
        kind: &'static str,
    },

    /// Two entries flattened to the same dotted key, for example a quoted
    /// `"menu.open"` and `open` inside `[menu]`.
    #[error("translation `{key}` is defined twice in {path}")]
    DuplicateKey {
        /// Path of the document holding the entries.
        path: String,
        /// The dotted key defined more than once.
        key: String,
    },

    /// Catch-all for custom backends that cannot serve a request.
    #[error("source unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },
}

impl SourceError {
    /// Record the document a parse or content failure came from.
    ///
    /// Failures that are not tied to a document are returned unchanged.
    #[must_use]
    pub fn at_path(self, path: &str) -> Self {
        let path = path.to_owned();
        match self {
            Self::Parse { message, .. } => Self::Parse { path, message },
            Self::InvalidValue { key, kind, .. } => Self::InvalidValue { path, key, kind },
            Self::DuplicateKey { key, .. } => Self::DuplicateKey { path, key },
            other => other,
        }
    }
}
