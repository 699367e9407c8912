//! Translator configuration and composition root.
//!
//! A host describes its translation directories in TOML and turns the result
//! into a ready [`Translator`] with [`TranslatorConfig::build`]. Each
//! `[[directories]]` entry becomes one source reader; readers are attached in
//! file order honouring their placement, and a terminal default reader is
//! appended unless disabled.
//!
//! ```toml
//! default_locale = "en-gb"
//! empty_chain = "error"
//!
//! [[directories]]
//! namespace = "i18n"
//! roots = ["vendor/locales", "locales"]
//! placement = "first"
//! on_source_error = "skip"
//! ```

use std::fs;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use phrasebook_common::i18n::{
    DEFAULT_NAMESPACE, DefaultReader, DirectorySource, EmptyChainPolicy, LocaleSelection,
    Placement, SourceErrorPolicy, SourceReader, Translator, normalise_locale,
    resolve_default_locale,
};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration at {path}")]
    Io {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or has unknown fields.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level translator configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TranslatorConfig {
    /// Locale used when a lookup does not name one.
    ///
    /// Blank values are treated as absent and malformed values are skipped
    /// with a warning, so the translator falls back to `en-us`.
    pub default_locale: Option<String>,
    /// What lookups do while no reader is attached.
    pub empty_chain: EmptyChainPolicy,
    /// Append a terminal reader so resolution always produces a table.
    pub terminal_reader: bool,
    /// Translation directories, one source reader each.
    pub directories: Vec<DirectoryConfig>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            default_locale: None,
            empty_chain: EmptyChainPolicy::default(),
            terminal_reader: true,
            directories: Vec::new(),
        }
    }
}

impl TranslatorConfig {
    /// Parse a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown fields.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it cannot be parsed.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Parse the `[section]` table of a host application's configuration.
    ///
    /// Hosts can keep translator settings beside their own instead of in a
    /// separate file. A missing section yields the defaults; other top-level
    /// tables belong to the host and are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document is malformed or the
    /// section is not a valid translator configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use phrasebook::TranslatorConfig;
    ///
    /// let host = "[server]\nport = 8080\n\n[phrasebook]\ndefault_locale = \"fr\"\n";
    /// let config = TranslatorConfig::from_host_document(host, "phrasebook")
    ///     .expect("section should parse");
    /// assert_eq!(config.default_locale(), Some("fr"));
    /// ```
    pub fn from_host_document(document: &str, section: &str) -> Result<Self, ConfigError> {
        let mut host: toml::Table = toml::from_str(document)?;
        match host.remove(section) {
            Some(value) => Ok(value.try_into()?),
            None => Ok(Self::default()),
        }
    }

    /// Returns the configured default locale, if present.
    ///
    /// Whitespace-only values are treated as absent.
    #[must_use]
    pub fn default_locale(&self) -> Option<&str> {
        normalise_locale(self.default_locale.as_deref())
    }

    /// Resolve the default locale, preferring `explicit` over configuration.
    #[must_use]
    pub fn locale_selection(&self, explicit: Option<&str>) -> LocaleSelection {
        resolve_default_locale(explicit, self.default_locale())
    }

    /// Build a translator, resolving relative roots against `base`.
    ///
    /// # Examples
    ///
    /// ```
    /// use phrasebook::TranslatorConfig;
    ///
    /// let config = TranslatorConfig::from_toml_str("default_locale = \"en_GB\"\n")
    ///     .expect("configuration should parse");
    /// let translator = config.build(None);
    /// assert_eq!(translator.default_locale().as_str(), "en-gb");
    /// assert_eq!(translator.get("Hello", None), "Hello");
    /// ```
    #[must_use]
    pub fn build(&self, base: Option<&Utf8Path>) -> Translator {
        self.build_with(None, base)
    }

    /// Build a translator whose default locale is `explicit` when usable.
    #[must_use]
    pub fn build_with(&self, explicit: Option<&str>, base: Option<&Utf8Path>) -> Translator {
        let selection = self.locale_selection(explicit);
        selection.log_outcome("phrasebook::config");

        let translator =
            Translator::new(selection.into_locale()).with_empty_chain_policy(self.empty_chain);

        for directory in &self.directories {
            let reader = directory.reader(base);
            debug!(
                target: "phrasebook::config",
                "attaching `{}` ({:?}) over {} roots",
                directory.reader_name(),
                directory.placement,
                reader.source().roots().len(),
            );
            translator.attach_reader(Arc::new(reader), directory.placement);
        }

        if self.terminal_reader {
            translator.attach_reader(Arc::new(DefaultReader::new()), Placement::Last);
        }

        translator
    }
}

/// One translation directory tree served by a source reader.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DirectoryConfig {
    /// Reader name used in logs; derived from the namespace when omitted.
    pub name: Option<String>,
    /// Subdirectory beneath each root holding the locale files.
    pub namespace: String,
    /// Search roots, lowest priority first.
    pub roots: Vec<Utf8PathBuf>,
    /// Where the reader joins the chain.
    pub placement: Placement,
    /// How unreadable or malformed files are handled.
    pub on_source_error: SourceErrorPolicy,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            name: None,
            namespace: String::from(DEFAULT_NAMESPACE),
            roots: Vec::new(),
            placement: Placement::default(),
            on_source_error: SourceErrorPolicy::default(),
        }
    }
}

impl DirectoryConfig {
    /// The name given to this directory's reader.
    #[must_use]
    pub fn reader_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("directory:{}", self.namespace))
    }

    /// Roots with relative entries joined onto `base`.
    #[must_use]
    pub fn resolved_roots(&self, base: Option<&Utf8Path>) -> Vec<Utf8PathBuf> {
        self.roots
            .iter()
            .map(|root| match base {
                Some(prefix) if root.is_relative() => prefix.join(root),
                _ => root.clone(),
            })
            .collect()
    }

    /// Construct the source reader described by this entry.
    #[must_use]
    pub fn reader(&self, base: Option<&Utf8Path>) -> SourceReader<DirectorySource> {
        SourceReader::new(DirectorySource::new(self.resolved_roots(base)))
            .with_name(self.reader_name())
            .with_namespace(self.namespace.clone())
            .with_error_policy(self.on_source_error)
    }
}
