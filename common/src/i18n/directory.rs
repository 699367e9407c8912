//! Filesystem-backed translation store.
//!
//! Translations live in TOML files laid out by locale segment beneath each
//! search root: `zh-cn` in namespace `i18n` is read from `<root>/i18n/zh/cn.toml`
//! and `zh` from `<root>/i18n/zh.toml`. Roots are consulted in order and later
//! roots take precedence, so an application root listed after a vendored one
//! can override individual messages.

use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;

use super::{LocaleId, MessageSource, SourceError, TranslationTable};

/// File extension used for translation documents.
pub const TRANSLATION_EXTENSION: &str = "toml";

/// Cascading directory store reading TOML translation files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectorySource {
    roots: Vec<Utf8PathBuf>,
}

impl DirectorySource {
    /// Create a store over `roots`, lowest priority first.
    ///
    /// # Examples
    ///
    /// ```
    /// use phrasebook_common::i18n::{DirectorySource, LocaleId};
    ///
    /// let source = DirectorySource::new(["vendor/locales", "locales"]);
    /// let locale = LocaleId::parse("zh-cn").expect("locale should parse");
    /// let candidates = source.candidate_paths("i18n", &locale);
    /// assert_eq!(candidates[1].as_str(), "locales/i18n/zh/cn.toml");
    /// ```
    #[must_use]
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a root with higher priority than every existing root.
    pub fn push_root(&mut self, root: impl Into<Utf8PathBuf>) {
        self.roots.push(root.into());
    }

    /// The configured search roots, lowest priority first.
    #[must_use]
    pub fn roots(&self) -> &[Utf8PathBuf] {
        &self.roots
    }

    /// Paths consulted for `locale` in `namespace`, one per root.
    #[must_use]
    pub fn candidate_paths(&self, namespace: &str, locale: &LocaleId) -> Vec<Utf8PathBuf> {
        let relative = relative_path(namespace, locale);
        self.roots.iter().map(|root| root.join(&relative)).collect()
    }
}

fn relative_path(namespace: &str, locale: &LocaleId) -> Utf8PathBuf {
    let mut relative = Utf8PathBuf::from(namespace.trim_matches('/'));
    for segment in locale.segments() {
        relative.push(segment);
    }
    relative.set_extension(TRANSLATION_EXTENSION);
    relative
}

fn read_table(path: &Utf8Path) -> Result<Option<TranslationTable>, SourceError> {
    let document = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(error) => {
            return Err(SourceError::Io {
                path: path.to_string(),
                message: error.to_string(),
            });
        }
    };

    TranslationTable::from_toml_str(&document)
        .map(Some)
        .map_err(|error| error.at_path(path.as_str()))
}

impl MessageSource for DirectorySource {
    fn fetch(
        &self,
        namespace: &str,
        locale: &LocaleId,
    ) -> Vec<Result<TranslationTable, SourceError>> {
        self.candidate_paths(namespace, locale)
            .iter()
            .filter_map(|path| {
                let loaded = read_table(path).transpose()?;
                if let Ok(table) = &loaded {
                    debug!(
                        target: "phrasebook::source",
                        "loaded {} translations from {path}",
                        table.len(),
                    );
                }
                Some(loaded)
            })
            .collect()
    }
}
