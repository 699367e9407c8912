//! Immutable key to translated-value tables.

use std::collections::HashMap;
use std::collections::hash_map::{self, Entry};

use toml::{Table, Value};

use super::SourceError;

/// Path reported for documents that were not read from a file.
const INLINE_DOCUMENT: &str = "<inline>";

/// Mapping from message key to translated value for one resolved locale.
///
/// Tables are built once, by a reader or a source, and handed out as values.
/// The only mutating operations are the two merges used while a table is
/// being assembled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document of string values.
    ///
    /// Nested tables flatten into dotted keys, so `[menu]` with `open = "Open"`
    /// becomes `menu.open`. Quoted keys keep whole sentences usable as keys.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Parse`] for malformed TOML,
    /// [`SourceError::InvalidValue`] when an entry is not a string, and
    /// [`SourceError::DuplicateKey`] when a quoted dotted key collides with a
    /// nested entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use phrasebook_common::i18n::TranslationTable;
    ///
    /// let table = TranslationTable::from_toml_str(
    ///     "\"Hello, world\" = \"Hola, mundo\"\n[menu]\nopen = \"Abrir\"\n",
    /// )
    /// .expect("document should parse");
    /// assert_eq!(table.get("Hello, world"), Some("Hola, mundo"));
    /// assert_eq!(table.get("menu.open"), Some("Abrir"));
    /// ```
    pub fn from_toml_str(document: &str) -> Result<Self, SourceError> {
        let parsed: Table = toml::from_str(document).map_err(|error| SourceError::Parse {
            path: String::from(INLINE_DOCUMENT),
            message: error.to_string(),
        })?;

        let mut table = Self::new();
        flatten_into(&mut table.entries, None, parsed)?;
        Ok(table)
    }

    /// Return the translation for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Return the translation for `key`, or `default` when it is missing.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Whether the table holds a translation for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of translations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no translations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Iterate over the message keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Add the entries of `other` whose keys are not present yet.
    ///
    /// Used when walking from specific to general locales: a key set by
    /// `en-us` survives a later merge of `en`.
    pub fn fill_missing(&mut self, other: Self) {
        for (key, value) in other.entries {
            self.entries.entry(key).or_insert(value);
        }
    }

    /// Add every entry of `other`, replacing existing values.
    ///
    /// Used when several files describe the same locale: later search roots
    /// override earlier ones.
    pub fn overlay(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }
}

fn flatten_into(
    entries: &mut HashMap<String, String>,
    prefix: Option<&str>,
    table: Table,
) -> Result<(), SourceError> {
    for (name, value) in table {
        let key = match prefix {
            Some(parent) => format!("{parent}.{name}"),
            None => name,
        };

        match value {
            Value::String(text) => match entries.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(text);
                }
                Entry::Occupied(taken) => {
                    return Err(SourceError::DuplicateKey {
                        path: String::from(INLINE_DOCUMENT),
                        key: taken.key().clone(),
                    });
                }
            },
            Value::Table(nested) => flatten_into(entries, Some(&key), nested)?,
            other => {
                return Err(SourceError::InvalidValue {
                    path: String::from(INLINE_DOCUMENT),
                    key,
                    kind: other.type_str(),
                });
            }
        }
    }

    Ok(())
}

impl<K, V> FromIterator<(K, V)> for TranslationTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for TranslationTable {
    type Item = (String, String);
    type IntoIter = hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
