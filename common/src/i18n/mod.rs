//! Translation lookup over a prioritised chain of readers.
//!
//! A [`Translator`] turns a message key and a locale into translated text. On
//! the first lookup for a locale it asks its [`ReaderChain`] for a table:
//! readers are consulted front to back and the first non-empty table wins.
//! [`SourceReader`] builds its table by walking the locale's
//! [`fallback_sequence`] (`zh-cn-guangdong`, `zh-cn`, `zh`) over a
//! [`MessageSource`], keeping more specific entries over general ones. The
//! result is cached per locale in a [`TableCache`].
//!
//! Missing keys are never errors: they come back unchanged.

mod cache;
mod chain;
mod directory;
mod error;
mod fallback;
mod locale;
mod reader;
mod selection;
mod source;
mod table;
pub mod testing;
mod translator;

pub use cache::TableCache;
pub use chain::{Placement, ReaderChain};
pub use directory::{DirectorySource, TRANSLATION_EXTENSION};
pub use error::{I18nError, SourceError};
pub use fallback::{FallbackSequence, fallback_sequence, fallback_sequence_for};
pub use locale::{LocaleId, SEGMENT_SEPARATOR};
pub use reader::{DEFAULT_NAMESPACE, DefaultReader, Reader, SourceErrorPolicy, SourceReader};
pub use selection::{LocaleSelection, LocaleSource, normalise_locale, resolve_default_locale};
pub use source::{MemorySource, MessageSource};
pub use table::TranslationTable;
pub use translator::{EmptyChainPolicy, FALLBACK_LOCALE, Translator};

#[cfg(test)]
mod tests;
