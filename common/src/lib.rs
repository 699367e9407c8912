//! Core translation machinery for phrasebook: locale identifiers, fallback
//! sequencing, readers, the reader chain, the table cache, and the
//! [`Translator`](i18n::Translator) facade.

pub mod i18n;

pub use i18n::{
    DefaultReader, DirectorySource, EmptyChainPolicy, FALLBACK_LOCALE, I18nError, LocaleId,
    LocaleSelection, LocaleSource, MemorySource, MessageSource, Placement, Reader, ReaderChain,
    SourceError, SourceErrorPolicy, SourceReader, TableCache, TranslationTable, Translator,
    fallback_sequence, normalise_locale, resolve_default_locale,
};
