//! Phrasebook wires the translation machinery from `phrasebook-common` into a
//! configurable [`Translator`](i18n::Translator).
//!
//! Hosts describe their translation directories in a TOML document, load it
//! as a [`TranslatorConfig`], and call [`TranslatorConfig::build`] to obtain a
//! translator with one directory reader per entry.

pub mod config;

pub use config::{ConfigError, DirectoryConfig, TranslatorConfig};
pub use phrasebook_common::i18n;
