#![forbid(unsafe_code)]

mod config;
mod error;
mod index;
mod loader;
mod locate;
mod registry;
mod resolver;
#[cfg(test)]
mod testing;

pub use crate::config::{RuntimeConfig, load_config, load_config_or_default};
pub use crate::error::{RuntimeError, RuntimeResult};
pub use crate::index::{LanguageEntry, LanguageStats, MAX_INDEX_VERSION, TranslationIndex};
pub use crate::loader::{
    load_catalog, load_catalog_file, load_catalog_for_languages, load_index, parse_sha1,
    verify_checksum,
};
pub use crate::locate::{
    DEFAULT_DELIMITERS, DEFAULT_SUFFIX, find_catalog_file, find_catalog_for_languages,
};
pub use crate::registry::{Language, Translations};
pub use crate::resolver::DirectoryResolver;
