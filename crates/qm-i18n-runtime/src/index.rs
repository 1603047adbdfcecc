use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{RuntimeError, RuntimeResult};

pub const MAX_INDEX_VERSION: u32 = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationIndex {
    pub file_type: String,
    pub version: u32,
    pub languages: BTreeMap<String, LanguageEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    #[serde(default)]
    pub translated: u32,
    #[serde(default)]
    pub untranslated: u32,
    #[serde(default)]
    pub fuzzy: u32,
    pub file: String,
    pub sha1: String,
    pub size: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LanguageStats {
    pub translated: u32,
    pub untranslated: u32,
    pub fuzzy: u32,
}

impl TranslationIndex {
    pub fn from_json(contents: &str, expected_file_type: &str) -> RuntimeResult<Self> {
        let index: Self = serde_json::from_str(contents)?;
        index.validate(expected_file_type)?;
        Ok(index)
    }

    pub fn validate(&self, expected_file_type: &str) -> RuntimeResult<()> {
        if self.file_type != expected_file_type {
            return Err(RuntimeError::InvalidIndex(format!(
                "unknown file type {}",
                self.file_type
            )));
        }
        if self.version > MAX_INDEX_VERSION {
            return Err(RuntimeError::InvalidIndex(format!(
                "unknown format version {}",
                self.version
            )));
        }
        Ok(())
    }

    pub fn get(&self, language: &str) -> Option<&LanguageEntry> {
        self.languages.get(language)
    }
}

impl LanguageEntry {
    pub fn stats(&self) -> LanguageStats {
        LanguageStats {
            translated: self.translated,
            untranslated: self.untranslated,
            fuzzy: self.fuzzy,
        }
    }
}

impl LanguageStats {
    pub fn total(&self) -> u64 {
        u64::from(self.translated) + u64::from(self.untranslated) + u64::from(self.fuzzy)
    }

    pub fn percent_translated(&self) -> f32 {
        let total = self.total();
        if total == 0 {
            return 100.0;
        }
        100.0 * self.translated as f32 / total as f32
    }
}
