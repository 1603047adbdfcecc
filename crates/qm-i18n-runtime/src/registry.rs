use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use qm_i18n_core::{Catalog, CatalogChain, Translate};

use crate::config::RuntimeConfig;
use crate::error::RuntimeResult;
use crate::index::{LanguageEntry, LanguageStats};
use crate::loader::{load_catalog, load_index, verify_checksum};
use crate::locate::DEFAULT_SUFFIX;
use crate::resolver::DirectoryResolver;

#[derive(Debug, Clone, PartialEq)]
pub struct Language {
    pub key: String,
    pub stats: LanguageStats,
    pub published: Option<LanguageEntry>,
    pub local_file: Option<PathBuf>,
}

impl Language {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            stats: LanguageStats::default(),
            published: None,
            local_file: None,
        }
    }

    pub fn percent_translated(&self) -> f32 {
        self.stats.percent_translated()
    }
}

pub struct Translations {
    config: RuntimeConfig,
    languages: BTreeMap<String, Language>,
    selected: String,
    catalogs: Vec<Catalog>,
}

impl Translations {
    pub fn new(config: RuntimeConfig) -> Self {
        let default = config.default_language.clone();
        let mut languages = BTreeMap::new();
        languages.insert(default.clone(), Language::new(&default));
        Self {
            config,
            languages,
            selected: default,
            catalogs: Vec::new(),
        }
    }

    pub fn open(config: RuntimeConfig) -> RuntimeResult<Self> {
        let mut translations = Self::new(config);
        translations.reload_local_files()?;
        Ok(translations)
    }

    pub fn reload_local_files(&mut self) -> RuntimeResult<()> {
        let default = &self.config.default_language;
        let mut languages = BTreeMap::new();
        languages.insert(default.clone(), Language::new(default));

        let dir = self.catalog_dir();
        match load_index(&dir.join(&self.config.index_file), &self.config.index_file_type) {
            Ok(index) => {
                for (key, entry) in index.languages {
                    let mut language = Language::new(&key);
                    language.stats = entry.stats();
                    language.published = Some(entry);
                    languages.insert(key, language);
                }
            }
            Err(err) => tracing::error!(error = %err, "translation index unavailable"),
        }

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::warn!(dir = %dir.display(), "catalog directory missing");
                self.languages = languages;
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        for entry in entries {
            let path = entry?.path();
            let Some(key) = self.language_key(&path) else {
                continue;
            };
            languages
                .entry(key.clone())
                .or_insert_with(|| Language::new(&key))
                .local_file = Some(path);
        }

        tracing::debug!(count = languages.len(), "translation languages discovered");
        self.languages = languages;
        Ok(())
    }

    pub fn languages(&self) -> impl Iterator<Item = &Language> {
        self.languages.values()
    }

    pub fn language(&self, key: &str) -> Option<&Language> {
        self.languages.get(key)
    }

    pub fn selected_language(&self) -> &str {
        &self.selected
    }

    /// Unknown keys select the default language, which installs nothing.
    pub fn select_language(&mut self, key: &str) -> bool {
        let key = match self.languages.get(key) {
            Some(language) => language.key.clone(),
            None => {
                tracing::warn!(
                    language = key,
                    default = %self.config.default_language,
                    "selected unknown language, using default"
                );
                self.config.default_language.clone()
            }
        };

        self.catalogs.clear();
        self.selected = key.clone();
        if key == self.config.default_language {
            return true;
        }

        let mut installed = false;
        match self.load_application_catalog(&key) {
            Ok(Some(catalog)) => {
                self.catalogs.push(catalog);
                installed = true;
            }
            Ok(None) => {}
            Err(err) => {
                tracing::error!(language = %key, error = %err, "application catalog failed to load")
            }
        }
        if let Some(dir) = &self.config.system_catalog_dir {
            let name = format!("{}{key}", self.config.system_catalog_prefix);
            match load_catalog(&name, Path::new(dir)) {
                Ok(catalog) => {
                    self.catalogs.push(catalog);
                    installed = true;
                }
                Err(err) => tracing::debug!(catalog = %name, error = %err, "no system catalog"),
            }
        }
        tracing::info!(language = %key, catalogs = self.catalogs.len(), "language selected");
        installed
    }

    pub fn installed_catalogs(&self) -> &[Catalog] {
        &self.catalogs
    }

    pub fn translate(
        &self,
        context: &str,
        source_text: &str,
        comment: Option<&str>,
        n: Option<i64>,
    ) -> Option<String> {
        let translators = self
            .catalogs
            .iter()
            .map(|catalog| catalog as &dyn Translate)
            .collect();
        CatalogChain::new(translators).translate(context, source_text, comment, n)
    }

    pub fn translate_or_source(
        &self,
        context: &str,
        source_text: &str,
        comment: Option<&str>,
        n: Option<i64>,
    ) -> String {
        self.translate(context, source_text, comment, n)
            .unwrap_or_else(|| source_text.to_string())
    }

    fn catalog_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.catalog_dir)
    }

    fn language_key(&self, path: &Path) -> Option<String> {
        let name = path.file_name()?.to_str()?;
        let key = name
            .strip_prefix(&self.config.catalog_prefix)?
            .strip_suffix(DEFAULT_SUFFIX)?;
        (!key.is_empty() && path.is_file()).then(|| key.to_string())
    }

    fn load_application_catalog(&self, key: &str) -> RuntimeResult<Option<Catalog>> {
        let Some(language) = self.languages.get(key) else {
            return Ok(None);
        };
        let Some(path) = &language.local_file else {
            return Ok(None);
        };
        let bytes = fs::read(path)?;
        if let Some(entry) = &language.published {
            if let Err(err) = verify_checksum(&entry.file, &bytes, entry.size, &entry.sha1) {
                tracing::warn!(language = key, error = %err, "local catalog differs from index");
            }
        }
        let catalog = Catalog::load(bytes, &DirectoryResolver::new(self.catalog_dir()))?;
        Ok(Some(catalog))
    }
}
