use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RuntimeResult;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub catalog_dir: String,
    pub catalog_prefix: String,
    pub default_language: String,
    pub index_file: String,
    pub index_file_type: String,
    pub system_catalog_dir: Option<String>,
    pub system_catalog_prefix: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            catalog_dir: "translations".to_string(),
            catalog_prefix: "app_".to_string(),
            default_language: "en".to_string(),
            index_file: "index_v2.json".to_string(),
            index_file_type: "APP-TRANSLATION-INDEX".to_string(),
            system_catalog_dir: None,
            system_catalog_prefix: "qt_".to_string(),
        }
    }
}

pub fn load_config(path: &Path) -> RuntimeResult<RuntimeConfig> {
    let contents = fs::read_to_string(path)?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

pub fn load_config_or_default(path: &Path) -> RuntimeResult<RuntimeConfig> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(RuntimeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{RuntimeConfig, load_config, load_config_or_default};
    use crate::RuntimeError;
    use crate::testing::temp_dir;
    use std::fs;

    #[test]
    fn uses_default_when_missing() {
        let dir = temp_dir("config_missing");
        let config = load_config_or_default(&dir.join("i18n.toml")).expect("config");
        assert_eq!(config.default_language, "en");
        assert_eq!(config.catalog_prefix, "app_");
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn loads_from_file() {
        let dir = temp_dir("config");
        let path = dir.join("i18n.toml");
        let contents = r#"
catalog_dir = "/usr/share/app/translations"
catalog_prefix = "tool_"
default_language = "de"
system_catalog_dir = "/usr/share/qt/translations"
"#;
        fs::write(&path, contents).expect("write");
        let config = load_config_or_default(&path).expect("config");
        assert_eq!(config.default_language, "de");
        assert_eq!(config.catalog_prefix, "tool_");
        assert_eq!(
            config.system_catalog_dir.as_deref(),
            Some("/usr/share/qt/translations")
        );
        assert_eq!(config.index_file, "index_v2.json");
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn rejects_malformed_toml() {
        let dir = temp_dir("config_broken");
        let path = dir.join("i18n.toml");
        fs::write(&path, "catalog_dir = [").expect("write");
        assert!(matches!(load_config(&path), Err(RuntimeError::Toml(_))));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn default_values_are_stable() {
        let config = RuntimeConfig::default();
        assert_eq!(config.index_file_type, "APP-TRANSLATION-INDEX");
        assert_eq!(config.system_catalog_prefix, "qt_");
    }
}
