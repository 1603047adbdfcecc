use std::fs;
use std::path::PathBuf;

use qm_i18n_core::{DependencyResolver, ResolveError};

use crate::locate::{DEFAULT_DELIMITERS, DEFAULT_SUFFIX, find_catalog_file};

#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    directory: PathBuf,
}

impl DirectoryResolver {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl DependencyResolver for DirectoryResolver {
    fn resolve(&self, name: &str) -> Result<Vec<u8>, ResolveError> {
        let path = find_catalog_file(name, &self.directory, DEFAULT_DELIMITERS, DEFAULT_SUFFIX)
            .ok_or_else(|| ResolveError::NotFound(name.to_string()))?;
        tracing::debug!(dependency = name, path = %path.display(), "resolving catalog dependency");
        fs::read(&path)
            .map_err(|err| ResolveError::Unreadable(format!("{}: {err}", path.display())))
    }
}
