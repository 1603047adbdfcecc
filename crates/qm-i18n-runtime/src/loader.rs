use std::fs;
use std::path::Path;

use qm_i18n_core::{Catalog, MAGIC};
use sha1::{Digest, Sha1};

use crate::error::{RuntimeError, RuntimeResult};
use crate::index::TranslationIndex;
use crate::locate::{
    DEFAULT_DELIMITERS, DEFAULT_SUFFIX, find_catalog_file, find_catalog_for_languages,
};
use crate::resolver::DirectoryResolver;

pub fn load_catalog_file(path: &Path, directory: &Path) -> RuntimeResult<Catalog> {
    let len = fs::metadata(path)?.len();
    if len <= MAGIC.len() as u64 || len >= u64::from(u32::MAX) {
        return Err(RuntimeError::CatalogSize(path.display().to_string()));
    }
    let bytes = fs::read(path)?;
    tracing::debug!(path = %path.display(), size = bytes.len(), "loading translation catalog");
    Ok(Catalog::load(bytes, &DirectoryResolver::new(directory))?)
}

pub fn load_catalog(filename: &str, directory: &Path) -> RuntimeResult<Catalog> {
    let path = find_catalog_file(filename, directory, DEFAULT_DELIMITERS, DEFAULT_SUFFIX)
        .ok_or_else(|| RuntimeError::CatalogNotFound(filename.to_string()))?;
    load_catalog_file(&path, directory)
}

pub fn load_catalog_for_languages<S: AsRef<str>>(
    ui_languages: &[S],
    filename: &str,
    prefix: &str,
    directory: &Path,
    suffix: Option<&str>,
) -> RuntimeResult<Catalog> {
    let path = find_catalog_for_languages(ui_languages, filename, prefix, directory, suffix)
        .ok_or_else(|| RuntimeError::CatalogNotFound(filename.to_string()))?;
    load_catalog_file(&path, directory)
}

pub fn load_index(path: &Path, expected_file_type: &str) -> RuntimeResult<TranslationIndex> {
    let contents = fs::read_to_string(path)?;
    TranslationIndex::from_json(&contents, expected_file_type)
}

pub fn parse_sha1(value: &str) -> RuntimeResult<[u8; 20]> {
    let trimmed = value.trim();
    let hex = trimmed.strip_prefix("sha1:").unwrap_or(trimmed);
    let bytes = hex::decode(hex).map_err(|_| RuntimeError::InvalidHash)?;
    if bytes.len() != 20 {
        return Err(RuntimeError::InvalidHash);
    }
    let mut out = [0u8; 20];
    out.copy_from_slice(&bytes);
    Ok(out)
}

pub fn verify_checksum(
    name: &str,
    bytes: &[u8],
    expected_size: u64,
    expected_sha1: &str,
) -> RuntimeResult<()> {
    if bytes.len() as u64 != expected_size {
        return Err(RuntimeError::ChecksumMismatch(name.to_string()));
    }
    let expected = parse_sha1(expected_sha1)?;
    if sha1_digest(bytes) != expected {
        return Err(RuntimeError::ChecksumMismatch(name.to_string()));
    }
    Ok(())
}

fn sha1_digest(bytes: &[u8]) -> [u8; 20] {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    hasher.finalize().into()
}
