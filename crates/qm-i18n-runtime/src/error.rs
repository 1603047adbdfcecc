use qm_i18n_core::LoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("catalog error: {0}")]
    Load(#[from] LoadError),
    #[error("catalog not found: {0}")]
    CatalogNotFound(String),
    #[error("catalog too small or too large: {0}")]
    CatalogSize(String),
    #[error("checksum mismatch: {0}")]
    ChecksumMismatch(String),
    #[error("invalid index: {0}")]
    InvalidIndex(String),
    #[error("invalid hash format")]
    InvalidHash,
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
