use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

/// Why a catalog could not be loaded. Loading is all-or-nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    BadMagic,
    Truncated,
    MissingTables,
    BadNumerusRules,
    BadDependencies,
    DependencyFailed {
        name: String,
        reason: DependencyFailure,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyFailure {
    Unresolved(ResolveError),
    Invalid(Box<LoadError>),
    TooDeep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    NotFound(String),
    Unreadable(String),
}

pub type LoadResult<T> = Result<T, LoadError>;

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::BadMagic => write!(f, "not a translation catalog: bad magic"),
            LoadError::Truncated => write!(f, "block length exceeds remaining data"),
            LoadError::MissingTables => {
                write!(f, "catalog has no messages and no dependencies")
            }
            LoadError::BadNumerusRules => write!(f, "invalid numerus rules"),
            LoadError::BadDependencies => write!(f, "malformed dependency list"),
            LoadError::DependencyFailed { name, reason } => {
                write!(f, "dependency {name:?} failed: {reason}")
            }
        }
    }
}

impl fmt::Display for DependencyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyFailure::Unresolved(err) => write!(f, "{err}"),
            DependencyFailure::Invalid(err) => write!(f, "{err}"),
            DependencyFailure::TooDeep => write!(f, "dependency chain too deep"),
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::NotFound(name) => write!(f, "not found: {name}"),
            ResolveError::Unreadable(message) => write!(f, "unreadable: {message}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LoadError {}

#[cfg(feature = "std")]
impl std::error::Error for ResolveError {}
