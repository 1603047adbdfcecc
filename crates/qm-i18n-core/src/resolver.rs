use alloc::string::String;
use alloc::vec::Vec;

use crate::error::ResolveError;

pub trait DependencyResolver {
    fn resolve(&self, name: &str) -> Result<Vec<u8>, ResolveError>;
}

impl<F> DependencyResolver for F
where
    F: Fn(&str) -> Result<Vec<u8>, ResolveError>,
{
    fn resolve(&self, name: &str) -> Result<Vec<u8>, ResolveError> {
        self(name)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoDependencies;

impl DependencyResolver for NoDependencies {
    fn resolve(&self, name: &str) -> Result<Vec<u8>, ResolveError> {
        Err(ResolveError::NotFound(String::from(name)))
    }
}
