#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod catalog;
mod chain;
mod container;
mod error;
mod hash;
pub mod message;
pub mod numerus;
mod reader;
mod resolver;
#[cfg(test)]
mod testing;

pub use catalog::{Catalog, MAX_DEPENDENCY_DEPTH};
pub use chain::{CatalogChain, Translate};
pub use container::{
    BLOCK_CONTEXTS, BLOCK_DEPENDENCIES, BLOCK_HASHES, BLOCK_MESSAGES, BLOCK_NUMERUS_RULES, MAGIC,
    has_magic,
};
pub use error::{DependencyFailure, LoadError, LoadResult, ResolveError};
pub use hash::{ElfHash, elf_hash, message_hash};
pub use reader::ByteCursor;
pub use resolver::{DependencyResolver, NoDependencies};
