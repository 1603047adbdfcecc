use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use bytes::Bytes;

use crate::container::parse_blocks;
use crate::error::{DependencyFailure, LoadError, LoadResult};
use crate::hash::{elf_hash, message_hash};
use crate::message::{self, matches};
use crate::numerus;
use crate::reader::{ByteCursor, read_u16_at, read_u32_at};
use crate::resolver::{DependencyResolver, NoDependencies};

/// Deepest dependency nesting accepted while loading.
pub const MAX_DEPENDENCY_DEPTH: usize = 32;

const OFFSET_ENTRY_LEN: usize = 8;

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    context_table: Bytes,
    offset_table: Bytes,
    message_stream: Bytes,
    numerus_rules: Bytes,
    dependencies: Vec<Catalog>,
}

enum LocalLookup {
    Found(String),
    ContextAbsent,
    NotSearched,
    Missing,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(data: impl Into<Bytes>, resolver: &dyn DependencyResolver) -> LoadResult<Self> {
        Self::load_at_depth(data.into(), resolver, 0)
    }

    pub fn from_bytes(data: impl Into<Bytes>) -> LoadResult<Self> {
        Self::load(data, &NoDependencies)
    }

    fn load_at_depth(
        data: Bytes,
        resolver: &dyn DependencyResolver,
        depth: usize,
    ) -> LoadResult<Self> {
        let blocks = parse_blocks(&data)?;
        if blocks.dependencies.is_empty() && (blocks.hashes.is_none() || blocks.messages.is_none())
        {
            return Err(LoadError::MissingTables);
        }

        let slice = |range: Option<Range<usize>>| range.map(|r| data.slice(r)).unwrap_or_default();
        let numerus_rules = slice(blocks.numerus_rules);
        if !numerus::validate(&numerus_rules) {
            return Err(LoadError::BadNumerusRules);
        }

        let mut dependencies = Vec::with_capacity(blocks.dependencies.len());
        for name in &blocks.dependencies {
            dependencies.push(load_dependency(name, resolver, depth + 1)?);
        }

        let catalog = Self {
            context_table: slice(blocks.contexts),
            offset_table: slice(blocks.hashes),
            message_stream: slice(blocks.messages),
            numerus_rules,
            dependencies,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            messages = catalog.message_count(),
            dependencies = catalog.dependencies.len(),
            depth,
            "loaded translation catalog"
        );

        Ok(catalog)
    }

    pub fn is_empty(&self) -> bool {
        self.context_table.is_empty()
            && self.offset_table.is_empty()
            && self.message_stream.is_empty()
            && self.dependencies.is_empty()
    }

    pub fn dependencies(&self) -> &[Catalog] {
        &self.dependencies
    }

    pub fn message_count(&self) -> usize {
        self.offset_table.len() / OFFSET_ENTRY_LEN
    }

    pub fn plural_form_count(&self) -> u32 {
        numerus::form_count(&self.numerus_rules).unwrap_or(1)
    }

    pub fn translate(
        &self,
        context: &str,
        source_text: &str,
        comment: Option<&str>,
        n: Option<i64>,
    ) -> Option<String> {
        let comment = comment.unwrap_or("");
        let forwarded = match self.lookup_local(context, source_text, comment, n) {
            LocalLookup::Found(text) => return Some(text),
            LocalLookup::ContextAbsent => {
                #[cfg(feature = "tracing")]
                tracing::trace!(context, source_text, "context not declared in catalog");
                return None;
            }
            // Once the hash search ran, dependencies only see the stripped comment.
            LocalLookup::NotSearched => comment,
            LocalLookup::Missing => "",
        };

        let found = self
            .dependencies
            .iter()
            .find_map(|dependency| {
                dependency.translate(context, source_text, Some(forwarded), n)
            });

        #[cfg(feature = "tracing")]
        if found.is_none() {
            tracing::trace!(context, source_text, "no translation found");
        }

        found
    }

    fn lookup_local(
        &self,
        context: &str,
        source_text: &str,
        comment: &str,
        n: Option<i64>,
    ) -> LocalLookup {
        if self.offset_table.is_empty() {
            return LocalLookup::NotSearched;
        }
        if !self.context_table.is_empty() && !self.declares_context(context) {
            return LocalLookup::ContextAbsent;
        }
        if self.message_count() == 0 {
            return LocalLookup::NotSearched;
        }

        let plural_form = match n {
            Some(n) if n >= 0 => numerus::evaluate(&self.numerus_rules, n),
            _ => 0,
        };

        if let Some(text) = self.find_message(context, source_text, comment, plural_form) {
            return LocalLookup::Found(text);
        }
        if !comment.is_empty() {
            if let Some(text) = self.find_message(context, source_text, "", plural_form) {
                return LocalLookup::Found(text);
            }
        }
        LocalLookup::Missing
    }

    fn declares_context(&self, context: &str) -> bool {
        self.find_context(context).unwrap_or(false)
    }

    fn find_context(&self, context: &str) -> Option<bool> {
        let table = &self.context_table[..];
        let buckets = usize::from(read_u16_at(table, 0)?);
        if buckets == 0 {
            return Some(false);
        }
        let bucket = elf_hash(context.as_bytes()) as usize % buckets;
        let offset = usize::from(read_u16_at(table, 2 + 2 * bucket)?);
        if offset == 0 {
            return Some(false);
        }

        let mut cursor = ByteCursor::at(table, 2 + 2 * buckets + 2 * offset);
        loop {
            let len = usize::from(cursor.read_u8()?);
            if len == 0 {
                return Some(false);
            }
            if matches(cursor.take(len)?, context) {
                return Some(true);
            }
        }
    }

    fn find_message(
        &self,
        context: &str,
        source_text: &str,
        comment: &str,
        plural_form: u32,
    ) -> Option<String> {
        let hash = message_hash(source_text, comment);
        let first = self.first_entry_with_hash(hash)?;
        for index in first..self.message_count() {
            let (entry_hash, offset) = self.entry(index)?;
            if entry_hash != hash {
                break;
            }
            let found = message::scan(
                &self.message_stream,
                offset,
                context,
                source_text,
                comment,
                plural_form,
            );
            if found.is_some() {
                return found;
            }
        }
        None
    }

    fn first_entry_with_hash(&self, hash: u32) -> Option<usize> {
        let mut low = 0usize;
        let mut high = self.message_count();
        while low < high {
            let mid = low + (high - low) / 2;
            let (mid_hash, _) = self.entry(mid)?;
            if mid_hash < hash {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        let (found, _) = self.entry(low)?;
        (found == hash).then_some(low)
    }

    fn entry(&self, index: usize) -> Option<(u32, u32)> {
        let start = index.checked_mul(OFFSET_ENTRY_LEN)?;
        let hash = read_u32_at(&self.offset_table, start)?;
        let offset = read_u32_at(&self.offset_table, start + 4)?;
        Some((hash, offset))
    }
}

fn load_dependency(
    name: &str,
    resolver: &dyn DependencyResolver,
    depth: usize,
) -> LoadResult<Catalog> {
    let failed = |reason| LoadError::DependencyFailed {
        name: String::from(name),
        reason,
    };
    if depth > MAX_DEPENDENCY_DEPTH {
        return Err(failed(DependencyFailure::TooDeep));
    }
    let bytes = resolver
        .resolve(name)
        .map_err(|err| failed(DependencyFailure::Unresolved(err)))?;
    Catalog::load_at_depth(Bytes::from(bytes), resolver, depth)
        .map_err(|err| failed(DependencyFailure::Invalid(Box::new(err))))
}
