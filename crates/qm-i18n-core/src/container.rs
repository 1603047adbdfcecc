use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use crate::error::{LoadError, LoadResult};
use crate::reader::ByteCursor;

pub const MAGIC: [u8; 16] = [
    0x3c, 0xb8, 0x64, 0x18, 0xca, 0xef, 0x9c, 0x95, 0xcd, 0x21, 0x1c, 0xbf, 0x60, 0xa1, 0xbd, 0xdd,
];

pub const BLOCK_CONTEXTS: u8 = 0x2f;
pub const BLOCK_HASHES: u8 = 0x42;
pub const BLOCK_MESSAGES: u8 = 0x69;
pub const BLOCK_NUMERUS_RULES: u8 = 0x88;
pub const BLOCK_DEPENDENCIES: u8 = 0x96;

const BLOCK_HEADER_LEN: usize = 1 + 4;
const NULL_STRING_LEN: u32 = u32::MAX;

/// Byte ranges of the known blocks, relative to the start of the buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Blocks {
    pub contexts: Option<Range<usize>>,
    pub hashes: Option<Range<usize>>,
    pub messages: Option<Range<usize>>,
    pub numerus_rules: Option<Range<usize>>,
    pub dependencies: Vec<String>,
}

pub fn has_magic(data: &[u8]) -> bool {
    data.len() > MAGIC.len() && data[..MAGIC.len()] == MAGIC
}

pub(crate) fn parse_blocks(data: &[u8]) -> LoadResult<Blocks> {
    if !has_magic(data) {
        return Err(LoadError::BadMagic);
    }
    let mut cursor = ByteCursor::at(data, MAGIC.len());
    let mut blocks = Blocks::default();

    while cursor.remaining() >= BLOCK_HEADER_LEN {
        let tag = cursor.read_u8().ok_or(LoadError::Truncated)?;
        let len = cursor.read_u32().ok_or(LoadError::Truncated)? as usize;
        if tag == 0 || len == 0 {
            break;
        }
        if cursor.remaining() < len {
            return Err(LoadError::Truncated);
        }
        let start = cursor.position();
        let range = start..start + len;
        match tag {
            BLOCK_CONTEXTS => blocks.contexts = Some(range),
            BLOCK_HASHES => blocks.hashes = Some(range),
            BLOCK_MESSAGES => blocks.messages = Some(range),
            BLOCK_NUMERUS_RULES => blocks.numerus_rules = Some(range),
            BLOCK_DEPENDENCIES => {
                let names = decode_dependency_names(&data[range])?;
                blocks.dependencies.extend(names);
            }
            _ => {
                #[cfg(feature = "tracing")]
                tracing::trace!(tag, len, "skipping unknown catalog block");
            }
        }
        cursor.skip(len).ok_or(LoadError::Truncated)?;
    }

    Ok(blocks)
}

/// Decodes the dependency block: `u32` byte length + UTF-16BE code units per
/// name, with `u32::MAX` standing for a null name.
pub(crate) fn decode_dependency_names(block: &[u8]) -> LoadResult<Vec<String>> {
    let mut cursor = ByteCursor::new(block);
    let mut names = Vec::new();
    while !cursor.is_at_end() {
        let len = cursor.read_u32().ok_or(LoadError::BadDependencies)?;
        if len == NULL_STRING_LEN {
            names.push(String::new());
            continue;
        }
        if len % 2 != 0 {
            return Err(LoadError::BadDependencies);
        }
        let bytes = cursor
            .take(len as usize)
            .ok_or(LoadError::BadDependencies)?;
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        let name = String::from_utf16(&units).map_err(|_| LoadError::BadDependencies)?;
        names.push(name);
    }
    Ok(names)
}
