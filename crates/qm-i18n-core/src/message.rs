use alloc::string::String;
use alloc::vec::Vec;

use crate::reader::ByteCursor;

pub const TAG_END: u8 = 1;
pub const TAG_SOURCE_TEXT_16: u8 = 2;
pub const TAG_TRANSLATION: u8 = 3;
pub const TAG_CONTEXT_16: u8 = 4;
pub const TAG_OBSOLETE_1: u8 = 5;
pub const TAG_SOURCE_TEXT: u8 = 6;
pub const TAG_CONTEXT: u8 = 7;
pub const TAG_COMMENT: u8 = 8;
pub const TAG_OBSOLETE_2: u8 = 9;

const OBSOLETE_FIELD_LEN: usize = 4;

/// An empty stored comment matches every queried comment.
pub fn scan(
    messages: &[u8],
    offset: u32,
    context: &str,
    source_text: &str,
    comment: &str,
    plural_form: u32,
) -> Option<String> {
    let mut cursor = ByteCursor::at(messages, offset as usize);
    let mut seen = 0u32;
    let mut captured: Option<&[u8]> = None;

    loop {
        match cursor.read_u8()? {
            TAG_END => break,
            TAG_TRANSLATION => {
                let blob = cursor.read_blob()?;
                if blob.len() % 2 != 0 {
                    return None;
                }
                if seen == plural_form && captured.is_none() {
                    captured = Some(blob);
                }
                seen = seen.saturating_add(1);
            }
            TAG_OBSOLETE_1 | TAG_OBSOLETE_2 => cursor.skip(OBSOLETE_FIELD_LEN)?,
            TAG_SOURCE_TEXT => {
                if !matches(cursor.read_blob()?, source_text) {
                    return None;
                }
            }
            TAG_CONTEXT => {
                if !matches(cursor.read_blob()?, context) {
                    return None;
                }
            }
            TAG_COMMENT => {
                let stored = cursor.read_blob()?;
                if !is_wildcard(stored) && !matches(stored, comment) {
                    return None;
                }
            }
            _ => return None,
        }
    }

    captured.map(decode_utf16_be)
}

/// Stored strings may carry a trailing NUL that the query never has.
pub(crate) fn matches(stored: &[u8], query: &str) -> bool {
    let stored = stored.strip_suffix(&[0]).unwrap_or(stored);
    stored == query.as_bytes()
}

fn is_wildcard(stored: &[u8]) -> bool {
    stored.first().is_none_or(|&byte| byte == 0)
}

pub(crate) fn decode_utf16_be(blob: &[u8]) -> String {
    let units: Vec<u16> = blob
        .chunks_exact(2)
        .map(|pair| be_to_host(u16::from_ne_bytes([pair[0], pair[1]])))
        .collect();
    String::from_utf16_lossy(&units)
}

/// Code units are stored big-endian; only little-endian hosts need a swap.
fn be_to_host(unit: u16) -> u16 {
    if cfg!(target_endian = "little") {
        unit.swap_bytes()
    } else {
        unit
    }
}
