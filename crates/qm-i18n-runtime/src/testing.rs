use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use qm_i18n_core::message::{TAG_CONTEXT, TAG_END, TAG_SOURCE_TEXT, TAG_TRANSLATION};
use qm_i18n_core::{BLOCK_DEPENDENCIES, BLOCK_HASHES, BLOCK_MESSAGES, MAGIC, message_hash};

pub(crate) fn temp_dir(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    path.push(format!("qm_i18n_runtime_{name}_{nanos}"));
    fs::create_dir_all(&path).expect("dir");
    path
}

pub(crate) fn catalog_bytes(entries: &[(&str, &str, &str)], dependencies: &[&str]) -> Vec<u8> {
    let mut messages = Vec::new();
    let mut index = Vec::new();
    for (context, source, translation) in entries {
        index.push((message_hash(source, ""), messages.len() as u32));
        push_blob(&mut messages, TAG_TRANSLATION, &utf16_be(translation));
        push_blob(&mut messages, TAG_SOURCE_TEXT, source.as_bytes());
        push_blob(&mut messages, TAG_CONTEXT, context.as_bytes());
        messages.push(TAG_END);
    }
    index.sort_by_key(|(hash, _)| *hash);

    let mut out = MAGIC.to_vec();
    if !index.is_empty() {
        let mut hashes = Vec::new();
        for (hash, offset) in index {
            hashes.extend_from_slice(&hash.to_be_bytes());
            hashes.extend_from_slice(&offset.to_be_bytes());
        }
        push_blob(&mut out, BLOCK_HASHES, &hashes);
        push_blob(&mut out, BLOCK_MESSAGES, &messages);
    }
    if !dependencies.is_empty() {
        let mut names = Vec::new();
        for name in dependencies {
            let units = utf16_be(name);
            names.extend_from_slice(&(units.len() as u32).to_be_bytes());
            names.extend(units);
        }
        push_blob(&mut out, BLOCK_DEPENDENCIES, &names);
    }
    out
}

fn utf16_be(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

fn push_blob(out: &mut Vec<u8>, tag: u8, bytes: &[u8]) {
    out.push(tag);
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
}
