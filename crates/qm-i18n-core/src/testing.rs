use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::container::{
    BLOCK_CONTEXTS, BLOCK_DEPENDENCIES, BLOCK_HASHES, BLOCK_MESSAGES, BLOCK_NUMERUS_RULES, MAGIC,
};
use crate::hash::{elf_hash, message_hash};
use crate::message::{TAG_COMMENT, TAG_CONTEXT, TAG_END, TAG_SOURCE_TEXT, TAG_TRANSLATION};

struct Entry {
    context: String,
    source_text: String,
    comment: String,
    translations: Vec<String>,
}

#[derive(Default)]
pub(crate) struct CatalogBuilder {
    entries: Vec<Entry>,
    numerus_rules: Vec<u8>,
    dependencies: Vec<String>,
    context_buckets: Option<u16>,
    extra_blocks: Vec<(u8, Vec<u8>)>,
}

impl CatalogBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn message(
        mut self,
        context: &str,
        source_text: &str,
        comment: &str,
        translations: &[&str],
    ) -> Self {
        self.entries.push(Entry {
            context: String::from(context),
            source_text: String::from(source_text),
            comment: String::from(comment),
            translations: translations.iter().map(|t| String::from(*t)).collect(),
        });
        self
    }

    pub(crate) fn numerus_rules(mut self, rules: &[u8]) -> Self {
        self.numerus_rules = rules.to_vec();
        self
    }

    pub(crate) fn dependency(mut self, name: &str) -> Self {
        self.dependencies.push(String::from(name));
        self
    }

    pub(crate) fn context_table(mut self, buckets: u16) -> Self {
        self.context_buckets = Some(buckets);
        self
    }

    pub(crate) fn raw_block(mut self, tag: u8, payload: &[u8]) -> Self {
        self.extra_blocks.push((tag, payload.to_vec()));
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut out = MAGIC.to_vec();
        if let Some(buckets) = self.context_buckets {
            push_block(&mut out, BLOCK_CONTEXTS, &self.encode_contexts(buckets));
        }
        if !self.entries.is_empty() {
            let (hashes, messages) = self.encode_messages();
            push_block(&mut out, BLOCK_HASHES, &hashes);
            push_block(&mut out, BLOCK_MESSAGES, &messages);
        }
        if !self.numerus_rules.is_empty() {
            push_block(&mut out, BLOCK_NUMERUS_RULES, &self.numerus_rules);
        }
        if !self.dependencies.is_empty() {
            let mut payload = Vec::new();
            for name in &self.dependencies {
                let units = utf16_be(name);
                payload.extend_from_slice(&(units.len() as u32).to_be_bytes());
                payload.extend(units);
            }
            push_block(&mut out, BLOCK_DEPENDENCIES, &payload);
        }
        for (tag, payload) in &self.extra_blocks {
            push_block(&mut out, *tag, payload);
        }
        out
    }

    fn encode_messages(&self) -> (Vec<u8>, Vec<u8>) {
        let mut messages = Vec::new();
        let mut index = Vec::new();
        for entry in &self.entries {
            index.push((message_hash(&entry.source_text, &entry.comment), messages.len() as u32));
            for translation in &entry.translations {
                push_blob(&mut messages, TAG_TRANSLATION, &utf16_be(translation));
            }
            push_blob(&mut messages, TAG_SOURCE_TEXT, entry.source_text.as_bytes());
            push_blob(&mut messages, TAG_CONTEXT, entry.context.as_bytes());
            push_blob(&mut messages, TAG_COMMENT, entry.comment.as_bytes());
            messages.push(TAG_END);
        }
        index.sort_by_key(|(hash, _)| *hash);
        let mut hashes = Vec::with_capacity(index.len() * 8);
        for (hash, offset) in index {
            hashes.extend_from_slice(&hash.to_be_bytes());
            hashes.extend_from_slice(&offset.to_be_bytes());
        }
        (hashes, messages)
    }

    fn encode_contexts(&self, buckets: u16) -> Vec<u8> {
        let contexts: BTreeSet<&str> = self.entries.iter().map(|e| e.context.as_str()).collect();
        let mut grouped: Vec<Vec<&str>> = vec![Vec::new(); usize::from(buckets)];
        for context in contexts {
            let bucket = elf_hash(context.as_bytes()) % u32::from(buckets);
            grouped[bucket as usize].push(context);
        }

        let mut table = buckets.to_be_bytes().to_vec();
        let mut strings = vec![0u8, 0u8];
        for group in &grouped {
            if group.is_empty() {
                table.extend_from_slice(&0u16.to_be_bytes());
                continue;
            }
            if strings.len() % 2 != 0 {
                strings.push(0);
            }
            table.extend_from_slice(&((strings.len() / 2) as u16).to_be_bytes());
            for context in group {
                strings.push(context.len() as u8);
                strings.extend_from_slice(context.as_bytes());
            }
            strings.push(0);
        }
        table.extend(strings);
        table
    }
}

pub(crate) fn utf16_be(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

fn push_blob(out: &mut Vec<u8>, tag: u8, bytes: &[u8]) {
    out.push(tag);
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
}

fn push_block(out: &mut Vec<u8>, tag: u8, payload: &[u8]) {
    push_blob(out, tag, payload);
}
