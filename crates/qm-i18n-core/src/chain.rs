use alloc::string::String;
use alloc::vec::Vec;

use crate::Catalog;

pub trait Translate {
    fn translate(
        &self,
        context: &str,
        source_text: &str,
        comment: Option<&str>,
        n: Option<i64>,
    ) -> Option<String>;
}

impl Translate for Catalog {
    fn translate(
        &self,
        context: &str,
        source_text: &str,
        comment: Option<&str>,
        n: Option<i64>,
    ) -> Option<String> {
        Catalog::translate(self, context, source_text, comment, n)
    }
}

pub struct CatalogChain<'a> {
    translators: Vec<&'a dyn Translate>,
}

impl<'a> CatalogChain<'a> {
    pub fn new(translators: Vec<&'a dyn Translate>) -> Self {
        Self { translators }
    }

    pub fn len(&self) -> usize {
        self.translators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }

    pub fn translate(
        &self,
        context: &str,
        source_text: &str,
        comment: Option<&str>,
        n: Option<i64>,
    ) -> Option<String> {
        self.translators
            .iter()
            .find_map(|translator| translator.translate(context, source_text, comment, n))
    }
}
