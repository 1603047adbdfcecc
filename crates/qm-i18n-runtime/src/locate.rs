use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DELIMITERS: &str = "_.";
pub const DEFAULT_SUFFIX: &str = ".qm";

/// A name whose only delimiter is its first character is not truncated.
pub fn find_catalog_file(
    filename: &str,
    directory: &Path,
    delimiters: &str,
    suffix: &str,
) -> Option<PathBuf> {
    let root = search_root(filename, directory);
    let mut name = filename;
    loop {
        let candidates = [format!("{name}{suffix}"), name.to_string()];
        if let Some(found) = first_readable(&root, candidates) {
            return Some(found);
        }
        let rightmost = name
            .rfind(|c: char| delimiters.contains(c))
            .unwrap_or(0);
        if rightmost == 0 {
            return None;
        }
        name = &name[..rightmost];
    }
}

pub fn find_catalog_for_languages<S: AsRef<str>>(
    ui_languages: &[S],
    filename: &str,
    prefix: &str,
    directory: &Path,
    suffix: Option<&str>,
) -> Option<PathBuf> {
    let root = search_root(filename, directory);
    let suffix_or_qm = suffix.unwrap_or(DEFAULT_SUFFIX);
    let base = format!("{filename}{prefix}");
    let try_locale = |locale: &str| {
        first_readable(
            &root,
            [format!("{base}{locale}{suffix_or_qm}"), format!("{base}{locale}")],
        )
    };

    let mut fuzzy = Vec::new();
    for language in expand_languages(ui_languages) {
        let locale = language.replace('-', "_");
        if let Some(found) = try_locale(&locale) {
            return Some(found);
        }
        fuzzy.push(locale);
    }

    for locale in &fuzzy {
        let mut name = locale.as_str();
        while let Some(rightmost) = name.rfind('_').filter(|index| *index > 0) {
            name = &name[..rightmost];
            if let Some(found) = try_locale(name) {
                return Some(found);
            }
        }
    }

    let mut fallbacks = Vec::with_capacity(3);
    if let Some(suffix) = suffix {
        fallbacks.push(format!("{filename}{suffix}"));
    }
    fallbacks.push(base);
    fallbacks.push(filename.to_string());
    first_readable(&root, fallbacks)
}

fn expand_languages<S: AsRef<str>>(ui_languages: &[S]) -> Vec<String> {
    let mut languages = Vec::with_capacity(ui_languages.len() * 2);
    for language in ui_languages {
        let language = language.as_ref();
        languages.push(language.to_string());
        if cfg!(unix) {
            let lower = language.to_lowercase();
            if lower != language {
                languages.push(lower);
            }
        }
    }
    languages
}

fn search_root(filename: &str, directory: &Path) -> PathBuf {
    if Path::new(filename).is_relative() {
        directory.to_path_buf()
    } else {
        PathBuf::new()
    }
}

fn first_readable(root: &Path, names: impl IntoIterator<Item = String>) -> Option<PathBuf> {
    names
        .into_iter()
        .filter(|name| !name.is_empty())
        .map(|name| root.join(name))
        .find(|path| is_readable_file(path))
}

fn is_readable_file(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}
