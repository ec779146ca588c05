// src/lang/resources.rs
//! Plain-text resource files (UTF-8, one entry per line, `#` comments and
//! blank lines ignored, entries trimmed + lowercased):
//!
//! - `<lang>.stopwords`
//! - `<lang>.neg.stopwords` (negation exceptions)
//! - `<lang>.dictionary`
//! - `<lang>.abbreviations` (`abbreviation<TAB>expansion`)
//!
//! Files come either from the copies compiled into the crate or from a
//! directory (`B4MSA_RESOURCE_DIR`).

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const ENV_RESOURCE_DIR: &str = "B4MSA_RESOURCE_DIR";

const BUNDLED: &[(&str, &str)] = &[
    ("spanish.stopwords", include_str!("../../resources/spanish.stopwords")),
    ("spanish.neg.stopwords", include_str!("../../resources/spanish.neg.stopwords")),
    ("english.stopwords", include_str!("../../resources/english.stopwords")),
    ("english.neg.stopwords", include_str!("../../resources/english.neg.stopwords")),
    ("italian.stopwords", include_str!("../../resources/italian.stopwords")),
    ("italian.neg.stopwords", include_str!("../../resources/italian.neg.stopwords")),
    ("german.stopwords", include_str!("../../resources/german.stopwords")),
    ("portuguese.stopwords", include_str!("../../resources/portuguese.stopwords")),
    ("portuguese.neg.stopwords", include_str!("../../resources/portuguese.neg.stopwords")),
    ("portuguese.dictionary", include_str!("../../resources/portuguese.dictionary")),
    ("portuguese.abbreviations", include_str!("../../resources/portuguese.abbreviations")),
];

/// Where language resources are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceSource {
    Bundled,
    Dir(PathBuf),
}

impl ResourceSource {
    /// `$B4MSA_RESOURCE_DIR` if set, else the bundled copies.
    pub fn from_env() -> Self {
        match std::env::var(ENV_RESOURCE_DIR) {
            Ok(dir) if !dir.trim().is_empty() => ResourceSource::Dir(PathBuf::from(dir)),
            _ => ResourceSource::Bundled,
        }
    }

    /// Read the raw content of `file_name`.
    pub fn read(&self, file_name: &str) -> Result<String> {
        match self {
            ResourceSource::Bundled => BUNDLED
                .iter()
                .find(|(name, _)| *name == file_name)
                .map(|(_, content)| content.to_string())
                .ok_or_else(|| Error::MissingResourceFile {
                    path: Path::new("<bundled>").join(file_name),
                }),
            ResourceSource::Dir(dir) => {
                let path = dir.join(file_name);
                if !path.is_file() {
                    return Err(Error::MissingResourceFile { path });
                }
                debug!(target: "textmodel", path = %path.display(), "loading resource");
                Ok(fs::read_to_string(&path)?)
            }
        }
    }

    pub fn word_list(&self, file_name: &str) -> Result<Vec<String>> {
        Ok(parse_word_list(&self.read(file_name)?))
    }

    pub fn abbreviations(&self, file_name: &str) -> Result<HashMap<String, Vec<String>>> {
        parse_abbreviations(&self.read(file_name)?, file_name)
    }
}

fn entries(content: &str) -> impl Iterator<Item = (usize, String)> + '_ {
    content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim().to_lowercase()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'))
}

/// One entry per line, order preserved.
pub fn parse_word_list(content: &str) -> Vec<String> {
    entries(content).map(|(_, l)| l).collect()
}

/// `abbreviation<TAB>expansion`; the expansion is split on blanks.
pub fn parse_abbreviations(
    content: &str,
    source_name: &str,
) -> Result<HashMap<String, Vec<String>>> {
    let mut out = HashMap::new();
    for (line, entry) in entries(content) {
        let Some((abbrev, expansion)) = entry.split_once('\t') else {
            return Err(Error::MalformedResourceLine {
                source_name: source_name.to_string(),
                line,
                content: entry,
            });
        };
        let words: Vec<String> = expansion.split_whitespace().map(str::to_string).collect();
        if abbrev.trim().is_empty() || words.is_empty() {
            return Err(Error::MalformedResourceLine {
                source_name: source_name.to_string(),
                line,
                content: entry,
            });
        }
        out.insert(abbrev.trim().to_string(), words);
    }
    Ok(out)
}
