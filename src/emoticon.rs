// src/emoticon.rs
//! Emoticon classification: rewrites known emoticon codes into sentiment
//! class tags (`_pos`, `_neg`, `_neu`).
//!
//! Two families:
//! - alphabetic codes (`xd`, `xc`) are whole words, matched case-insensitively
//!   with a word-boundary regex, in table order;
//! - symbolic codes (`:)`, `:-P`) go through a greedy scan that tries the
//!   longest known code first at every position, so `:-)` is never shadowed
//!   by `:-`.
//!
//! The bundled table lives in `resources/emoticons.json` (one JSON record per
//! line: `{"code": ":)", "klass": "_pos"}`).

use crate::config::FilterOption;
use crate::error::{Error, Result};
use crate::stream::{self, SEP, TAG_NEG, TAG_NEU, TAG_POS};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

static BUNDLED: Lazy<Arc<EmoticonTable>> = Lazy::new(|| {
    let raw = include_str!("../resources/emoticons.json");
    Arc::new(EmoticonTable::parse_json_lines(raw, "emoticons.json").expect("valid emoticon table"))
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn tag(self) -> &'static str {
        match self {
            Sentiment::Positive => TAG_POS,
            Sentiment::Negative => TAG_NEG,
            Sentiment::Neutral => TAG_NEU,
        }
    }

    pub fn from_tag(s: &str) -> Option<Self> {
        match s {
            TAG_POS => Some(Sentiment::Positive),
            TAG_NEG => Some(Sentiment::Negative),
            TAG_NEU => Some(Sentiment::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single `{code, klass}` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmoticonRecord {
    pub code: String,
    pub klass: Sentiment,
}

impl EmoticonRecord {
    pub fn new(code: impl Into<String>, klass: Sentiment) -> Self {
        Self {
            code: code.into(),
            klass,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    code: Option<String>,
    klass: Option<String>,
}

/// Immutable emoticon lookup built once from a list of records.
#[derive(Debug)]
pub struct EmoticonTable {
    /// `by_len[n]` holds symbolic codes of `n` chars.
    by_len: Vec<HashMap<String, Sentiment>>,
    /// Longest symbolic code for each first char.
    max_len: HashMap<char, usize>,
    words: Vec<(Regex, Sentiment)>,
}

impl EmoticonTable {
    /// Shared table compiled from the bundled resource.
    pub fn bundled() -> Arc<EmoticonTable> {
        BUNDLED.clone()
    }

    /// Build from records. The first record for a code wins.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = EmoticonRecord>,
    {
        let mut by_len: Vec<HashMap<String, Sentiment>> = Vec::new();
        let mut max_len: HashMap<char, usize> = HashMap::new();
        let mut words = Vec::new();
        let mut seen_words: Vec<String> = Vec::new();

        for (i, rec) in records.into_iter().enumerate() {
            let code = rec.code.trim().to_lowercase();
            if code.is_empty() || code.contains(SEP) || code.chars().any(char::is_whitespace) {
                return Err(Error::MalformedResourceLine {
                    source_name: "emoticon records".into(),
                    line: i + 1,
                    content: rec.code,
                });
            }

            if code.chars().all(char::is_alphabetic) {
                if seen_words.contains(&code) {
                    continue;
                }
                let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&code)))
                    .map_err(|_| Error::MalformedResourceLine {
                        source_name: "emoticon records".into(),
                        line: i + 1,
                        content: rec.code.clone(),
                    })?;
                words.push((re, rec.klass));
                seen_words.push(code);
                continue;
            }

            let n = code.chars().count();
            if by_len.len() <= n {
                by_len.resize_with(n + 1, HashMap::new);
            }
            if let Some(first) = code.chars().next() {
                let e = max_len.entry(first).or_insert(0);
                *e = (*e).max(n);
            }
            by_len[n].entry(code).or_insert(rec.klass);
        }

        Ok(Self {
            by_len,
            max_len,
            words,
        })
    }

    /// Parse the JSON-lines format; blank lines and `#` comments are skipped.
    pub fn parse_json_lines(content: &str, source_name: &str) -> Result<Self> {
        let mut records = Vec::new();
        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let malformed = || Error::MalformedResourceLine {
                source_name: source_name.to_string(),
                line: i + 1,
                content: line.to_string(),
            };
            let raw: RawRecord = serde_json::from_str(line).map_err(|_| malformed())?;
            let (Some(code), Some(klass)) = (raw.code, raw.klass) else {
                return Err(malformed());
            };
            let klass = Sentiment::from_tag(klass.trim()).ok_or_else(malformed)?;
            records.push(EmoticonRecord::new(code, klass));
        }
        Self::from_records(records)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::MissingResourceFile {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let name = path.display().to_string();
        Self::parse_json_lines(&content, &name)
    }

    /// Number of distinct codes (symbolic + alphabetic).
    pub fn len(&self) -> usize {
        self.words.len() + self.by_len.iter().map(HashMap::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rewrite every known code in `stream`. `Group` emits the class tag,
    /// `Delete` drops the code, `None` returns the input untouched.
    pub fn replace(&self, stream: &str, option: FilterOption) -> String {
        if option == FilterOption::None {
            return stream.to_string();
        }
        let tag_for = |k: Sentiment| match option {
            FilterOption::Delete => "",
            _ => k.tag(),
        };

        let mut text = stream.to_string();
        for (re, klass) in &self.words {
            let out = re.replace_all(&text, tag_for(*klass));
            if let std::borrow::Cow::Owned(s) = out {
                text = s;
            }
        }

        let out = self.scan_symbolic(&text, &tag_for);
        if option == FilterOption::Delete {
            stream::collapse(&out)
        } else {
            out
        }
    }

    fn scan_symbolic(&self, text: &str, tag_for: &dyn Fn(Sentiment) -> &'static str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let lower: Vec<char> = chars.iter().map(|&c| lower_char(c)).collect();
        let n = chars.len();

        let mut out = String::with_capacity(text.len());
        let mut key = String::new();
        let mut i = 0;
        while i < n {
            let mut matched = None;
            if let Some(&longest) = self.max_len.get(&lower[i]) {
                for len in (1..=longest.min(n - i)).rev() {
                    key.clear();
                    key.extend(&lower[i..i + len]);
                    if let Some(&klass) = self.by_len[len].get(key.as_str()) {
                        matched = Some((len, klass));
                        break;
                    }
                }
            }
            match matched {
                Some((len, klass)) => {
                    out.push_str(tag_for(klass));
                    i += len;
                }
                None => {
                    out.push(chars[i]);
                    i += 1;
                }
            }
        }
        out
    }
}

/// One-to-one lowercase; chars whose lowercase expands keep their form.
fn lower_char(c: char) -> char {
    let mut it = c.to_lowercase();
    match (it.next(), it.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}
