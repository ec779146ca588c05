// src/entity.rs
//! Symbolic entity tagging applied to the raw text, before normalization
//! splits it: numbers, then URLs, then user mentions.

use crate::config::FilterOption;
use crate::stream::{TAG_NUM, TAG_URL, TAG_USR};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

// At least two digits, optionally with one decimal point in between.
static RE_NUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+\.?[0-9]+").expect("number regex"));
static RE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("url regex"));
static RE_USR: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\S+").expect("mention regex"));

/// Per-class options for [`tag_entities`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityOptions {
    pub num: FilterOption,
    pub url: FilterOption,
    pub usr: FilterOption,
}

impl Default for EntityOptions {
    fn default() -> Self {
        Self {
            num: FilterOption::Group,
            url: FilterOption::Group,
            usr: FilterOption::Group,
        }
    }
}

fn apply<'a>(re: &Regex, text: Cow<'a, str>, option: FilterOption, tag: &str) -> Cow<'a, str> {
    let replacement = match option {
        FilterOption::None => return text,
        FilterOption::Delete => "",
        FilterOption::Group => tag,
    };
    match re.replace_all(&text, replacement) {
        Cow::Borrowed(_) => text,
        Cow::Owned(s) => Cow::Owned(s),
    }
}

/// Replace (or delete) numbers, URLs and mentions, in that order. Digits
/// inside a URL get tagged first; the URL pattern still covers the whole run.
pub fn tag_entities(text: &str, opts: &EntityOptions) -> String {
    let out = Cow::Borrowed(text);
    let out = apply(&RE_NUM, out, opts.num, TAG_NUM);
    let out = apply(&RE_URL, out, opts.url, TAG_URL);
    let out = apply(&RE_USR, out, opts.usr, TAG_USR);
    out.into_owned()
}
