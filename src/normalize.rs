// src/normalize.rs
//! Character-level normalization into a tilde-delimited stream.
//!
//! - NFD decomposition, optional removal of combining marks (U+0300..=U+036F)
//! - any Unicode whitespace (and stray separators) becomes a single `~`
//! - optional collapsing of consecutive duplicate characters
//! - a letter followed by `! ? . , ;` gets a separator in between
//!
//! The output is idempotent: feeding it back yields the same stream.

use crate::stream::SEP;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub strip_diac: bool,
    pub del_dup1: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            strip_diac: true,
            del_dup1: true,
        }
    }
}

#[inline]
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

#[inline]
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == SEP
}

#[inline]
fn is_terminal_punct(c: char) -> bool {
    matches!(c, '!' | '?' | '.' | ',' | ';')
}

pub fn normalize_chars(text: &str, opts: &NormalizeOptions) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(SEP);
    let mut prev = SEP;

    for c in text.nfd() {
        if opts.strip_diac && is_combining_mark(c) {
            continue;
        }
        let c = if is_blank(c) { SEP } else { c };

        if c == SEP {
            if prev != SEP {
                out.push(SEP);
                prev = SEP;
            }
            continue;
        }
        if opts.del_dup1 && c == prev {
            continue;
        }
        if is_terminal_punct(c) && prev.is_ascii_alphabetic() {
            out.push(SEP);
        }
        out.push(c);
        prev = c;
    }

    if prev != SEP {
        out.push(SEP);
    } else if out.len() == SEP.len_utf8() {
        // empty body: `~~`
        out.push(SEP);
    }
    out
}
