// src/assemble.rs
//! Final token assembly: entity/stopword filtering on the annotated token
//! sequence, then q-gram expansion of the resulting stream.

use crate::config::FilterOption;
use crate::stream::{Token, SEP, TAG_STOPWORD};

/// Characters treated as blanks when splitting a stream into words.
const WORD_BREAKS: &[char] = &[
    ';', ':', ',', '.', '@', '\\', '-', '"', '\'', '/', '(', ')', '[', ']', '¿', '?', '¡', '!',
    '{', '}', SEP,
];

/// Drop proper nouns (annotation tag starting with `NP`).
pub fn filter_entities(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .filter(|t| !t.tag.as_deref().is_some_and(|tag| tag.starts_with("NP")))
        .collect()
}

/// Determiners and pronouns (`D*`, `P*`) count as stopwords when annotated.
fn is_function_word(tag: Option<&str>) -> bool {
    tag.is_some_and(|t| t.starts_with('D') || t.starts_with('P'))
}

/// Delete stopwords, or replace them by [`TAG_STOPWORD`] (tag kept).
pub fn filter_stopwords<F>(tokens: Vec<Token>, option: FilterOption, is_stopword: F) -> Vec<Token>
where
    F: Fn(&str) -> bool,
{
    if option == FilterOption::None {
        return tokens;
    }
    let mut out = Vec::with_capacity(tokens.len());
    for mut t in tokens {
        let stop = is_stopword(&t.text.to_lowercase()) || is_function_word(t.tag.as_deref());
        if !stop {
            out.push(t);
        } else if option == FilterOption::Group {
            t.text = TAG_STOPWORD.to_string();
            out.push(t);
        }
    }
    out
}

pub fn strip_annotations(tokens: Vec<Token>) -> Vec<String> {
    tokens.into_iter().map(|t| t.text).collect()
}

/// Words of a stream, with punctuation, `@` and the separator as blanks.
pub fn word_list(stream: &str) -> Vec<String> {
    stream
        .split(|c: char| c.is_whitespace() || WORD_BREAKS.contains(&c))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Character q-grams, sliding window of `q` chars with step 1.
pub fn expand_qgrams(text: &str, q: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if q == 0 || q > chars.len() {
        return Vec::new();
    }
    chars.windows(q).map(|w| w.iter().collect()).collect()
}

/// Word q-grams joined by `~`.
pub fn expand_qgrams_word_list<S: AsRef<str>>(words: &[S], q: usize) -> Vec<String> {
    if q == 0 || q > words.len() {
        return Vec::new();
    }
    words
        .windows(q)
        .map(|w| {
            let mut gram = String::new();
            for (i, word) in w.iter().enumerate() {
                if i > 0 {
                    gram.push(SEP);
                }
                gram.push_str(word.as_ref());
            }
            gram
        })
        .collect()
}

/// Expand `stream` for every entry of `token_list`, in order: negative
/// entries give word q-grams of size `|q|`, the rest char q-grams.
pub fn expand(token_list: &[i32], stream: &str) -> Vec<String> {
    let mut words: Option<Vec<String>> = None;
    let mut out = Vec::new();
    for &q in token_list {
        if q < 0 {
            let words = words.get_or_insert_with(|| word_list(stream));
            out.extend(expand_qgrams_word_list(words.as_slice(), q.unsigned_abs() as usize));
        } else {
            out.extend(expand_qgrams(stream, q as usize));
        }
    }
    out
}
