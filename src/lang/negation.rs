// src/lang/negation.rs
//! Negation scoping.
//!
//! A negation marker is fused with the first ordinary token to its right
//! (`no bueno` → `no_bueno`). Skip-words (pronouns, clitics, determiners and
//! the language's exception list) and protected class tags are passed over
//! and moved in front of the marker:
//!
//! ```text
//! no se hubiese hecho  →  se hubiese no_hecho
//! ```
//!
//! Pipeline per document:
//! 1. contraction expansion (English: `can't` → `can not`)
//! 2. `any`-licensing (English: `not ... any` → `not ... not`)
//! 3. synonym unification to the canonical marker
//! 4. dedup of consecutive markers (repetition is emphasis, not cancellation)
//! 5. scope fusion, a small state machine over tokens:
//!
//! | state     | token                    | next state | emits                 |
//! |-----------|--------------------------|------------|-----------------------|
//! | Scanning  | marker                   | InScope    | -                     |
//! | Scanning  | other                    | Scanning   | token                 |
//! | InScope / Skipping | skip phrase / tag | Skipping | - (buffered)          |
//! | InScope   | marker                   | InScope    | - (absorbed)          |
//! | Skipping  | marker                   | InScope    | skipped, bare marker  |
//! | InScope / Skipping | punctuation     | Scanning   | skipped, bare marker, token |
//! | InScope / Skipping | ordinary token  | Scanning   | skipped, `marker_token` |
//! | InScope / Skipping | end of stream   | -          | skipped, bare marker  |

use crate::lang::Language;
use crate::stream::{self, Token};
use std::collections::HashSet;

/// Joins the marker and its target.
pub const FUSION: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    Scanning,
    InScope,
    Skipping,
}

/// An open negation scope: the marker and what it has skipped so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegationMatch {
    pub marker: Token,
    pub skipped: Vec<Token>,
}

/// Per-language negation rules. Immutable once built.
#[derive(Debug, Clone)]
pub struct NegationScoper {
    marker: &'static str,
    synonyms: HashSet<String>,
    /// Skip phrases, each one or more lowercase words.
    skip: Vec<Vec<String>>,
    english: bool,
}

const SPANISH_SYNONYMS: &[&str] = &["jamas", "jamás", "nunca", "sin", "ni", "nada"];
const ENGLISH_SYNONYMS: &[&str] = &["not", "no", "never", "nor", "neither"];
const ITALIAN_SYNONYMS: &[&str] = &["mai", "senza", "non", "no", "né", "ne"];
const PORTUGUESE_SYNONYMS: &[&str] = &["jamais", "jamáis", "nunca", "sem", "nem", "nada", "não"];

const SPANISH_SKIP: &[&str] = &["me", "te", "se", "lo", "les", "le", "los"];
const ENGLISH_SKIP: &[&str] = &["me", "you", "he", "she", "it", "us", "the"];
const ITALIAN_SKIP: &[&str] = &[
    "mi", "ti", "lo", "gli", "le", "ne", "li", "glieli", "glielo", "gliela", "gliene", "gliele",
];
const PORTUGUESE_SKIP: &[&str] = &[
    "eu", "voce", "você", "isso", "isto", "o que", "ele", "ela", "eles", "elas", "nos", "o", "a",
];

impl NegationScoper {
    /// Rules for `lang`, with `exceptions` (the `<lang>.neg.stopwords` list)
    /// appended to the built-in skip-words. `None` when the language has no
    /// negation rules.
    pub fn for_language(lang: Language, exceptions: &[String]) -> Option<Self> {
        let (marker, synonyms, builtin): (&'static str, &[&str], &[&str]) = match lang {
            Language::Spanish => ("no", SPANISH_SYNONYMS, SPANISH_SKIP),
            Language::English => ("not", ENGLISH_SYNONYMS, ENGLISH_SKIP),
            Language::Italian => ("no", ITALIAN_SYNONYMS, ITALIAN_SKIP),
            Language::Portuguese => ("nao", PORTUGUESE_SYNONYMS, PORTUGUESE_SKIP),
            Language::German => return None,
        };

        let skip = builtin
            .iter()
            .copied()
            .chain(exceptions.iter().map(String::as_str))
            .map(|p| {
                p.split_whitespace()
                    .map(str::to_lowercase)
                    .collect::<Vec<_>>()
            })
            .filter(|p| !p.is_empty())
            .collect();

        Some(Self {
            marker,
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            skip,
            english: lang == Language::English,
        })
    }

    pub fn marker(&self) -> &'static str {
        self.marker
    }

    /// Stream in, stream out.
    pub fn negate_stream(&self, stream: &str) -> String {
        stream::render(&self.negate(stream::tokens(stream)))
    }

    pub fn negate(&self, tokens: Vec<Token>) -> Vec<Token> {
        let mut tokens = tokens;
        if self.english {
            tokens = expand_contractions(tokens);
            tokens = self.license_any(tokens);
        }
        tokens = self.unify(tokens);
        tokens = self.dedup(tokens);
        self.fuse(tokens)
    }

    fn is_marker(&self, tok: &Token) -> bool {
        tok.text.eq_ignore_ascii_case(self.marker)
    }

    /// `not ... any` inside one clause: the first `any` becomes a marker.
    fn license_any(&self, tokens: Vec<Token>) -> Vec<Token> {
        let mut licensed = false;
        tokens
            .into_iter()
            .map(|mut t| {
                let lower = t.text.to_lowercase();
                if lower == "not" {
                    licensed = true;
                } else if licensed && lower == "any" {
                    t.text = self.marker.to_string();
                    licensed = false;
                } else if is_punctuation(&t.text) {
                    licensed = false;
                }
                t
            })
            .collect()
    }

    fn unify(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .map(|mut t| {
                if self.synonyms.contains(&t.text.to_lowercase()) {
                    t.text = self.marker.to_string();
                }
                t
            })
            .collect()
    }

    fn dedup(&self, tokens: Vec<Token>) -> Vec<Token> {
        let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
        for t in tokens {
            if self.is_marker(&t) && out.last().is_some_and(|p| self.is_marker(p)) {
                continue;
            }
            out.push(t);
        }
        out
    }

    /// Length (in tokens) of the longest skip phrase starting at `rest[0]`.
    fn skip_len(&self, rest: &[Token]) -> usize {
        self.skip
            .iter()
            .filter(|phrase| {
                phrase.len() <= rest.len()
                    && phrase
                        .iter()
                        .zip(rest)
                        .all(|(w, t)| t.text.to_lowercase() == *w)
            })
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }

    fn fuse(&self, tokens: Vec<Token>) -> Vec<Token> {
        let mut out = Vec::with_capacity(tokens.len());
        let mut state = ScopeState::Scanning;
        let mut scope: Option<NegationMatch> = None;
        let mut i = 0;

        while i < tokens.len() {
            let tok = &tokens[i];
            match state {
                ScopeState::Scanning => {
                    if self.is_marker(tok) {
                        scope = Some(NegationMatch {
                            marker: bare_marker(tok, self.marker),
                            skipped: Vec::new(),
                        });
                        state = ScopeState::InScope;
                    } else {
                        out.push(tok.clone());
                    }
                    i += 1;
                }
                ScopeState::InScope | ScopeState::Skipping => {
                    let Some(m) = scope.as_mut() else {
                        state = ScopeState::Scanning;
                        continue;
                    };
                    let n = self.skip_len(&tokens[i..]);
                    if n > 0 {
                        m.skipped.extend_from_slice(&tokens[i..i + n]);
                        state = ScopeState::Skipping;
                        i += n;
                        continue;
                    }
                    if stream::is_class_tag(&tok.text.to_lowercase()) {
                        m.skipped.push(tok.clone());
                        state = ScopeState::Skipping;
                        i += 1;
                        continue;
                    }

                    // A repeated marker right after the opening one is absorbed.
                    if state == ScopeState::InScope && self.is_marker(tok) {
                        i += 1;
                        continue;
                    }

                    let Some(m) = scope.take() else { continue };
                    if self.is_marker(tok) {
                        close_bare(m, &mut out);
                        scope = Some(NegationMatch {
                            marker: bare_marker(tok, self.marker),
                            skipped: Vec::new(),
                        });
                        state = ScopeState::InScope;
                    } else if is_punctuation(&tok.text) {
                        close_bare(m, &mut out);
                        out.push(tok.clone());
                        state = ScopeState::Scanning;
                    } else {
                        out.extend(m.skipped);
                        out.push(Token {
                            text: format!("{}{FUSION}{}", m.marker.text, tok.text),
                            tag: tok.tag.clone(),
                        });
                        state = ScopeState::Scanning;
                    }
                    i += 1;
                }
            }
        }

        if let Some(m) = scope {
            close_bare(m, &mut out);
        }
        out
    }
}

fn bare_marker(tok: &Token, marker: &str) -> Token {
    Token {
        text: marker.to_string(),
        tag: tok.tag.clone(),
    }
}

/// Scope closed without a target: skipped words, then the marker alone.
fn close_bare(m: NegationMatch, out: &mut Vec<Token>) {
    out.extend(m.skipped);
    out.push(m.marker);
}

/// Tokens without any alphanumeric char close a scope.
fn is_punctuation(tok: &str) -> bool {
    !tok.chars().any(char::is_alphanumeric)
}

fn expand_contractions(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        match split_contraction(&t.text) {
            Some(head) => {
                out.push(Token {
                    text: head,
                    tag: t.tag,
                });
                out.push(Token::new("not"));
            }
            None => out.push(t),
        }
    }
    out
}

/// `can't` → `can`, `won't` → `will`, `shan't` → `shall`, `cannot` → `can`,
/// `Xn't` → `X`. Keeps the casing of the leading letters.
fn split_contraction(word: &str) -> Option<String> {
    let w = word.replace('\u{2019}', "'");
    let lower = w.to_lowercase();
    let head = |n: usize| w.chars().take(n).collect::<String>();
    match lower.as_str() {
        "can't" => Some(head(2) + "n"),
        "won't" => Some(head(1) + "ill"),
        "shan't" => Some(head(3) + "ll"),
        "cannot" => Some(head(3)),
        _ => {
            let stem = lower.strip_suffix("n't")?;
            if stem.is_empty() || !stem.chars().all(|c| c.is_ascii_alphabetic()) {
                return None;
            }
            Some(head(stem.chars().count()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scoper(lang: Language, extra: &[&str]) -> NegationScoper {
        let extra: Vec<String> = extra.iter().map(|s| s.to_string()).collect();
        NegationScoper::for_language(lang, &extra).unwrap()
    }

    #[test]
    fn spanish_fuses_across_skip_words() {
        let s = scoper(Language::Spanish, &["hubiese", "hubiesen", "al"]);
        assert_eq!(
            s.negate_stream("~que~no~se~hubiese~hecho~nada~al~respecto~"),
            "~que~se~hubiese~no_hecho~al~no_respecto~"
        );
    }

    #[test]
    fn synonyms_unify_and_repeats_collapse() {
        let s = scoper(Language::Spanish, &[]);
        assert_eq!(s.negate_stream("~nunca~jamas~no~vuelvo~"), "~no_vuelvo~");
        assert_eq!(s.negate_stream("~Nunca~Vuelvo~"), "~no_Vuelvo~");
    }

    #[test]
    fn protected_tags_are_skipped_not_fused() {
        let s = scoper(Language::Spanish, &[]);
        assert_eq!(
            s.negate_stream("~no~_usr~_num~me~gusta~"),
            "~_usr~_num~me~no_gusta~"
        );
    }

    #[test]
    fn isolated_markers_stay_bare() {
        let s = scoper(Language::Spanish, &[]);
        assert_eq!(s.negate_stream("~dije~que~no~"), "~dije~que~no~");
        assert_eq!(s.negate_stream("~no~se~"), "~se~no~");
        assert_eq!(s.negate_stream("~no~!~bien~"), "~no~!~bien~");
        assert_eq!(s.negate_stream("~no~_pos~"), "~_pos~no~");
    }

    #[test]
    fn fusion_absorbs_adjacent_markers_but_not_separated_ones() {
        let s = scoper(Language::Spanish, &[]);
        let fused = |st: &str| stream::render(&s.fuse(stream::tokens(st)));
        assert_eq!(fused("~no~no~bueno~"), "~no_bueno~");
        assert_eq!(fused("~no~se~no~hecho~"), "~se~no~no_hecho~");
    }

    #[test]
    fn marker_after_skip_words_restarts_scope() {
        let s = scoper(Language::Spanish, &[]);
        assert_eq!(s.negate_stream("~no~se~no~hecho~"), "~se~no~no_hecho~");
    }

    #[test]
    fn fusion_target_is_monotonic_in_skip_words() {
        let s = scoper(Language::Spanish, &[]);
        let mut skipped = Vec::new();
        for w in ["me", "te", "se", "lo", "_url"] {
            skipped.push(w);
            let stream = stream::join(
                std::iter::once("no")
                    .chain(skipped.iter().copied())
                    .chain(["gusta", "mucho"]),
            );
            let out = s.negate(stream::tokens(&stream));
            let fused: Vec<&str> = out
                .iter()
                .map(|t| t.text.as_str())
                .filter(|t| t.starts_with("no_"))
                .collect();
            assert_eq!(fused, vec!["no_gusta"]);
            assert_eq!(out.len(), skipped.len() + 2);
        }
    }

    #[test]
    fn english_contractions_and_any() {
        let s = scoper(Language::English, &[]);
        assert_eq!(s.negate_stream("~i~don't~like~it~"), "~i~do~not_like~it~");
        assert_eq!(s.negate_stream("~this~is~not~any~good~"), "~this~is~not_good~");
        assert_eq!(
            s.negate_stream("~you~can't~have~any~fun~"),
            "~you~can~not_have~not_fun~"
        );
        assert_eq!(s.negate_stream("~Won’t~go~"), "~Will~not_go~");
        assert_eq!(s.negate_stream("~never~the~_usr~problem~"), "~the~_usr~not_problem~");
    }

    #[test]
    fn any_outside_negated_clause_is_kept() {
        let s = scoper(Language::English, &[]);
        assert_eq!(s.negate_stream("~any~idea~"), "~any~idea~");
        assert_eq!(
            s.negate_stream("~not~now~,~any~time~"),
            "~not_now~,~any~time~"
        );
    }

    #[test]
    fn italian_ne_is_a_marker() {
        let s = scoper(Language::Italian, &[]);
        assert_eq!(
            s.negate_stream("~come~non~condividere~;~me~ne~frega~niente~"),
            "~come~no_condividere~;~me~no_frega~niente~"
        );
    }

    #[test]
    fn portuguese_multiword_skip_phrase() {
        let s = scoper(Language::Portuguese, &[]);
        assert_eq!(s.negate_stream("~nunca~o~que~quero~"), "~o~que~nao_quero~");
        assert_eq!(s.negate_stream("~sem~ele~"), "~ele~nao~");
    }

    #[test]
    fn german_has_no_rules() {
        assert!(NegationScoper::for_language(Language::German, &[]).is_none());
    }

    #[test]
    fn tags_follow_the_target() {
        let s = scoper(Language::Portuguese, &[]);
        let out = s.negate(vec![
            Token::tagged("nao", "RN"),
            Token::tagged("gostar", "VMN0000"),
        ]);
        assert_eq!(out, vec![Token::tagged("nao_gostar", "VMN0000")]);
    }
}
