// src/textmodel.rs
//! `TextModel`: the configured tokenizer.
//!
//! ```text
//! lowercase → entities → normalize → emoticons
//!   → [correction → lemmatize → negation → entity filter → stopwords → stem]
//!   → q-gram expansion
//! ```
//!
//! The bracketed stages run only when a language is configured. Every
//! option/language mismatch is rejected when the model is built, never while
//! tokenizing.

use crate::assemble;
use crate::config::{FilterOption, TextModelConfig};
use crate::emoticon::EmoticonTable;
use crate::entity::{self, EntityOptions};
use crate::error::{Error, Result};
use crate::lang::{Language, LanguageProfile, ResourceCache};
use crate::normalize::{self, NormalizeOptions};
use crate::stream::{self, Token, SEP};
use crate::telemetry;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// One analyzed word as returned by a morphological analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lemma {
    pub form: String,
    pub lemma: String,
    pub tag: String,
}

/// Morphological analyzer seam (lemma + part-of-speech tag per word).
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, text: &str, language: Language) -> Result<Vec<Lemma>>;
}

/// Token membership seam for the vector-space model.
pub trait Vocabulary {
    fn contains(&self, token: &str) -> bool;
}

impl Vocabulary for HashSet<String> {
    fn contains(&self, token: &str) -> bool {
        HashSet::contains(self, token)
    }
}

pub struct TextModelBuilder<'a> {
    config: TextModelConfig,
    lemmatizer: Option<Arc<dyn Lemmatizer>>,
    emoticons: Option<Arc<EmoticonTable>>,
    cache: Option<&'a ResourceCache>,
}

impl<'a> TextModelBuilder<'a> {
    pub fn lemmatizer(mut self, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        self.lemmatizer = Some(lemmatizer);
        self
    }

    /// Replace the bundled emoticon table.
    pub fn emoticons(mut self, table: Arc<EmoticonTable>) -> Self {
        self.emoticons = Some(table);
        self
    }

    /// Read language profiles from `cache` instead of the global one.
    pub fn resource_cache(mut self, cache: &'a ResourceCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(self) -> Result<TextModel> {
        let config = self.config;
        let profile = match config.lang {
            Some(lang) => {
                lang.require("negation", !config.negation || lang.supports_negation())?;
                lang.require("error correction", !config.correction || lang.supports_correction())?;
                lang.require("lemmatizing", !config.lemmatize || lang.supports_lemmatizing())?;
                if config.lemmatize && self.lemmatizer.is_none() {
                    return Err(Error::MissingLemmatizer);
                }
                let cache = self.cache.unwrap_or_else(|| ResourceCache::global());
                Some(cache.profile(lang)?)
            }
            None => {
                if config.negation
                    || config.stemming
                    || config.correction
                    || config.lemmatize
                    || config.del_ent
                    || config.stopwords != FilterOption::None
                {
                    warn!(
                        target: "textmodel",
                        "language-dependent options set without a language; they are ignored"
                    );
                }
                None
            }
        };

        Ok(TextModel {
            entity: EntityOptions {
                num: config.num_option,
                url: config.url_option,
                usr: config.usr_option,
            },
            normalize: NormalizeOptions {
                strip_diac: config.strip_diac,
                del_dup1: config.del_dup1,
            },
            emoticons: self.emoticons.unwrap_or_else(EmoticonTable::bundled),
            lemmatizer: if config.lemmatize { self.lemmatizer } else { None },
            profile,
            config,
        })
    }
}

/// Configured tokenizer. Immutable, `Send + Sync`.
pub struct TextModel {
    config: TextModelConfig,
    entity: EntityOptions,
    normalize: NormalizeOptions,
    emoticons: Arc<EmoticonTable>,
    profile: Option<Arc<LanguageProfile>>,
    lemmatizer: Option<Arc<dyn Lemmatizer>>,
}

impl TextModel {
    pub fn new(config: TextModelConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn builder<'a>(config: TextModelConfig) -> TextModelBuilder<'a> {
        TextModelBuilder {
            config,
            lemmatizer: None,
            emoticons: None,
            cache: None,
        }
    }

    pub fn config(&self) -> &TextModelConfig {
        &self.config
    }

    pub fn language(&self) -> Option<Language> {
        self.profile.as_ref().map(|p| p.language())
    }

    /// Every stage up to (not including) q-gram expansion.
    pub fn text_transformations(&self, text: &str) -> Result<String> {
        let text = if self.config.lc {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let text = entity::tag_entities(&text, &self.entity);
        let stream = normalize::normalize_chars(&text, &self.normalize);
        let stream = self.emoticons.replace(&stream, self.config.emo_option);

        match &self.profile {
            Some(profile) => self.language_stages(profile, stream),
            None => Ok(stream),
        }
    }

    fn language_stages(&self, profile: &LanguageProfile, stream: String) -> Result<String> {
        let cfg = &self.config;
        let mut tokens = stream::tokens(&stream);

        if cfg.correction {
            tokens = profile.correct(tokens)?;
        }
        if let Some(lemmatizer) = &self.lemmatizer {
            tokens = annotate(lemmatizer.as_ref(), profile.language(), &tokens)?;
        }
        if cfg.negation {
            tokens = profile.negate(tokens)?;
        }
        if cfg.del_ent {
            tokens = assemble::filter_entities(tokens);
        }
        tokens = assemble::filter_stopwords(tokens, cfg.stopwords, |w| profile.is_stopword(w));

        let mut words = assemble::strip_annotations(tokens);
        if cfg.stemming {
            for w in words.iter_mut() {
                *w = profile.stem(w);
            }
        }
        Ok(stream::join(words))
    }

    pub fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let stream = self.text_transformations(text)?;
        let tokens = assemble::expand(&self.config.token_list, &stream);
        telemetry::record_document(text, stream.len(), tokens.len());
        Ok(tokens)
    }

    /// Tokens plus the share of distinct in-vocabulary tokens among all
    /// tokens (0 for an empty token list).
    pub fn tokenize_with_ratio(
        &self,
        text: &str,
        vocabulary: &dyn Vocabulary,
    ) -> Result<(Vec<String>, f64)> {
        let tokens = self.tokenize(text)?;
        if tokens.is_empty() {
            return Ok((tokens, 0.0));
        }
        let known: HashSet<&str> = tokens
            .iter()
            .map(String::as_str)
            .filter(|t| vocabulary.contains(t))
            .collect();
        let ratio = known.len() as f64 / tokens.len() as f64;
        Ok((tokens, ratio))
    }
}

/// Replace tokens by lemmatizer output, tagged. A lemma that would break the
/// stream (or the analyzer's own `lemma/tag` notation) falls back to the form.
fn annotate(lemmatizer: &dyn Lemmatizer, language: Language, tokens: &[Token]) -> Result<Vec<Token>> {
    if tokens.is_empty() {
        return Ok(Vec::new());
    }
    let text = tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let lemmas = lemmatizer.lemmatize(&text, language)?;
    Ok(lemmas
        .into_iter()
        .filter_map(|l| {
            let word = if l.lemma.is_empty() || l.lemma.contains(|c| c == '/' || c == SEP) {
                l.form
            } else {
                l.lemma
            };
            let word: String = word.split_whitespace().collect::<Vec<_>>().join("_");
            (!word.is_empty()).then(|| Token::tagged(word, l.tag))
        })
        .collect())
}

impl fmt::Debug for TextModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextModel")
            .field("config", &self.config)
            .field("profile", &self.profile)
            .field("emoticons", &self.emoticons.len())
            .field("lemmatizer", &self.lemmatizer.is_some())
            .finish()
    }
}

fn option_name(o: FilterOption) -> &'static str {
    match o {
        FilterOption::Delete => "delete",
        FilterOption::Group => "group",
        FilterOption::None => "none",
    }
}

impl fmt::Display for TextModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.config;
        write!(
            f,
            "[TextModel strip_diac={} num={} usr={} url={} emo={} lc={} del_dup1={} token_list={:?} lang={}",
            c.strip_diac,
            option_name(c.num_option),
            option_name(c.usr_option),
            option_name(c.url_option),
            option_name(c.emo_option),
            c.lc,
            c.del_dup1,
            c.token_list,
            c.lang.map_or("none", Language::name),
        )?;
        if c.lang.is_some() {
            write!(
                f,
                " negation={} stemming={} stopwords={} correction={} lemmatize={} del_ent={}",
                c.negation,
                c.stemming,
                option_name(c.stopwords),
                c.correction,
                c.lemmatize,
                c.del_ent,
            )?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl Lemmatizer for Upper {
        fn lemmatize(&self, text: &str, _language: Language) -> Result<Vec<Lemma>> {
            Ok(text
                .split_whitespace()
                .map(|w| Lemma {
                    form: w.to_string(),
                    lemma: if w == "cantava" { "cantar".into() } else { format!("{w}/x") },
                    tag: if w == "joao" { "NP00000".into() } else { "VMII3S0".into() },
                })
                .collect())
        }
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn model_is_shareable() {
        assert_send_sync::<TextModel>();
    }

    #[test]
    fn empty_text_gives_empty_stream() {
        let m = TextModel::new(TextModelConfig::default()).unwrap();
        assert_eq!(m.text_transformations("").unwrap(), "~~");
        assert!(m.tokenize("").unwrap().is_empty());
    }

    #[test]
    fn annotate_falls_back_to_form() {
        let toks = stream::tokens("~joao~cantava~bem~");
        let out = annotate(&Upper, Language::Portuguese, &toks).unwrap();
        assert_eq!(out[0], Token::tagged("joao", "NP00000"));
        assert_eq!(out[1].text, "cantar");
        assert_eq!(out[2].text, "bem");
    }

    #[test]
    fn lemmatize_then_drop_entities() {
        let cfg = TextModelConfig {
            lang: Some(Language::Portuguese),
            lemmatize: true,
            del_ent: true,
            ..TextModelConfig::default()
        };
        let m = TextModel::builder(cfg).lemmatizer(Arc::new(Upper)).build().unwrap();
        assert_eq!(m.tokenize("Joao cantava bem").unwrap(), vec!["cantar", "bem"]);
    }

    #[test]
    fn lemmatizing_needs_an_analyzer() {
        let cfg = TextModelConfig {
            lang: Some(Language::Portuguese),
            lemmatize: true,
            ..TextModelConfig::default()
        };
        assert!(matches!(TextModel::new(cfg), Err(Error::MissingLemmatizer)));
    }

    #[test]
    fn display_lists_options() {
        let m = TextModel::new(TextModelConfig::for_language(Language::Spanish)).unwrap();
        let s = m.to_string();
        assert!(s.starts_with("[TextModel "));
        assert!(s.contains("lang=spanish"));
        assert!(s.contains("token_list=[-1]"));
        assert!(s.contains("stopwords=none"));
    }
}
