// src/config.rs
//! Tokenizer configuration (`TextModelConfig`), loadable from TOML or JSON.
//!
//! Resolution for [`TextModelConfig::load_default`]:
//! 1) `$B4MSA_CONFIG_PATH`
//! 2) `config/textmodel.toml`
//! 3) `config/textmodel.json`
//! 4) built-in defaults

use crate::lang::Language;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "B4MSA_CONFIG_PATH";
pub const DEFAULT_TOML_PATH: &str = "config/textmodel.toml";
pub const DEFAULT_JSON_PATH: &str = "config/textmodel.json";

/// What to do with a matched class of content (numbers, mentions, emoticons,
/// stopwords, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOption {
    /// Remove the match.
    Delete,
    /// Replace the match with its class tag.
    #[default]
    Group,
    /// Leave it alone.
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextModelConfig {
    pub strip_diac: bool,
    pub num_option: FilterOption,
    pub usr_option: FilterOption,
    pub url_option: FilterOption,
    pub emo_option: FilterOption,
    /// Lowercase the input before anything else.
    pub lc: bool,
    pub del_dup1: bool,
    /// Negative entries: word q-grams of size `|q|`; others: char q-grams.
    pub token_list: Vec<i32>,
    /// `None` disables every language-dependent stage.
    pub lang: Option<Language>,
    pub negation: bool,
    pub stemming: bool,
    pub stopwords: FilterOption,
    pub correction: bool,
    pub lemmatize: bool,
    pub del_ent: bool,
}

impl Default for TextModelConfig {
    fn default() -> Self {
        Self {
            strip_diac: true,
            num_option: FilterOption::Group,
            usr_option: FilterOption::Group,
            url_option: FilterOption::Group,
            emo_option: FilterOption::Group,
            lc: true,
            del_dup1: true,
            token_list: vec![-1],
            lang: None,
            negation: false,
            stemming: false,
            stopwords: FilterOption::None,
            correction: false,
            lemmatize: false,
            del_ent: false,
        }
    }
}

impl TextModelConfig {
    /// Convenience: defaults with a language set.
    pub fn for_language(lang: Language) -> Self {
        Self {
            lang: Some(lang),
            ..Self::default()
        }
    }

    /// Load from an explicit path. The extension picks the format; content
    /// that fails to parse in the hinted format is retried in the other one.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading textmodel config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::parse(&content, ext.as_str())
            .with_context(|| format!("parsing textmodel config {}", path.display()))
    }

    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from_file(&pb);
            } else {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
        }
        for candidate in [DEFAULT_TOML_PATH, DEFAULT_JSON_PATH] {
            let p = PathBuf::from(candidate);
            if p.exists() {
                return Self::load_from_file(&p);
            }
        }
        Ok(Self::default())
    }

    fn parse(s: &str, hint_ext: &str) -> Result<Self> {
        if hint_ext == "json" {
            return match serde_json::from_str::<Self>(s) {
                Ok(cfg) => Ok(cfg),
                Err(json_err) => {
                    toml::from_str::<Self>(s).map_err(|_| anyhow::Error::from(json_err))
                }
            };
        }
        match toml::from_str::<Self>(s) {
            Ok(cfg) => Ok(cfg),
            Err(toml_err) => {
                serde_json::from_str::<Self>(s).map_err(|_| anyhow::Error::from(toml_err))
            }
        }
    }
}
