// src/lang/mod.rs
//! Language-dependent processing: the closed set of supported languages,
//! their immutable profiles (stopwords, negation rules, stemmer, dictionary)
//! and the process-wide cache that builds each profile once.

pub mod cache;
pub mod correction;
pub mod negation;
pub mod resources;

use crate::error::{Error, Result};
use crate::lang::negation::NegationScoper;
use crate::lang::resources::ResourceSource;
use crate::stream::{self, Token};
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

// Re-export convenient types.
pub use crate::lang::cache::ResourceCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    Spanish,
    English,
    Italian,
    German,
    Portuguese,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Spanish,
        Language::English,
        Language::Italian,
        Language::German,
        Language::Portuguese,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Language::Spanish => "spanish",
            Language::English => "english",
            Language::Italian => "italian",
            Language::German => "german",
            Language::Portuguese => "portuguese",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    fn stem_algorithm(self) -> Algorithm {
        match self {
            Language::Spanish => Algorithm::Spanish,
            Language::English => Algorithm::English,
            Language::Italian => Algorithm::Italian,
            Language::German => Algorithm::German,
            Language::Portuguese => Algorithm::Portuguese,
        }
    }

    pub fn supports_negation(self) -> bool {
        self != Language::German
    }

    pub fn supports_correction(self) -> bool {
        self == Language::Portuguese
    }

    pub fn supports_lemmatizing(self) -> bool {
        self == Language::Portuguese
    }

    fn unsupported(self, operation: &'static str) -> Error {
        Error::UnsupportedOperation {
            operation,
            language: self.name().to_string(),
        }
    }

    /// Fail fast when `operation` has no implementation for this language.
    pub fn require(self, operation: &'static str, supported: bool) -> Result<()> {
        if supported {
            Ok(())
        } else {
            Err(self.unsupported(operation))
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = Error;

    /// Full names and ISO 639-1 codes, case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spanish" | "es" => Ok(Language::Spanish),
            "english" | "en" => Ok(Language::English),
            "italian" | "it" => Ok(Language::Italian),
            "german" | "de" => Ok(Language::German),
            "portuguese" | "pt" => Ok(Language::Portuguese),
            _ => Err(Error::UnsupportedLanguage {
                language: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Language {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Language> for String {
    fn from(l: Language) -> Self {
        l.name().to_string()
    }
}

/// Known-word and abbreviation lookups used by spelling correction.
pub trait Dictionary {
    fn is_known(&self, word: &str) -> bool;
    fn expand(&self, abbrev: &str) -> Option<&[String]>;
}

/// Everything language-dependent, loaded once and never mutated.
pub struct LanguageProfile {
    language: Language,
    stopwords: HashSet<String>,
    negation: Option<NegationScoper>,
    stemmer: Stemmer,
    dictionary: Option<HashSet<String>>,
    abbreviations: Option<HashMap<String, Vec<String>>>,
}

impl fmt::Debug for LanguageProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageProfile")
            .field("language", &self.language)
            .field("stopwords", &self.stopwords.len())
            .field("negation", &self.negation.is_some())
            .field("dictionary", &self.dictionary.as_ref().map(HashSet::len))
            .field("abbreviations", &self.abbreviations.as_ref().map(HashMap::len))
            .finish()
    }
}

impl LanguageProfile {
    /// Read every resource the language needs. Any missing or malformed file
    /// aborts the whole profile.
    pub fn load(language: Language, source: &ResourceSource) -> Result<Self> {
        let name = language.name();
        let stopwords = source
            .word_list(&format!("{name}.stopwords"))?
            .into_iter()
            .collect();

        let negation = if language.supports_negation() {
            let exceptions = source.word_list(&format!("{name}.neg.stopwords"))?;
            NegationScoper::for_language(language, &exceptions)
        } else {
            None
        };

        let (dictionary, abbreviations) = if language.supports_correction() {
            let words = source
                .word_list(&format!("{name}.dictionary"))?
                .into_iter()
                .collect();
            let abbrev = source.abbreviations(&format!("{name}.abbreviations"))?;
            (Some(words), Some(abbrev))
        } else {
            (None, None)
        };

        Ok(Self {
            language,
            stopwords,
            negation,
            stemmer: Stemmer::create(language.stem_algorithm()),
            dictionary,
            abbreviations,
        })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn negation(&self) -> Option<&NegationScoper> {
        self.negation.as_ref()
    }

    /// Negation scoping; errors for languages without rules.
    pub fn negate(&self, tokens: Vec<Token>) -> Result<Vec<Token>> {
        match &self.negation {
            Some(scoper) => Ok(scoper.negate(tokens)),
            None => Err(self.language.unsupported("negation")),
        }
    }

    /// Stem one word. Protected tokens (`@`, `#`, `_`, `~` prefixes) pass
    /// through unchanged.
    pub fn stem(&self, word: &str) -> String {
        if stream::is_protected_token(word) {
            return word.to_string();
        }
        self.stemmer.stem(word).into_owned()
    }

    pub fn correct(&self, tokens: Vec<Token>) -> Result<Vec<Token>> {
        if self.dictionary.is_none() {
            return Err(self.language.unsupported("error correction"));
        }
        Ok(correction::correct_tokens(tokens, self))
    }
}

impl Dictionary for LanguageProfile {
    fn is_known(&self, word: &str) -> bool {
        self.dictionary.as_ref().is_some_and(|d| d.contains(word))
    }

    fn expand(&self, abbrev: &str) -> Option<&[String]> {
        self.abbreviations
            .as_ref()
            .and_then(|a| a.get(abbrev))
            .map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_codes() {
        assert_eq!("Spanish".parse::<Language>().unwrap(), Language::Spanish);
        assert_eq!("pt".parse::<Language>().unwrap(), Language::Portuguese);
        let err = "klingon".parse::<Language>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedLanguage { ref language } if language == "klingon"));
    }

    #[test]
    fn bundled_profiles_load() {
        for lang in Language::ALL {
            let p = LanguageProfile::load(lang, &ResourceSource::Bundled).unwrap();
            assert_eq!(p.language(), lang);
            assert_eq!(p.negation().is_some(), lang.supports_negation());
        }
    }

    #[test]
    fn stemming_skips_protected_tokens() {
        let p = LanguageProfile::load(Language::Spanish, &ResourceSource::Bundled).unwrap();
        assert_eq!(p.stem("_usr"), "_usr");
        assert_eq!(p.stem("#hashtag"), "#hashtag");
        assert!(p.stem("permitido").starts_with("permit"));
    }

    #[test]
    fn unsupported_operations_fail() {
        let p = LanguageProfile::load(Language::German, &ResourceSource::Bundled).unwrap();
        assert!(matches!(
            p.negate(stream::tokens("~nicht~gut~")),
            Err(Error::UnsupportedOperation { operation: "negation", .. })
        ));
        let p = LanguageProfile::load(Language::English, &ResourceSource::Bundled).unwrap();
        assert!(p.correct(Vec::new()).is_err());
    }

    #[test]
    fn portuguese_dictionary_lookups() {
        let p = LanguageProfile::load(Language::Portuguese, &ResourceSource::Bundled).unwrap();
        assert!(p.is_known("carro"));
        assert_eq!(p.expand("pq"), Some(&["porque".to_string()][..]));
    }
}
