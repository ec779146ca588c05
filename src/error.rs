// src/error.rs
//! Library error type. Only configuration and resource problems are fatal;
//! malformed document text never produces an error.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Language tag outside the supported set.
    #[error("language not supported: {language}")]
    UnsupportedLanguage { language: String },

    /// The language exists but has no implementation of `operation`
    /// (e.g. lemmatizing English, negation for German).
    #[error("{operation} is not implemented for {language}")]
    UnsupportedOperation {
        operation: &'static str,
        language: String,
    },

    #[error("resource file not found: {}", path.display())]
    MissingResourceFile { path: PathBuf },

    #[error("malformed line {line} in {source_name}: {content:?}")]
    MalformedResourceLine {
        source_name: String,
        line: usize,
        content: String,
    },

    /// Lemmatizing was requested but no lemmatizer was injected.
    #[error("lemmatizing requested but no lemmatizer is configured")]
    MissingLemmatizer,

    #[error("lemmatizer failed: {0}")]
    Lemmatizer(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
