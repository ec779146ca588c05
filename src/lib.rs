// src/lib.rs
// Public library surface for integration tests (and reuse).

pub mod assemble;
pub mod config;
pub mod emoticon;
pub mod entity;
pub mod error;
pub mod lang;
pub mod normalize;
pub mod stream;
pub mod telemetry;
pub mod textmodel;

// ---- Re-exports for stable public API ----
pub use crate::config::{FilterOption, TextModelConfig};
pub use crate::emoticon::{EmoticonRecord, EmoticonTable, Sentiment};
pub use crate::error::{Error, Result};
pub use crate::lang::resources::ResourceSource;
pub use crate::lang::{Dictionary, Language, LanguageProfile, ResourceCache};
pub use crate::textmodel::{Lemma, Lemmatizer, TextModel, TextModelBuilder, Vocabulary};
