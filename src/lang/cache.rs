// src/lang/cache.rs
//! Populate-once registry of language profiles.
//!
//! One `OnceCell` per language: the first caller builds the profile, racing
//! callers block on the same cell and get the same `Arc`. A failed build
//! leaves the cell empty, so nothing partial is ever published. After that,
//! reads are lock-free.

use crate::error::Result;
use crate::lang::resources::ResourceSource;
use crate::lang::{Language, LanguageProfile};
use crate::telemetry;
use once_cell::sync::{Lazy, OnceCell};
use std::sync::Arc;
use tracing::info;

static GLOBAL: Lazy<ResourceCache> = Lazy::new(|| ResourceCache::new(ResourceSource::from_env()));

#[derive(Debug)]
pub struct ResourceCache {
    source: ResourceSource,
    profiles: [OnceCell<Arc<LanguageProfile>>; 5],
}

impl ResourceCache {
    pub fn new(source: ResourceSource) -> Self {
        Self {
            source,
            profiles: Default::default(),
        }
    }

    /// Process-wide cache reading from `$B4MSA_RESOURCE_DIR` or the bundled
    /// resources (decided on first use).
    pub fn global() -> &'static ResourceCache {
        &GLOBAL
    }

    pub fn source(&self) -> &ResourceSource {
        &self.source
    }

    pub fn profile(&self, language: Language) -> Result<Arc<LanguageProfile>> {
        self.profiles[language.index()]
            .get_or_try_init(|| {
                let profile = LanguageProfile::load(language, &self.source)?;
                info!(target: "textmodel", %language, source = ?self.source, "language profile loaded");
                telemetry::record_profile_loaded();
                Ok(Arc::new(profile))
            })
            .cloned()
    }

    /// Already built, without triggering a load.
    pub fn get(&self, language: Language) -> Option<Arc<LanguageProfile>> {
        self.profiles[language.index()].get().cloned()
    }
}
