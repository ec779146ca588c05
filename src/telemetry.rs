// src/telemetry.rs
//! Tracing and metrics plumbing shared by the tokenizer stages.
//!
//! Per-document events are opt-in (`B4MSA_DEV_LOG=1` in a dev environment)
//! and carry a short hash of the input instead of the text itself.

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_DEV_LOG: &str = "B4MSA_DEV_LOG";
pub const ENV_DEV_ENV: &str = "B4MSA_ENV";

pub const DOCUMENTS_TOTAL: &str = "textmodel_documents_total";
pub const TOKENS_TOTAL: &str = "textmodel_tokens_total";
pub const PROFILES_LOADED_TOTAL: &str = "textmodel_profiles_loaded_total";

fn is_dev_env() -> bool {
    cfg!(debug_assertions)
        || matches!(
            std::env::var(ENV_DEV_ENV)
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        )
}

// B4MSA_DEV_LOG=1 AND dev env (debug build or B4MSA_ENV in {local,development,dev})
pub fn dev_logging_enabled() -> bool {
    std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1") && is_dev_env()
}

/// First 6 bytes of the SHA-256 digest, hex encoded.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(DOCUMENTS_TOTAL, "Documents tokenized.");
        describe_counter!(TOKENS_TOTAL, "Tokens emitted across all documents.");
        describe_counter!(
            PROFILES_LOADED_TOTAL,
            "Language profiles built from resource files."
        );
    });
}

pub(crate) fn record_profile_loaded() {
    ensure_metrics_described();
    counter!(PROFILES_LOADED_TOTAL).increment(1);
}

pub(crate) fn record_document(text: &str, stream_len: usize, tokens: usize) {
    ensure_metrics_described();
    counter!(DOCUMENTS_TOTAL).increment(1);
    counter!(TOKENS_TOTAL).increment(tokens as u64);

    if !dev_logging_enabled() {
        return;
    }
    // Never log raw text.
    let id = anon_hash(text);
    debug!(target: "textmodel", %id, stream_len, tokens, "document tokenized");
}

/// Compact tracing output for development. Does nothing unless dev logging
/// is enabled; returns whether a subscriber was installed.
pub fn init_dev_tracing() -> bool {
    if !dev_logging_enabled() {
        return false;
    }
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("textmodel=debug,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init()
        .is_ok()
}
