// tests/resources.rs
// Language profiles read from a resource directory instead of the bundled copies.

use b4msa_textmodel::{
    Error, FilterOption, Language, ResourceCache, ResourceSource, TextModel, TextModelConfig,
};
use std::fs;
use std::path::Path;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn custom_stopwords_and_exceptions() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "spanish.stopwords", "# custom\ngato\n");
    write(dir.path(), "spanish.neg.stopwords", "muy\n");
    let cache = ResourceCache::new(ResourceSource::Dir(dir.path().to_path_buf()));

    let cfg = TextModelConfig {
        negation: true,
        stopwords: FilterOption::Delete,
        ..TextModelConfig::for_language(Language::Spanish)
    };
    let m = TextModel::builder(cfg).resource_cache(&cache).build().unwrap();
    assert_eq!(
        m.tokenize("el gato no muy bueno").unwrap(),
        vec!["el", "muy", "no_bueno"]
    );
    // `es` is not an exception in this directory: the bundled list is not used.
    let m2 = TextModel::builder(TextModelConfig {
        negation: true,
        ..TextModelConfig::for_language(Language::Spanish)
    })
    .resource_cache(&cache)
    .build()
    .unwrap();
    assert_eq!(m2.tokenize("no es").unwrap(), vec!["no_es"]);
}

#[test]
fn missing_file_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "italian.stopwords", "il\n");
    let cache = ResourceCache::new(ResourceSource::Dir(dir.path().to_path_buf()));

    let err = TextModel::builder(TextModelConfig::for_language(Language::Italian))
        .resource_cache(&cache)
        .build()
        .unwrap_err();
    match err {
        Error::MissingResourceFile { path } => {
            assert!(path.ends_with("italian.neg.stopwords"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(cache.get(Language::Italian).is_none());

    // German has no negation rules, so the exception list is never needed.
    write(dir.path(), "german.stopwords", "der\ndie\ndas\n");
    let m = TextModel::builder(TextModelConfig {
        stopwords: FilterOption::Group,
        ..TextModelConfig::for_language(Language::German)
    })
    .resource_cache(&cache)
    .build()
    .unwrap();
    assert_eq!(m.tokenize("der hund").unwrap(), vec!["_sw", "hund"]);
}

#[test]
fn malformed_abbreviation_line() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "portuguese.stopwords", "o\n");
    write(dir.path(), "portuguese.neg.stopwords", "\n");
    write(dir.path(), "portuguese.dictionary", "carro\n");
    write(dir.path(), "portuguese.abbreviations", "vc\tvoce\n\npq\n");
    let cache = ResourceCache::new(ResourceSource::Dir(dir.path().to_path_buf()));

    let err = cache.profile(Language::Portuguese).unwrap_err();
    assert!(matches!(err, Error::MalformedResourceLine { line: 3, .. }));
    assert!(err.to_string().contains("portuguese.abbreviations"));
}

#[test]
fn profiles_are_shared() {
    let cache = ResourceCache::new(ResourceSource::Bundled);
    let a = cache.profile(Language::English).unwrap();
    let b = cache.profile(Language::English).unwrap();
    assert!(std::sync::Arc::ptr_eq(&a, &b));
}
