// tests/negation.rs
// Negation scoping through the full pipeline, per language.

use b4msa_textmodel::{FilterOption, Language, TextModel, TextModelConfig};

fn negating(lang: Language) -> TextModelConfig {
    TextModelConfig {
        negation: true,
        del_dup1: false,
        ..TextModelConfig::for_language(lang)
    }
}

const SPANISH: &str =
    "@usuario los pollos y las vacas nunca hubiesen permitido que no se hubiese hecho nada al respecto";

#[test]
fn spanish_scope_skips_clitics_and_exceptions() {
    let m = TextModel::new(TextModelConfig {
        strip_diac: false,
        stopwords: FilterOption::Delete,
        url_option: FilterOption::Delete,
        ..negating(Language::Spanish)
    })
    .unwrap();

    assert_eq!(
        m.tokenize(SPANISH).unwrap(),
        vec![
            "_usr",
            "pollos",
            "vacas",
            "hubiesen",
            "no_permitido",
            "hubiese",
            "no_hecho",
            "no_respecto"
        ]
    );
}

#[test]
fn spanish_scope_then_stemming() {
    let m = TextModel::new(TextModelConfig {
        strip_diac: false,
        stopwords: FilterOption::Delete,
        stemming: true,
        ..negating(Language::Spanish)
    })
    .unwrap();

    assert_eq!(
        m.tokenize(SPANISH).unwrap(),
        vec!["_usr", "poll", "vac", "hub", "no_permit", "hub", "no_hech", "no_respect"]
    );
}

#[test]
fn italian_synonyms_and_punctuation() {
    let m = TextModel::new(negating(Language::Italian)).unwrap();
    assert_eq!(
        m.tokenize("@User Come non condividere; me ne frega niente").unwrap(),
        vec!["_usr", "come", "no_condividere", "me", "no_frega", "niente"]
    );
}

#[test]
fn english_contractions_and_any() {
    let m = TextModel::new(negating(Language::English)).unwrap();
    assert_eq!(
        m.tokenize("I don't like any movies, never").unwrap(),
        vec!["i", "do", "not_like", "not_movies", "not"]
    );
    assert_eq!(
        m.text_transformations("It can't be").unwrap(),
        "~it~can~be~not~"
    );
}

#[test]
fn portuguese_phrase_skip() {
    let m = TextModel::new(negating(Language::Portuguese)).unwrap();
    assert_eq!(
        m.tokenize("nao o que eu quero").unwrap(),
        vec!["o", "que", "eu", "nao_quero"]
    );
}

#[test]
fn repeated_markers_are_emphasis() {
    let m = TextModel::new(negating(Language::Spanish)).unwrap();
    assert_eq!(m.tokenize("no no nunca bueno").unwrap(), vec!["no_bueno"]);
}

#[test]
fn class_tags_stay_outside_the_fusion() {
    let m = TextModel::new(negating(Language::Spanish)).unwrap();
    assert_eq!(
        m.tokenize("no @ana :) sirve").unwrap(),
        vec!["_usr", "_pos", "no_sirve"]
    );
}

#[test]
fn unicode_whitespace_separates_marker_and_target() {
    let m = TextModel::new(negating(Language::Spanish)).unwrap();
    assert_eq!(m.tokenize("no\u{A0}bueno").unwrap(), vec!["no_bueno"]);
    assert_eq!(m.text_transformations("no\u{A0}bueno").unwrap(), "~no_bueno~");
    assert_eq!(m.tokenize("no bueno").unwrap(), m.tokenize("no\u{3000}bueno").unwrap());
}
