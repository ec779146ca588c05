// src/lang/correction.rs
//! Dictionary-driven spelling correction for Portuguese social-media text.
//!
//! Per token:
//! 1) known word → kept
//! 2) abbreviation → replaced by its expansion (`pq` → `porque`)
//! 3) lengthening (`gooool`, `cabbbecaaa`) reduced; kept if now known
//! 4) otherwise a few orthographic rewrites for frequent misspellings

use crate::lang::Dictionary;
use crate::stream::{self, Token};
use once_cell::sync::Lazy;
use regex::Regex;

static RE_SS_VOWEL_C: Lazy<Regex> = Lazy::new(|| Regex::new(r"ss([aeiou])c").expect("ss-vowel-c regex"));
static RE_DIMINUTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z]+)s(inho|inha|ito|ita)$").expect("diminutive regex"));
static RE_CH_AS_X: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[bcdfghjklmnpqrstvwxyz][aeo][iu]ch").expect("ch regex"));
static RE_NASAL_X: Lazy<[(Regex, &'static str, &'static str); 4]> = Lazy::new(|| {
    [("anx", "anch"), ("inx", "inch"), ("onx", "onch"), ("unx", "unch")]
        .map(|(from, to)| (Regex::new(&format!("[a-z]+{from}")).expect("nasal-x regex"), from, to))
});

#[inline]
fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Collapse vowel runs of 2+ and consonant runs of 3+ to a single char.
pub fn reduce_lengthening(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let mut out = String::with_capacity(word.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let mut j = i + 1;
        while j < chars.len() && chars[j] == c {
            j += 1;
        }
        let run = j - i;
        let collapse = c.is_ascii_lowercase() && if is_vowel(c) { run >= 2 } else { run >= 3 };
        if collapse {
            out.push(c);
        } else {
            out.extend(&chars[i..j]);
        }
        i = j;
    }
    out
}

/// Orthographic rewrites applied to words the dictionary does not know.
pub fn rewrite_misspelling(word: &str) -> String {
    let mut w = word.replace("nb", "mb").replace("np", "mp");
    w = RE_SS_VOWEL_C.replace_all(&w, "c${1}ss").into_owned();

    if let Some(rest) = w.strip_prefix("lej") {
        w = format!("leg{rest}");
    } else if w.starts_with("rej") && !w.starts_with("rejei") {
        w = format!("reg{}", &w[3..]);
    } else if let Some(rest) = w.strip_prefix("alj") {
        w = format!("alg{rest}");
    }

    w = RE_DIMINUTIVE.replace(&w, "${1}z${2}").into_owned();

    if RE_CH_AS_X.is_match(&w) {
        w = w.replace("ch", "x");
    }
    // Each rewrite needs its own pattern after at least one letter.
    for (re, from, to) in RE_NASAL_X.iter() {
        if re.is_match(&w) {
            w = w.replace(*from, to);
        }
    }
    w
}

pub fn correct_tokens(tokens: Vec<Token>, dict: &dyn Dictionary) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    for tok in tokens {
        let word = tok.text.as_str();
        if stream::is_protected_token(word)
            || !word.chars().any(char::is_alphabetic)
            || dict.is_known(word)
        {
            out.push(tok);
            continue;
        }
        if let Some(expansion) = dict.expand(word) {
            out.extend(expansion.iter().map(Token::new));
            continue;
        }
        let reduced = reduce_lengthening(word);
        if dict.is_known(&reduced) {
            out.push(Token::new(reduced));
            continue;
        }
        out.push(Token::new(rewrite_misspelling(&reduced)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    struct Tables {
        words: HashSet<String>,
        abbrev: HashMap<String, Vec<String>>,
    }

    impl Dictionary for Tables {
        fn is_known(&self, word: &str) -> bool {
            self.words.contains(word)
        }
        fn expand(&self, abbrev: &str) -> Option<&[String]> {
            self.abbrev.get(abbrev).map(Vec::as_slice)
        }
    }

    fn tables() -> Tables {
        Tables {
            words: ["carro", "cabeca", "tomar", "lado"].iter().map(|s| s.to_string()).collect(),
            abbrev: HashMap::from([
                ("pq".to_string(), vec!["porque".to_string()]),
                ("fds".to_string(), vec!["fim".into(), "de".into(), "semana".into()]),
            ]),
        }
    }

    #[test]
    fn lengthening_thresholds() {
        assert_eq!(reduce_lengthening("cabbbecaaa"), "cabeca");
        assert_eq!(reduce_lengthening("carro"), "carro");
        assert_eq!(reduce_lengthening("toooomar"), "tomar");
        assert_eq!(reduce_lengthening("zzz"), "z");
    }

    #[test]
    fn rewrites() {
        assert_eq!(rewrite_misspelling("canpo"), "campo");
        assert_eq!(rewrite_misspelling("lejal"), "legal");
        assert_eq!(rewrite_misspelling("rejeitar"), "rejeitar");
        assert_eq!(rewrite_misspelling("casinha"), "cazinha");
        assert_eq!(rewrite_misspelling("peichi"), "peixi");
        assert_eq!(rewrite_misspelling("canxa"), "cancha");
    }

    #[test]
    fn nasal_rewrites_are_independent() {
        assert_eq!(rewrite_misspelling("pinxo"), "pincho");
        assert_eq!(rewrite_misspelling("ponxe"), "ponche");
        assert_eq!(rewrite_misspelling("punxa"), "puncha");
        // `anx` matched; the word-initial `unx` has no letter before it.
        assert_eq!(rewrite_misspelling("unxanxo"), "unxancho");
        assert_eq!(rewrite_misspelling("anxo"), "anxo");
    }

    #[test]
    fn corrects_token_sequence() {
        let toks = stream::tokens("~pq~cabbbecaaa~carro~fds~_usr~!~");
        let out: Vec<String> = correct_tokens(toks, &tables()).into_iter().map(|t| t.text).collect();
        assert_eq!(
            out,
            vec!["porque", "cabeca", "carro", "fim", "de", "semana", "_usr", "!"]
        );
    }
}
