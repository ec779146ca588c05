// src/stream.rs
//! Tilde-delimited token stream: the intermediate representation shared by
//! every stage. A stream always starts and ends with [`SEP`] and the
//! separator never appears inside a symbol.

pub const SEP: char = '~';

// --- class tags ---
pub const TAG_URL: &str = "_url";
pub const TAG_USR: &str = "_usr";
pub const TAG_HTAG: &str = "_htag";
pub const TAG_NUM: &str = "_num";
pub const TAG_ENT: &str = "_ent";
pub const TAG_NEG: &str = "_neg";
pub const TAG_POS: &str = "_pos";
pub const TAG_NEU: &str = "_neu";
/// Replacement emitted by stopword grouping.
pub const TAG_STOPWORD: &str = "_sw";

/// Tags that negation scoping passes over without closing the scope and
/// never fuses with a marker.
pub const PROTECTED_TAGS: [&str; 8] = [
    TAG_URL, TAG_USR, TAG_ENT, TAG_HTAG, TAG_NUM, TAG_NEG, TAG_POS, TAG_NEU,
];

pub fn is_class_tag(tok: &str) -> bool {
    PROTECTED_TAGS.contains(&tok)
}

/// Tokens that stemming and spelling correction leave untouched.
pub fn is_protected_token(tok: &str) -> bool {
    matches!(tok.chars().next(), Some('@' | '#' | '_' | SEP))
}

/// A symbol of the stream plus the part-of-speech tag attached by the
/// lemmatizer, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub tag: Option<String>,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: None,
        }
    }

    pub fn tagged(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: Some(tag.into()),
        }
    }
}

/// Parse a stream into untagged tokens.
pub fn tokens(stream: &str) -> Vec<Token> {
    symbols(stream).map(Token::new).collect()
}

/// Render tokens back into a wrapped stream (tags are dropped).
pub fn render(tokens: &[Token]) -> String {
    join(tokens.iter().map(|t| t.text.as_str()))
}

/// Split a stream into its non-empty symbols.
pub fn symbols(stream: &str) -> impl Iterator<Item = &str> {
    stream.split(SEP).filter(|s| !s.is_empty())
}

/// Join symbols into a wrapped stream: `~a~b~`. No symbols → `~~`.
pub fn join<I, S>(symbols: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    out.push(SEP);
    let mut any = false;
    for s in symbols {
        let s = s.as_ref();
        if s.is_empty() {
            continue;
        }
        if any {
            out.push(SEP);
        }
        out.push_str(s);
        any = true;
    }
    out.push(SEP);
    out
}

/// Restore the single-separator invariant after a stage that may have
/// produced empty symbols.
pub fn collapse(stream: &str) -> String {
    join(symbols(stream))
}
