//! Latin to Tengwar transliteration.
//!
//! Glyphs are code points from the ConScript Unicode Registry private-use
//! block (U+E000..U+E07F); a Tengwar font is needed to see them.

use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

/// Longest key in [`TABLE`].
pub const MAX_KEY_LEN: usize = 3;

/// Latin letters and digraphs, roughly following the Sindarin general use.
pub const TABLE: &[(&str, char)] = &[
    ("ngw", '\u{E013}'),
    ("th", '\u{E008}'),
    ("ph", '\u{E009}'),
    ("ch", '\u{E00A}'),
    ("hw", '\u{E00B}'),
    ("dh", '\u{E00C}'),
    ("ng", '\u{E012}'),
    ("gw", '\u{E007}'),
    ("rh", '\u{E019}'),
    ("lh", '\u{E01B}'),
    ("ss", '\u{E01E}'),
    ("t", '\u{E000}'),
    ("p", '\u{E001}'),
    ("c", '\u{E002}'),
    ("k", '\u{E002}'),
    ("q", '\u{E003}'),
    ("d", '\u{E004}'),
    ("b", '\u{E005}'),
    ("g", '\u{E006}'),
    ("f", '\u{E009}'),
    ("v", '\u{E00D}'),
    ("n", '\u{E010}'),
    ("m", '\u{E011}'),
    ("w", '\u{E015}'),
    ("r", '\u{E018}'),
    ("l", '\u{E01A}'),
    ("s", '\u{E01C}'),
    ("z", '\u{E01E}'),
    ("h", '\u{E020}'),
    ("y", '\u{E022}'),
    ("a", '\u{E040}'),
    ("e", '\u{E044}'),
    ("i", '\u{E046}'),
    ("o", '\u{E04A}'),
    ("u", '\u{E04C}'),
];

pub fn lookup(key: &str) -> Option<char> {
    TABLE
        .iter()
        .find_map(|(source, glyph)| (*source == key).then_some(*glyph))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Mapped { source: String, glyph: char },
    Literal(char),
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Mapped { glyph, .. } => write!(f, "{glyph}"),
            Token::Literal(c) => write!(f, "{c}"),
        }
    }
}

/// Greedy longest match: a 3 character key beats a 2 character key beats a
/// single letter. Keys are compared lower-cased; `source` and literals keep
/// the original characters.
#[tracing::instrument]
pub fn tokenize(text: &str) -> Vec<Token> {
    let chars = text.chars().collect::<Vec<_>>();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let longest = MAX_KEY_LEN.min(chars.len() - i);
        let matched = (1..=longest).rev().find_map(|len| {
            let window = &chars[i..i + len];
            let key = window.iter().flat_map(|c| c.to_lowercase()).collect::<String>();
            lookup(&key).map(|glyph| {
                let source = window.iter().collect::<String>();
                (len, Token::Mapped { source, glyph })
            })
        });

        match matched {
            Some((len, token)) => {
                tokens.push(token);
                i += len;
            }
            None => {
                tokens.push(Token::Literal(chars[i]));
                i += 1;
            }
        }
    }

    tokens
}

pub fn transliterate(text: &str) -> String {
    tokenize(text).iter().join("")
}
