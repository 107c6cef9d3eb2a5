//! Spoken number-words used to qualify sub-zones ("dormitorio uno").

use std::fmt;

/// Result of normalizing a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numeral<'a> {
    Value(u32),
    Word(&'a str),
}

impl fmt::Display for Numeral<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeral::Value(n) => write!(f, "{}", n),
            Numeral::Word(word) => f.write_str(word),
        }
    }
}

const LEXICON: &[(&str, u32)] = &[("uno", 1), ("dos", 2)];

/// Map a known number-word to its value; anything else passes through untouched.
pub fn normalize(token: &str) -> Numeral<'_> {
    LEXICON
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, value)| Numeral::Value(*value))
        .unwrap_or(Numeral::Word(token))
}
