pub mod parser;
pub mod sample;

use serde::{Deserialize, Serialize};

pub use parser::{ParseError, parse_word_list};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPair {
    pub term: String,
    pub translation: String,
}

impl WordPair {
    pub fn new(term: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            translation: translation.into(),
        }
    }
}

pub type WordList = Vec<WordPair>;

/// Distinct translations in first-seen order.
pub fn distinct_translations(words: &[WordPair]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for pair in words {
        if !seen.contains(&pair.translation.as_str()) {
            seen.push(&pair.translation);
        }
    }
    seen
}
