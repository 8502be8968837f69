use rust_embed::Embed;

use crate::words::{ParseError, WordList, parse_word_list};

#[derive(Embed)]
#[folder = "assets/wordlists/"]
struct WordListAssets;

pub const SAMPLE_NAME: &str = "sample.txt";

/// Bundled word lists by file name.
pub fn available() -> Vec<String> {
    let mut names: Vec<String> = WordListAssets::iter().map(|f| f.to_string()).collect();
    names.sort();
    names
}

pub fn load(name: &str) -> Option<Result<WordList, ParseError>> {
    let file = WordListAssets::get(name)?;
    let text = String::from_utf8_lossy(file.data.as_ref());
    Some(parse_word_list(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_list_is_bundled_and_valid() {
        assert!(available().contains(&SAMPLE_NAME.to_string()));
        let words = load(SAMPLE_NAME).unwrap().unwrap();
        assert!(words.len() >= 6, "sample must fill a hard question");
    }

    #[test]
    fn test_unknown_list_is_none() {
        assert!(load("missing.txt").is_none());
    }
}
