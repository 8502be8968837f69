use icu_normalizer::ComposingNormalizerBorrowed;

use crate::words::{WordList, WordPair};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no valid 'term:translation' lines found")]
    NoValidEntries,
}

/// Parse `term:translation` lines. A line is kept only when it has exactly
/// one colon and both sides are non-empty after trimming.
pub fn parse_word_list(text: &str) -> Result<WordList, ParseError> {
    let words: WordList = text.lines().filter_map(parse_line).collect();
    if words.is_empty() {
        return Err(ParseError::NoValidEntries);
    }
    Ok(words)
}

pub fn parse_line(line: &str) -> Option<WordPair> {
    let (term, translation) = line.split_once(':')?;
    if translation.contains(':') {
        return None;
    }

    let term = normalize(term);
    let translation = normalize(translation);
    if term.is_empty() || translation.is_empty() {
        return None;
    }
    Some(WordPair { term, translation })
}

/// Trim and compose to NFC so that answers typed in different encodings
/// of the same glyph compare equal.
fn normalize(field: &str) -> String {
    let nfc = ComposingNormalizerBorrowed::new_nfc();
    nfc.normalize(field.trim()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_list() {
        let words = parse_word_list("cat:mushuk\ndog:it\n").unwrap();
        assert_eq!(
            words,
            vec![WordPair::new("cat", "mushuk"), WordPair::new("dog", "it")]
        );
    }

    #[test]
    fn test_line_without_colon_is_rejected() {
        assert_eq!(parse_word_list("badline\n"), Err(ParseError::NoValidEntries));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert_eq!(parse_word_list(""), Err(ParseError::NoValidEntries));
        assert_eq!(parse_word_list("\n\n  \n"), Err(ParseError::NoValidEntries));
    }

    #[test]
    fn test_extra_colons_discard_the_line() {
        let words = parse_word_list("time:vaqt\nratio:1:2\nsun:quyosh").unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].term, "time");
        assert_eq!(words[1].term, "sun");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let words = parse_word_list("   apple  :   olma \t\r\n").unwrap();
        assert_eq!(words[0], WordPair::new("apple", "olma"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let words = parse_word_list("one:bir\r\ntwo:ikki\r\n").unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[1].translation, "ikki");
    }

    #[test]
    fn test_blank_side_is_discarded() {
        assert_eq!(parse_word_list(":\n : x\ny : "), Err(ParseError::NoValidEntries));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let words = parse_word_list("a:b\na:b\n").unwrap();
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn test_decomposed_input_is_composed() {
        // "e" + COMBINING ACUTE ACCENT
        let words = parse_word_list("coffee:cafe\u{301}").unwrap();
        assert_eq!(words[0].translation, "caf\u{e9}");
    }

    #[test]
    fn test_order_is_preserved() {
        let text = "z:1\ny:2\nx:3\n";
        let terms: Vec<String> = parse_word_list(text)
            .unwrap()
            .into_iter()
            .map(|w| w.term)
            .collect();
        assert_eq!(terms, vec!["z", "y", "x"]);
    }
}
