// src/analyze/features.rs
//! Lexical feature extraction. Pure function of the input text and the lexicon.

use serde::{Deserialize, Serialize};

use crate::config::Lexicon;

const QUOTE_CHARS: [char; 6] = ['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

/// Boolean/numeric signals the scorer works from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexicalFeatures {
    pub sensational: bool,
    pub emotional: bool,
    pub clickbait: bool,
    pub exclamation_count: usize,
    /// Some space-separated token of at least `caps_word_min_chars` chars equals its upper-case form.
    pub all_caps_word: bool,
    pub has_quotes: bool,
    pub has_digits: bool,
    /// Length in chars (not bytes).
    pub char_len: usize,
}

pub fn extract_features(text: &str, lex: &Lexicon) -> LexicalFeatures {
    let upper = text.to_uppercase();
    let any_in = |list: &[String]| list.iter().any(|w| upper.contains(w.as_str()));

    LexicalFeatures {
        sensational: any_in(&lex.words.sensational),
        emotional: any_in(&lex.words.emotional),
        clickbait: any_in(&lex.words.clickbait),
        exclamation_count: text.chars().filter(|&c| c == '!').count(),
        all_caps_word: has_all_caps_word(text, lex.scoring.caps_word_min_chars),
        has_quotes: text.contains(QUOTE_CHARS),
        has_digits: text.chars().any(|c| c.is_ascii_digit()),
        char_len: text.chars().count(),
    }
}

/// A space-separated token counts when it is long enough and upper-casing leaves it unchanged.
/// Punctuation and digits are part of the token, so "BREAKING:" and "2024," both count.
fn has_all_caps_word(text: &str, min_chars: usize) -> bool {
    text.split(' ')
        .any(|w| w.chars().count() >= min_chars && w.to_uppercase() == w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feats(text: &str) -> LexicalFeatures {
        extract_features(text, Lexicon::embedded())
    }

    #[test]
    fn breaking_moon_example() {
        let f = feats("BREAKING: Scientists say the moon is made of cheese!!!");
        assert!(f.sensational);
        assert!(!f.emotional);
        assert!(!f.clickbait);
        assert_eq!(f.exclamation_count, 3);
        assert!(f.all_caps_word);
        assert!(!f.has_quotes);
        assert!(f.char_len < 100);
    }

    #[test]
    fn vocabulary_is_case_insensitive() {
        let f = feats("an amazing story you won't believe, what happens next is a secret");
        assert!(f.sensational);
        assert!(f.emotional);
        assert!(f.clickbait);
        // the apostrophe in "won't" counts as a quote mark
        assert!(f.has_quotes);
        assert!(!f.all_caps_word);
    }

    #[test]
    fn all_caps_needs_four_unchanged_chars() {
        assert!(!feats("the USA and UK signed").all_caps_word);
        assert!(feats("the NASA budget").all_caps_word);
        assert!(feats("a COVID-19 update").all_caps_word);
        // numbers have no case, so they pass the upper-case comparison
        assert!(feats("Prices rose 2024 in the region").all_caps_word);
        assert!(feats("about 1,000 people").all_caps_word);
        assert!(!feats("in 202 days").all_caps_word);
    }

    #[test]
    fn tokens_split_on_spaces_only() {
        // a newline does not separate "NASA" from "budget"
        assert!(!feats("the NASA\nbudget").all_caps_word);
        assert!(feats("a NASA\tESA deal").all_caps_word);
    }

    #[test]
    fn quotes_and_digits() {
        let f = feats("\u{201C}We will act,\u{201D} she said in 2023.");
        assert!(f.has_quotes);
        assert!(f.has_digits);
        let g = feats("No marks here");
        assert!(!g.has_quotes);
        assert!(!g.has_digits);
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "SHOCKING!!! The minister said \"nothing\" about it.";
        let a = feats(text);
        for _ in 0..5 {
            assert_eq!(feats(text), a);
        }
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        assert_eq!(feats("žluťoučký").char_len, 9);
    }
}
