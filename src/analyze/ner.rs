// src/analyze/ner.rs
//! Pattern-based entity extraction for the news report.
//!
//! - people: an honorific/title followed by one or two words, matched case-insensitively
//! - locations: runs of capitalized words, optionally ending in City/State/Country
//!
//! Both passes are shallow: the title may sit at the end of a longer word and any
//! capitalized run (sentence-initial words included) is a location candidate.
//! Matches are reported in text order, repeats included.

use once_cell::sync::Lazy;
use regex::Regex;

static PEOPLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:president|minister|ceo|director|dr\.?|mr\.?|ms\.?|mrs\.?)\s+[a-z]+(?:\s+[a-z]+)?")
        .expect("people regex")
});

static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*(?:\s+City|\s+State|\s+Country)?\b")
        .expect("location regex")
});

/// Up to `max` title-prefixed matches, e.g. "Dr. Sarah Chen", "president said nothing".
pub fn extract_people(text: &str, max: usize) -> Vec<String> {
    PEOPLE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .take(max)
        .collect()
}

/// Up to `max` capitalized word runs that are at least `min_chars` long and not stopwords.
pub fn extract_locations(
    text: &str,
    stopwords: &[String],
    min_chars: usize,
    max: usize,
) -> Vec<String> {
    LOCATION_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|s| s.chars().count() >= min_chars)
        .filter(|s| !stopwords.iter().any(|w| w == s))
        .take(max)
        .map(str::to_string)
        .collect()
}
