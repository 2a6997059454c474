// src/analyze/topic.rs
//! Topic buckets. The first bucket (in priority order) whose keyword occurs as a
//! substring of the lower-cased text wins; no hit yields `Topic::Default`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::Lexicon;

/// Variant order is classification priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Government,
    Health,
    Technology,
    Climate,
    Economy,
    Sports,
    Default,
}

impl Topic {
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Government => "government",
            Topic::Health => "health",
            Topic::Technology => "technology",
            Topic::Climate => "climate",
            Topic::Economy => "economy",
            Topic::Sports => "sports",
            Topic::Default => "default",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify `text` into a topic bucket using the lexicon's priority order.
pub fn classify_topic(text: &str, lex: &Lexicon) -> Topic {
    let lower = text.to_lowercase();
    lex.topics
        .iter()
        .filter(|t| t.topic != Topic::Default)
        .find(|t| t.keywords.iter().any(|k| lower.contains(k.as_str())))
        .map(|t| t.topic)
        .unwrap_or(Topic::Default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(text: &str) -> Topic {
        classify_topic(text, Lexicon::embedded())
    }

    #[test]
    fn government_beats_health() {
        assert_eq!(
            topic("The president announced a new vaccine program."),
            Topic::Government
        );
    }

    #[test]
    fn each_bucket_is_reachable() {
        assert_eq!(topic("Hospital wards reopened"), Topic::Health);
        assert_eq!(topic("A new digital wallet launched"), Topic::Technology);
        assert_eq!(topic("Carbon levels are rising"), Topic::Climate);
        assert_eq!(topic("The market closed higher"), Topic::Economy);
        assert_eq!(topic("The team won the final"), Topic::Sports);
        assert_eq!(topic("A cat was found on a roof"), Topic::Default);
    }

    #[test]
    fn keywords_match_inside_words() {
        // "ai" inside "said", "tech" inside "biotech"
        assert_eq!(topic("She said the bakery opened early"), Topic::Technology);
        assert_eq!(topic("A biotech startup opened"), Topic::Technology);
        assert_eq!(topic("AI models are getting larger"), Topic::Technology);
        // "team" inside "steam"
        assert_eq!(topic("The old steam engine rolled on"), Topic::Sports);
    }

    #[test]
    fn topic_serializes_lowercase() {
        let v = serde_json::to_value(Topic::Technology).unwrap();
        assert_eq!(v, serde_json::json!("technology"));
    }
}
