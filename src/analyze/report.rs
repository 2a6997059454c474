// src/analyze/report.rs
//! News report synthesis: sentences, headline, key events, timeline, entities
//! and the topic-keyed summary/context/implications.

use super::ner::{extract_locations, extract_people};
use super::topic::Topic;
use crate::config::{Lexicon, ReportConfig};
use crate::verdict::NewsReport;

/// Split on runs of `.`, `!`, `?` and keep trimmed sentences longer than `min_chars`.
pub fn split_sentences(text: &str, min_chars: usize) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| s.chars().count() > min_chars)
        .collect()
}

/// First sentence (or the head of the text), cut to `max_chars` with a trailing "...".
pub fn headline(text: &str, sentences: &[&str], cfg: &ReportConfig) -> String {
    let base: String = match sentences.first() {
        Some(s) => (*s).to_string(),
        None => text
            .trim()
            .chars()
            .take(cfg.headline_fallback_chars)
            .collect(),
    };
    truncate_with_ellipsis(&base, cfg.headline_max_chars)
}

fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// First `max_claims` sentences, verbatim.
pub fn factual_claims(sentences: &[&str], cfg: &ReportConfig) -> Vec<String> {
    sentences
        .iter()
        .take(cfg.max_claims)
        .map(|s| s.to_string())
        .collect()
}

pub fn key_events(sentences: &[&str], cfg: &ReportConfig) -> Vec<String> {
    sentences
        .iter()
        .take(cfg.max_events)
        .enumerate()
        .map(|(i, s)| format!("Event {}: {}", i + 1, s))
        .filter(|e| e.chars().count() > cfg.min_event_chars)
        .collect()
}

/// Tag the first sentences as Past / Current / Future by tense-keyword substrings, else "Step N".
pub fn timeline(sentences: &[&str], cfg: &ReportConfig) -> Vec<String> {
    let kw = &cfg.timeline;
    let hit = |lower: &str, list: &[String]| list.iter().any(|k| lower.contains(k.as_str()));

    sentences
        .iter()
        .take(cfg.max_timeline)
        .enumerate()
        .map(|(i, s)| {
            let lower = s.to_lowercase();
            if hit(&lower, &kw.past) {
                format!("Past: {s}")
            } else if hit(&lower, &kw.current) {
                format!("Current: {s}")
            } else if hit(&lower, &kw.future) {
                format!("Future: {s}")
            } else {
                format!("Step {}: {s}", i + 1)
            }
        })
        .collect()
}

pub(crate) fn or_placeholder(items: Vec<String>, placeholder: &str) -> Vec<String> {
    if items.is_empty() {
        vec![placeholder.to_string()]
    } else {
        items
    }
}

pub fn build_report(text: &str, sentences: &[&str], topic: Topic, lex: &Lexicon) -> NewsReport {
    let cfg = &lex.report;
    let ph = &cfg.placeholders;
    let entry = lex.topic_entry(topic);

    NewsReport {
        headline: headline(text, sentences, cfg),
        summary: entry.summary.clone(),
        key_events: or_placeholder(key_events(sentences, cfg), &ph.key_events),
        people_involved: or_placeholder(extract_people(text, cfg.max_people), &ph.people),
        timeline: or_placeholder(timeline(sentences, cfg), &ph.timeline),
        locations: or_placeholder(
            extract_locations(
                text,
                &cfg.location_stopwords,
                cfg.min_location_chars,
                cfg.max_locations,
            ),
            &ph.locations,
        ),
        context: entry.context.clone(),
        implications: entry.implications.clone(),
        related_topics: entry.related.clone(),
        topic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> &'static ReportConfig {
        &Lexicon::embedded().report
    }

    #[test]
    fn sentences_drop_short_fragments() {
        let s = split_sentences("Hi. The council met on Monday!! Ok? Prices will rise next year...", 10);
        assert_eq!(s, vec!["The council met on Monday", "Prices will rise next year"]);
    }

    #[test]
    fn long_headline_is_exactly_80_chars() {
        let first = "a".repeat(120);
        let text = format!("{first}. Second sentence here.");
        let sents = split_sentences(&text, 10);
        let h = headline(&text, &sents, cfg());
        assert_eq!(h.chars().count(), 80);
        assert!(h.ends_with("..."));
        assert_eq!(&h[..77], &first[..77]);
    }

    #[test]
    fn headline_of_80_chars_is_kept() {
        let first = "b".repeat(80);
        let sents = vec![first.as_str()];
        assert_eq!(headline(&first, &sents, cfg()), first);
    }

    #[test]
    fn headline_falls_back_to_text_head() {
        let h = headline("  tiny  ", &[], cfg());
        assert_eq!(h, "tiny");
    }

    #[test]
    fn timeline_tags_by_tense() {
        let sents = vec![
            "Yesterday the bridge was closed",
            "Today crews are inspecting it",
            "The city will reopen it soon",
        ];
        let t = timeline(&sents, cfg());
        assert_eq!(t[0], "Past: Yesterday the bridge was closed");
        assert_eq!(t[1], "Current: Today crews are inspecting it");
        assert_eq!(t[2], "Future: The city will reopen it soon");

        let plain = timeline(&["The answer is unclear"], cfg());
        assert_eq!(plain, vec!["Step 1: The answer is unclear"]);
    }

    #[test]
    fn tense_keywords_match_inside_words() {
        let t = timeline(
            &[
                "The cause is known to officials",
                "Residents were planting trees",
            ],
            cfg(),
        );
        assert_eq!(t[0], "Current: The cause is known to officials");
        assert_eq!(t[1], "Future: Residents were planting trees");
    }

    #[test]
    fn events_and_claims_are_capped() {
        let sents = vec![
            "First sentence is here",
            "Second sentence is here",
            "Third sentence is here",
            "Fourth sentence is here",
            "Fifth sentence is here",
        ];
        assert_eq!(factual_claims(&sents, cfg()).len(), 3);
        let ev = key_events(&sents, cfg());
        assert_eq!(ev.len(), 4);
        assert_eq!(ev[0], "Event 1: First sentence is here");
    }

    #[test]
    fn report_lists_are_never_empty() {
        let text = "lowercase only text with nothing to extract";
        let lex = Lexicon::embedded();
        let sents = split_sentences(text, lex.report.min_sentence_chars);
        let r = build_report(text, &sents, Topic::Default, lex);
        assert_eq!(r.people_involved, vec![lex.report.placeholders.people.clone()]);
        assert_eq!(r.locations, vec![lex.report.placeholders.locations.clone()]);
        assert!(!r.key_events.is_empty());
        assert!(!r.timeline.is_empty());
        assert_eq!(r.related_topics.len(), 4);
    }

    #[test]
    fn degenerate_input_gets_placeholders_everywhere() {
        let lex = Lexicon::embedded();
        let r = build_report("?!.", &[], Topic::Sports, lex);
        assert_eq!(r.key_events, vec![lex.report.placeholders.key_events.clone()]);
        assert_eq!(r.timeline, vec![lex.report.placeholders.timeline.clone()]);
        assert!(r.summary.contains("sports"));
        assert_eq!(r.topic, Topic::Sports);
    }
}
