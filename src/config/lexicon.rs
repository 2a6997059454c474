// src/config/lexicon.rs
//! Lexicon and template tables for the detector.
//!
//! The default tables live in `config/lexicon.toml` and are embedded at compile time.
//! A different file can be supplied through `TRUTHGUARD_LEXICON_PATH`; it must carry
//! the full schema (no partial merging).
//!
//! After parsing, the tables are normalized once:
//! - word lists are upper-cased (feature checks run on the upper-cased text)
//! - topic and timeline keywords are lower-cased (topic checks run on the lower-cased text)
//! - empty entries are dropped
//! - topics are sorted into the fixed priority order of `Topic`, whatever the file order

use anyhow::{anyhow, bail, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::analyze::topic::Topic;

pub const ENV_LEXICON_PATH: &str = "TRUTHGUARD_LEXICON_PATH";

static EMBEDDED: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    let raw = include_str!("../../config/lexicon.toml");
    Arc::new(Lexicon::from_toml_str(raw).expect("valid embedded lexicon"))
});

#[derive(Debug, Clone, Deserialize)]
pub struct Lexicon {
    pub scoring: ScoringConfig,
    pub words: WordLists,
    pub report: ReportConfig,
    /// Topic buckets in priority order. Must contain a `default` entry.
    pub topics: Vec<TopicEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Label is Fake iff the total score is strictly above this.
    pub threshold: f64,
    /// Upper bound (exclusive) of the uniform jitter term.
    pub jitter_max: f64,
    /// Texts shorter than this (in chars) get the short-text penalty.
    pub short_text_chars: usize,
    /// More than this many `!` triggers the exclamation penalty.
    pub exclamation_limit: usize,
    /// Minimum length (chars) of a word for the all-caps check.
    pub caps_word_min_chars: usize,
    pub weights: ScoringWeights,
    pub confidence: ConfidenceConfig,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScoringWeights {
    pub sensational: u32,
    pub emotional: u32,
    pub clickbait: u32,
    pub exclamations: u32,
    pub all_caps: u32,
    pub short_text: u32,
    pub no_quotes: u32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ConfidenceConfig {
    pub min: f64,
    pub max: f64,
    pub fake_base: f64,
    pub fake_slope: f64,
    pub real_base: f64,
    pub real_slope: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordLists {
    pub sensational: Vec<String>,
    pub emotional: Vec<String>,
    pub clickbait: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub headline_max_chars: usize,
    pub headline_fallback_chars: usize,
    pub min_sentence_chars: usize,
    pub min_event_chars: usize,
    pub max_claims: usize,
    pub max_events: usize,
    pub max_timeline: usize,
    pub max_people: usize,
    pub max_locations: usize,
    pub min_location_chars: usize,
    #[serde(default)]
    pub location_stopwords: Vec<String>,
    pub timeline: TimelineKeywords,
    pub placeholders: Placeholders,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimelineKeywords {
    pub past: Vec<String>,
    pub current: Vec<String>,
    pub future: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Placeholders {
    pub key_events: String,
    pub people: String,
    pub timeline: String,
    pub locations: String,
    pub factual_claims: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopicEntry {
    pub topic: Topic,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Phrase used in the content summary ("This text discusses <discusses>.").
    pub discusses: String,
    pub summary: String,
    pub context: String,
    pub implications: String,
    pub related: Vec<String>,
    /// Paragraph shown for Real results; falls back to the default topic's.
    #[serde(default)]
    pub real_context: Option<String>,
    /// Debunking block shown for Fake results; falls back to the default topic's.
    #[serde(default)]
    pub debunking: Option<Debunking>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Debunking {
    pub what_actually_happened: String,
    pub why_its_fake: String,
    pub correct_information: String,
    pub common_misconceptions: Vec<String>,
    pub fact_check_sources: Vec<String>,
}

impl Lexicon {
    /// The tables compiled into the binary.
    pub fn embedded() -> &'static Lexicon {
        &EMBEDDED
    }

    /// Shared handle to the embedded tables; clones the `Arc`, not the tables.
    pub fn shared() -> Arc<Lexicon> {
        Arc::clone(&EMBEDDED)
    }

    /// Load from `$TRUTHGUARD_LEXICON_PATH` when set, else the embedded tables.
    pub fn from_env() -> Result<Self> {
        match std::env::var(ENV_LEXICON_PATH) {
            Ok(p) if !p.trim().is_empty() => Self::load_from(Path::new(p.trim())),
            _ => Ok(Self::embedded().clone()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading lexicon from {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("parsing lexicon {}", path.display()))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut lex: Lexicon = toml::from_str(raw)?;
        lex.normalize();
        lex.validate()?;
        Ok(lex)
    }

    /// Entry for `topic`, or the default entry if the topic has none.
    pub fn topic_entry(&self, topic: Topic) -> &TopicEntry {
        self.topics
            .iter()
            .find(|t| t.topic == topic)
            .unwrap_or_else(|| self.default_topic())
    }

    pub fn default_topic(&self) -> &TopicEntry {
        // validate() guarantees presence
        self.topics
            .iter()
            .find(|t| t.topic == Topic::Default)
            .unwrap_or_else(|| &self.topics[0])
    }

    /// Real-news context paragraph for `topic` (default topic as fallback).
    pub fn real_context(&self, topic: Topic) -> &str {
        self.topic_entry(topic)
            .real_context
            .as_deref()
            .or(self.default_topic().real_context.as_deref())
            .unwrap_or_default()
    }

    /// Debunking block for `topic` (default topic as fallback).
    pub fn debunking(&self, topic: Topic) -> Option<&Debunking> {
        self.topic_entry(topic)
            .debunking
            .as_ref()
            .or(self.default_topic().debunking.as_ref())
    }

    fn normalize(&mut self) {
        for list in [
            &mut self.words.sensational,
            &mut self.words.emotional,
            &mut self.words.clickbait,
        ] {
            *list = clean(list, str::to_uppercase);
        }
        for t in &mut self.topics {
            t.keywords = clean(&t.keywords, str::to_lowercase);
        }
        // file order is irrelevant; classification follows the fixed topic priority
        self.topics.sort_by_key(|t| t.topic);
        let tl = &mut self.report.timeline;
        for list in [&mut tl.past, &mut tl.current, &mut tl.future] {
            *list = clean(list, str::to_lowercase);
        }
        self.report.location_stopwords =
            clean(&self.report.location_stopwords, |s: &str| s.to_string());
    }

    fn validate(&self) -> Result<()> {
        let c = &self.scoring.confidence;
        if c.min > c.max {
            bail!("confidence.min ({}) > confidence.max ({})", c.min, c.max);
        }
        if self.scoring.jitter_max < 0.0 {
            bail!("scoring.jitter_max must be >= 0");
        }
        if self.report.headline_max_chars < 4 {
            bail!("report.headline_max_chars must leave room for an ellipsis");
        }
        if let Some(w) = self.topics.windows(2).find(|w| w[0].topic == w[1].topic) {
            bail!("topic `{}` is defined more than once", w[0].topic);
        }
        if !self.topics.iter().any(|t| t.topic == Topic::Default) {
            return Err(anyhow!("lexicon has no `default` topic entry"));
        }
        let default = self.default_topic();
        if default.real_context.is_none() || default.debunking.is_none() {
            bail!("the `default` topic must define real_context and debunking");
        }
        Ok(())
    }
}

fn clean(items: &[String], f: impl Fn(&str) -> String) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(f)
        .collect()
}
