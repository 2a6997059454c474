// src/analyze/mod.rs
//! Analysis pipeline entry: validates input, extracts features, scores, and
//! assembles the report.
//!
//! Order:
//! 1) Reject empty / whitespace-only input
//! 2) Lexical features
//! 3) Suspicion score (+ jitter) -> label, confidence, factors
//! 4) Topic bucket
//! 5) News report, detailed analysis, contextual info

pub mod detail;
pub mod features;
pub mod ner;
pub mod report;
pub mod scoring;
pub mod topic;

use metrics::counter;
use std::sync::Arc;
use tracing::debug;

use crate::config::{Lexicon, Settings};
use crate::verdict::ClassificationResult;

// Re-export convenient types.
pub use crate::analyze::features::{extract_features, LexicalFeatures};
pub use crate::analyze::scoring::{FixedJitter, JitterSource, NoJitter, RandomJitter, SuspicionScore};
pub use crate::analyze::topic::{classify_topic, Topic};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzeError {
    #[error("please enter some news text to analyze")]
    EmptyInput,
    #[error("an analysis is already in progress")]
    Busy,
    #[error("the analysis was cancelled")]
    Cancelled,
}

/// Caller-level guard: the scorer never sees empty or whitespace-only text.
pub fn validate_input(text: &str) -> Result<&str, AnalyzeError> {
    if text.trim().is_empty() {
        return Err(AnalyzeError::EmptyInput);
    }
    Ok(text)
}

/// Classify with the embedded lexicon and random jitter.
pub fn classify(text: &str) -> Result<ClassificationResult, AnalyzeError> {
    Detector::default().classify(text)
}

/// Stateless classifier over a shared, immutable lexicon.
#[derive(Debug, Clone)]
pub struct Detector {
    lexicon: Arc<Lexicon>,
    jitter: bool,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(Lexicon::shared())
    }
}

impl Detector {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            lexicon,
            jitter: true,
        }
    }

    /// Builder: enable/disable the random score term.
    pub fn with_jitter(mut self, on: bool) -> Self {
        self.jitter = on;
        self
    }

    /// Lexicon from `settings.lexicon_path` (or the embedded one) plus the jitter switch.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let lexicon = match &settings.lexicon_path {
            Some(p) => Arc::new(Lexicon::load_from(p)?),
            None => Lexicon::shared(),
        };
        Ok(Self::new(lexicon).with_jitter(settings.jitter))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn jitter_enabled(&self) -> bool {
        self.jitter
    }

    pub fn classify(&self, text: &str) -> Result<ClassificationResult, AnalyzeError> {
        if self.jitter {
            self.classify_with(text, &mut RandomJitter)
        } else {
            self.classify_with(text, &mut NoJitter)
        }
    }

    /// Full pipeline with an explicit jitter source.
    pub fn classify_with(
        &self,
        text: &str,
        jitter: &mut dyn JitterSource,
    ) -> Result<ClassificationResult, AnalyzeError> {
        let text = validate_input(text)?;
        let lex = self.lexicon.as_ref();

        let feats = extract_features(text, lex);
        let scored = scoring::score(&feats, &lex.scoring, jitter);
        let topic = classify_topic(text, lex);

        let sentences = report::split_sentences(text, lex.report.min_sentence_chars);
        let claims = report::factual_claims(&sentences, &lex.report);
        let news_report = report::build_report(text, &sentences, topic, lex);

        let result = ClassificationResult {
            label: scored.label,
            confidence: scored.confidence,
            explanation: scored.label.explanation().to_string(),
            factors: scored.factors,
            topic,
            features: feats,
            score: scored.score,
            contextual_info: detail::contextual_info(scored.label, topic, lex),
            news_report,
            detailed_analysis: detail::detailed_analysis(&feats, scored.label, topic, claims, lex),
        };

        counter!("detections_total", "label" => label_key(result.label)).increment(1);
        // Never log raw text; only a short anonymized id.
        debug!(
            target: "detector",
            id = %anon_id(text),
            label = %result.label,
            confidence = result.confidence,
            score = scored.score.total,
            %topic,
            "classified"
        );

        Ok(result)
    }
}

fn label_key(label: crate::verdict::Label) -> &'static str {
    match label {
        crate::verdict::Label::Real => "real",
        crate::verdict::Label::Fake => "fake",
    }
}

/// First 6 bytes of SHA-256 as hex; stable id for log correlation.
pub(crate) fn anon_id(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
