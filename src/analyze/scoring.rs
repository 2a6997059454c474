//! Suspicion scoring: additive penalties from lexical features plus a jitter term.
//!
//! total = sum(weights of hit features) + jitter, jitter in [0, jitter_max)
//! Fake  iff total > threshold
//! confidence = clamp(fake_base + fake_slope*total)  for Fake
//!            = clamp(real_base - real_slope*total)  for Real
//! clamped into [min, max] and rounded to an integer percent.
//!
//! The jitter makes labels near the threshold non-deterministic. It is kept
//! behind `JitterSource` so callers can pin it (tests) or switch it off.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::features::LexicalFeatures;
use crate::config::ScoringConfig;
use crate::verdict::Label;

/// Source of the random term folded into the score.
pub trait JitterSource: Send {
    /// A value in `[0, max)`; `max <= 0` must yield 0.
    fn sample(&mut self, max: f64) -> f64;
}

/// Uniform jitter from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomJitter;

impl JitterSource for RandomJitter {
    fn sample(&mut self, max: f64) -> f64 {
        if max <= 0.0 {
            return 0.0;
        }
        rand::rng().random_range(0.0..max)
    }
}

/// Always the same value (clamped into `[0, max]`). For tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn sample(&mut self, max: f64) -> f64 {
        if max <= 0.0 {
            return 0.0;
        }
        self.0.clamp(0.0, max)
    }
}

/// Deterministic scoring.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn sample(&mut self, _max: f64) -> f64 {
        0.0
    }
}

/// Score breakdown, kept on the result for explainability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspicionScore {
    /// Input-derived part (sum of weights).
    pub deterministic: u32,
    pub jitter: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub score: SuspicionScore,
    pub label: Label,
    pub confidence: u8,
    pub factors: Vec<String>,
}

pub fn suspicion_score(
    f: &LexicalFeatures,
    cfg: &ScoringConfig,
    jitter: &mut dyn JitterSource,
) -> SuspicionScore {
    let w = &cfg.weights;
    let hits = [
        (f.sensational, w.sensational),
        (f.emotional, w.emotional),
        (f.clickbait, w.clickbait),
        (f.exclamation_count > cfg.exclamation_limit, w.exclamations),
        (f.all_caps_word, w.all_caps),
        (f.char_len < cfg.short_text_chars, w.short_text),
        (!f.has_quotes, w.no_quotes),
    ];
    let deterministic: u32 = hits.iter().filter(|(hit, _)| *hit).map(|(_, w)| *w).sum();
    let jitter = jitter.sample(cfg.jitter_max);

    SuspicionScore {
        deterministic,
        jitter,
        total: f64::from(deterministic) + jitter,
    }
}

pub fn label_for(total: f64, cfg: &ScoringConfig) -> Label {
    if total > cfg.threshold {
        Label::Fake
    } else {
        Label::Real
    }
}

pub fn confidence_for(label: Label, total: f64, cfg: &ScoringConfig) -> u8 {
    let c = &cfg.confidence;
    let raw = match label {
        Label::Fake => c.fake_base + c.fake_slope * total,
        Label::Real => c.real_base - c.real_slope * total,
    };
    // min/max are validated on load, and percent bounds keep the cast lossless
    raw.clamp(c.min, c.max).round().clamp(0.0, 100.0) as u8
}

/// Human-readable list of what moved the score.
pub fn factors(f: &LexicalFeatures, label: Label, cfg: &ScoringConfig) -> Vec<String> {
    let short = f.char_len < cfg.short_text_chars;
    let mut out: Vec<String> = [
        (f.sensational, "Contains sensationalized language and urgency indicators"),
        (f.emotional, "Uses highly emotional or charged language"),
        (f.clickbait, "Exhibits clickbait-style phrasing"),
        (
            f.exclamation_count > cfg.exclamation_limit,
            "Excessive use of exclamation marks",
        ),
        (f.all_caps_word, "Inappropriate capitalization patterns"),
        (short, "Unusually brief for comprehensive news coverage"),
        (
            !f.has_quotes && f.char_len > cfg.short_text_chars,
            "Lacks quoted sources or expert opinions",
        ),
    ]
    .into_iter()
    .filter(|(hit, _)| *hit)
    .map(|(_, msg)| msg.to_string())
    .collect();

    if label == Label::Real {
        out.extend(
            [
                "Maintains neutral, factual tone",
                "Follows standard journalistic structure",
                "Contains verifiable information patterns",
            ]
            .map(String::from),
        );
    }
    out
}

pub fn score(f: &LexicalFeatures, cfg: &ScoringConfig, jitter: &mut dyn JitterSource) -> Scored {
    let score = suspicion_score(f, cfg, jitter);
    let label = label_for(score.total, cfg);
    Scored {
        score,
        label,
        confidence: confidence_for(label, score.total, cfg),
        factors: factors(f, label, cfg),
    }
}
