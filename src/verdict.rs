//! verdict.rs: result value objects returned to the presentation layer.
//!
//! JSON keys are camelCase; the label serializes under `prediction` as "Real" / "Fake".
//! Every list in the report is non-empty (placeholders stand in for empty extractions).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analyze::features::LexicalFeatures;
use crate::analyze::scoring::SuspicionScore;
use crate::analyze::topic::Topic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Real,
    Fake,
}

impl Label {
    pub fn is_fake(self) -> bool {
        self == Label::Fake
    }

    pub fn explanation(self) -> &'static str {
        match self {
            Label::Fake => "This text exhibits multiple characteristics commonly associated with misinformation, including emotional manipulation, sensationalized language, and urgency tactics designed to bypass critical thinking.",
            Label::Real => "This text demonstrates characteristics consistent with legitimate journalism, including neutral tone, factual language, and professional presentation standards.",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Label::Real => "Real",
            Label::Fake => "Fake",
        })
    }
}

/// Full outcome of one classification. Recomputed on every call, never stored by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    #[serde(rename = "prediction")]
    pub label: Label,
    /// Integer percent in [55, 95].
    pub confidence: u8,
    pub explanation: String,
    pub factors: Vec<String>,
    pub topic: Topic,
    pub features: LexicalFeatures,
    pub score: SuspicionScore,
    pub contextual_info: ContextualInfo,
    pub news_report: NewsReport,
    pub detailed_analysis: DetailedAnalysis,
}

/// Exactly one of the two fields is set, depending on the label.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_news_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fake_news_debunking: Option<DebunkingInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebunkingInfo {
    pub what_actually_happened: String,
    pub why_its_fake: String,
    pub correct_information: String,
    pub common_misconceptions: Vec<String>,
    pub fact_check_sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsReport {
    pub headline: String,
    pub summary: String,
    pub key_events: Vec<String>,
    pub people_involved: Vec<String>,
    pub timeline: Vec<String>,
    pub locations: Vec<String>,
    pub context: String,
    pub implications: String,
    pub related_topics: Vec<String>,
    pub topic: Topic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAnalysis {
    pub content_summary: String,
    pub language_analysis: String,
    pub credibility_indicators: Vec<String>,
    pub potential_bias: String,
    pub factual_claims: Vec<String>,
    pub emotional_tone: String,
    pub source_analysis: String,
    pub recommendations: Vec<String>,
}
