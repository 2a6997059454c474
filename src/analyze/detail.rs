// src/analyze/detail.rs
//! Label-keyed narrative blocks: detailed analysis and contextual info
//! (real-news background or a fake-news debunking).

use super::features::LexicalFeatures;
use super::report::or_placeholder;
use super::topic::Topic;
use crate::config::Lexicon;
use crate::verdict::{ContextualInfo, DebunkingInfo, DetailedAnalysis, Label};

pub fn contextual_info(label: Label, topic: Topic, lex: &Lexicon) -> ContextualInfo {
    match label {
        Label::Real => ContextualInfo {
            real_news_context: Some(lex.real_context(topic).to_string()),
            fake_news_debunking: None,
        },
        Label::Fake => ContextualInfo {
            real_news_context: None,
            fake_news_debunking: lex.debunking(topic).map(|d| DebunkingInfo {
                what_actually_happened: d.what_actually_happened.clone(),
                why_its_fake: d.why_its_fake.clone(),
                correct_information: d.correct_information.clone(),
                common_misconceptions: d.common_misconceptions.clone(),
                fact_check_sources: d.fact_check_sources.clone(),
            }),
        },
    }
}

pub fn detailed_analysis(
    f: &LexicalFeatures,
    label: Label,
    topic: Topic,
    claims: Vec<String>,
    lex: &Lexicon,
) -> DetailedAnalysis {
    let fake = label.is_fake();
    let approach = if fake {
        "appears to prioritize emotional impact over factual accuracy"
    } else {
        "maintains a balanced, informative approach"
    };

    DetailedAnalysis {
        content_summary: format!(
            "This {}-character text discusses {}. The content {}.",
            f.char_len,
            lex.topic_entry(topic).discusses,
            approach
        ),
        language_analysis: if fake {
            "The language pattern shows characteristics commonly associated with misinformation: emotional manipulation, urgency indicators, and sensationalized phrasing designed to provoke strong reactions rather than inform."
        } else {
            "The language demonstrates professional journalistic standards with measured tone, factual presentation, and appropriate use of formal news writing conventions."
        }
        .to_string(),
        credibility_indicators: if fake {
            vec![
                "Lack of specific sources or attributions",
                "Emotional language designed to bypass critical thinking",
                "Urgency tactics that discourage fact-checking",
                "Absence of balanced perspectives",
            ]
        } else {
            vec![
                "Neutral tone suggests objective reporting",
                "Structured presentation of information",
                "Absence of inflammatory language",
                "Professional writing style",
            ]
        }
        .into_iter()
        .map(String::from)
        .collect(),
        potential_bias: if fake {
            "Strong indicators of bias toward sensationalism and emotional manipulation. The content appears designed to generate strong reactions rather than inform readers objectively."
        } else {
            "Minimal bias detected. The content appears to maintain journalistic objectivity with balanced language and factual presentation."
        }
        .to_string(),
        factual_claims: or_placeholder(claims, &lex.report.placeholders.factual_claims),
        emotional_tone: if f.sensational || f.emotional {
            "High emotional intensity - designed to provoke strong feelings (anger, fear, excitement) which can impair critical judgment."
        } else {
            "Neutral to low emotional intensity - maintains professional distance appropriate for news reporting."
        }
        .to_string(),
        source_analysis: if f.has_quotes {
            "Contains quoted material, suggesting some attempt at source attribution. However, verification of these sources would be necessary."
        } else {
            "Limited or no apparent source attribution. Credible news typically includes multiple sources and expert opinions."
        }
        .to_string(),
        recommendations: if fake {
            vec![
                "Cross-reference this information with established news sources",
                "Look for original sources and expert opinions",
                "Be cautious of sharing without verification",
                "Consider the motivation behind such sensationalized presentation",
                "Apply critical thinking and fact-checking resources",
            ]
        } else {
            vec![
                "While this appears credible, still verify through multiple sources",
                "Look for additional context and expert analysis",
                "Check for any updates or corrections to the story",
                "Consider various perspectives on the topic",
            ]
        }
        .into_iter()
        .map(String::from)
        .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_gets_context_fake_gets_debunking() {
        let lex = Lexicon::embedded();
        let real = contextual_info(Label::Real, Topic::Economy, lex);
        assert!(real.real_news_context.unwrap().starts_with("Economic news"));
        assert!(real.fake_news_debunking.is_none());

        let fake = contextual_info(Label::Fake, Topic::Government, lex);
        assert!(fake.real_news_context.is_none());
        let d = fake.fake_news_debunking.unwrap();
        assert_eq!(d.common_misconceptions.len(), 3);
        assert!(d.fact_check_sources.iter().any(|s| s == "Parliamentary records"));
    }

    #[test]
    fn summary_mentions_length_and_topic() {
        let lex = Lexicon::embedded();
        let f = LexicalFeatures {
            char_len: 42,
            emotional: true,
            ..Default::default()
        };
        let d = detailed_analysis(&f, Label::Fake, Topic::Climate, Vec::new(), lex);
        assert!(d.content_summary.starts_with("This 42-character text discusses environmental issues."));
        assert!(d.emotional_tone.starts_with("High"));
        assert!(d.source_analysis.starts_with("Limited"));
        assert_eq!(d.recommendations.len(), 5);
        assert_eq!(d.factual_claims, vec![lex.report.placeholders.factual_claims.clone()]);
    }
}
