// src/config/mod.rs
//! Configuration: immutable lexicon/template tables and runtime settings.

pub mod lexicon;
pub mod settings;

pub use lexicon::{
    ConfidenceConfig, Debunking, Lexicon, Placeholders, ReportConfig, ScoringConfig,
    ScoringWeights, TimelineKeywords, TopicEntry, WordLists,
};
pub use settings::Settings;
