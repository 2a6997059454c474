// src/config/settings.rs
//! Runtime settings read from the environment (`.env` is loaded by the binaries).

use std::path::PathBuf;
use std::time::Duration;

use super::lexicon::ENV_LEXICON_PATH;

pub const ENV_ANALYSIS_DELAY_MS: &str = "TRUTHGUARD_ANALYSIS_DELAY_MS";
pub const ENV_HISTORY_CAP: &str = "TRUTHGUARD_HISTORY_CAP";
pub const ENV_JITTER: &str = "TRUTHGUARD_JITTER";
pub const ENV_MAX_SESSIONS: &str = "TRUTHGUARD_MAX_SESSIONS";

pub const DEFAULT_ANALYSIS_DELAY_MS: u64 = 3_000;
pub const DEFAULT_HISTORY_CAP: usize = 500;
const MAX_HISTORY_CAP: usize = 10_000;
pub const DEFAULT_MAX_SESSIONS: usize = 1_000;
const MAX_SESSIONS_CAP: usize = 100_000;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Synthetic "analysis" latency applied by sessions before publishing a result.
    pub analysis_delay: Duration,
    /// Max entries kept in the in-memory history log.
    pub history_cap: usize,
    /// Whether the random jitter term is folded into the score.
    pub jitter: bool,
    /// Max live view sessions; creating one more evicts the oldest idle session.
    pub max_sessions: usize,
    pub lexicon_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            analysis_delay: Duration::from_millis(DEFAULT_ANALYSIS_DELAY_MS),
            history_cap: DEFAULT_HISTORY_CAP,
            jitter: true,
            max_sessions: DEFAULT_MAX_SESSIONS,
            lexicon_path: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            analysis_delay: parse_u64_env(std::env::var(ENV_ANALYSIS_DELAY_MS).ok())
                .map(Duration::from_millis)
                .unwrap_or(d.analysis_delay),
            history_cap: parse_u64_env(std::env::var(ENV_HISTORY_CAP).ok())
                .map(|v| (v as usize).clamp(1, MAX_HISTORY_CAP))
                .unwrap_or(d.history_cap),
            jitter: parse_bool_env(std::env::var(ENV_JITTER).ok()).unwrap_or(d.jitter),
            max_sessions: parse_u64_env(std::env::var(ENV_MAX_SESSIONS).ok())
                .map(|v| (v as usize).clamp(1, MAX_SESSIONS_CAP))
                .unwrap_or(d.max_sessions),
            lexicon_path: std::env::var(ENV_LEXICON_PATH)
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

fn parse_u64_env(raw: Option<String>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
}

fn parse_bool_env(raw: Option<String>) -> Option<bool> {
    let v = raw?.trim().to_ascii_lowercase();
    match v.as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
