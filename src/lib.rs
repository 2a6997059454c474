// src/lib.rs
// Public library surface for the server, the CLI and integration tests.

pub mod analyze;
pub mod api;
pub mod config;
pub mod history;
pub mod metrics;
pub mod session;
pub mod verdict;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{classify, AnalyzeError, Detector};
pub use crate::api::{router, AppState};
pub use crate::config::{Lexicon, Settings};
pub use crate::session::{AnalysisSession, PendingAnalysis, SessionRegistry};
pub use crate::verdict::{ClassificationResult, Label};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - TRUTHGUARD_DEV_LOG=1
///
/// Uses `try_init`, so an already installed subscriber (e.g. Shuttle's) wins.
pub fn enable_dev_tracing() {
    let dev_flag = std::env::var("TRUTHGUARD_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("detector=debug,session=debug,api=info,warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}
