//! truth-guard: Binary Entrypoint
//! Boots the Axum HTTP server: detector, history, sessions and `/metrics`.

use shuttle_axum::ShuttleAxum;
use tracing::{info, warn};

use truth_guard::{api, metrics::Metrics, AppState, Settings};

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    // Initialize dev tracing early (no-op in production).
    truth_guard::enable_dev_tracing();

    let settings = Settings::from_env();
    let state = AppState::from_settings(&settings)?;

    let mut router = api::router(state);
    match Metrics::init(settings.analysis_delay) {
        Ok(m) => router = router.merge(m.router()),
        Err(e) => warn!(error = ?e, "metrics disabled"),
    }

    info!(
        delay_ms = settings.analysis_delay.as_millis() as u64,
        history_cap = settings.history_cap,
        max_sessions = settings.max_sessions,
        jitter = settings.jitter,
        "truth-guard ready"
    );

    Ok(router.into())
}
