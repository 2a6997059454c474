//! Prometheus exposition for the detector.
//!
//! Series:
//! - `detections_total{label="real"|"fake"}`: completed classifications
//! - `analysis_delay_ms`: configured session delay (gauge)

use anyhow::Context;
use axum::{extract::State, routing::get, Router};
use metrics::gauge;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder and publish the configured analysis delay.
    /// Can only succeed once per process.
    pub fn init(analysis_delay: Duration) -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;

        let m = Self::from_handle(handle);
        m.record_delay(analysis_delay);
        Ok(m)
    }

    /// Wrap a handle from a recorder the caller owns (e.g. a thread-local one).
    pub fn from_handle(handle: PrometheusHandle) -> Self {
        Self { handle }
    }

    pub fn record_delay(&self, analysis_delay: Duration) {
        gauge!("analysis_delay_ms").set(analysis_delay.as_millis() as f64);
    }

    /// `GET /metrics` in the Prometheus text format.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/metrics", get(render))
            .with_state(self.handle.clone())
    }
}

async fn render(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}
