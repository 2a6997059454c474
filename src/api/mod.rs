//! HTTP surface for the presentation layer.
//!
//! - `GET    /health`
//! - `POST   /api/detect`                  immediate classification
//! - `POST   /api/sessions`                create a view session (oldest idle evicted past the cap)
//! - `GET    /api/sessions/{id}`           busy flag, input, last result
//! - `DELETE /api/sessions/{id}`
//! - `POST   /api/sessions/{id}/analyze`   delayed analysis (202)
//! - `DELETE /api/sessions/{id}/result`    clear result and input
//! - `GET    /api/history?filter=&limit=`
//! - `GET    /api/history/stats`

pub mod error;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::info;
use uuid::Uuid;

use crate::analyze::Detector;
use crate::config::Settings;
use crate::history::{History, HistoryFilter, HistoryItem, Statistics};
use crate::session::{AnalysisSession, SessionRegistry, SessionSnapshot};
use crate::verdict::ClassificationResult;

pub use error::{ApiError, ErrorResponse};

const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Clone)]
pub struct AppState {
    detector: Detector,
    history: Arc<History>,
    sessions: Arc<SessionRegistry>,
    analysis_delay: Duration,
}

impl AppState {
    pub fn new(detector: Detector, settings: &Settings) -> Self {
        Self {
            detector,
            history: Arc::new(History::with_capacity(settings.history_cap)),
            sessions: Arc::new(SessionRegistry::with_capacity(settings.max_sessions)),
            analysis_delay: settings.analysis_delay,
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self::new(Detector::from_settings(settings)?, settings))
    }

    pub fn history(&self) -> &Arc<History> {
        &self.history
    }

    fn session(&self, id: Uuid) -> Result<AnalysisSession, ApiError> {
        self.sessions
            .get(&id)
            .ok_or(ApiError::SessionNotFound(id))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/detect", post(detect))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session).delete(delete_session))
        .route("/api/sessions/{id}/analyze", post(start_analysis))
        .route("/api/sessions/{id}/result", delete(clear_session))
        .route("/api/history", get(history))
        .route("/api/history/stats", get(history_stats))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Deserialize)]
struct DetectReq {
    text: String,
}

async fn detect(
    State(state): State<AppState>,
    Json(body): Json<DetectReq>,
) -> Result<Json<ClassificationResult>, ApiError> {
    let result = state.detector.classify(&body.text)?;
    state.history.record(&body.text, &result);
    Ok(Json(result))
}

#[derive(Serialize)]
struct SessionCreated {
    id: Uuid,
}

async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionCreated>) {
    let id = Uuid::new_v4();
    let session = AnalysisSession::new(state.detector.clone(), state.analysis_delay)
        .with_history(Arc::clone(&state.history));
    let evicted = state.sessions.insert(id, session);
    info!(target: "api", %id, ?evicted, "session created");
    (StatusCode::CREATED, Json(SessionCreated { id }))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    Ok(Json(state.session(id)?.snapshot()))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .sessions
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(ApiError::SessionNotFound(id))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisAccepted {
    busy: bool,
    delay_ms: u64,
}

async fn start_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<DetectReq>,
) -> Result<(StatusCode, Json<AnalysisAccepted>), ApiError> {
    let session = state.session(id)?;
    // The handle is dropped on purpose: the run completes on its own and the
    // client polls GET /api/sessions/{id}.
    let _pending = session.start(body.text)?;
    Ok((
        StatusCode::ACCEPTED,
        Json(AnalysisAccepted {
            busy: true,
            delay_ms: u64::try_from(session.delay().as_millis()).unwrap_or(u64::MAX),
        }),
    ))
}

async fn clear_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.session(id)?.clear();
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct HistoryQuery {
    #[serde(default)]
    filter: HistoryFilter,
    limit: Option<usize>,
}

async fn history(
    State(state): State<AppState>,
    Query(q): Query<HistoryQuery>,
) -> Json<Vec<HistoryItem>> {
    let limit = q.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    Json(state.history.snapshot(q.filter, limit))
}

async fn history_stats(State(state): State<AppState>) -> Json<Statistics> {
    Json(state.history.statistics())
}
