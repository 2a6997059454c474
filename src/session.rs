//! # Analysis Session
//! State holder for one interactive view: current input, a busy flag and the last result.
//!
//! `start()` publishes the result only after a fixed synthetic delay (default 3 s).
//! The delay simulates perceived "analysis" latency; the computation itself is
//! synchronous and cheap. One run may be in flight per session; a second
//! `start()` while busy is rejected. The run is a tokio task and can be
//! cancelled through its `PendingAnalysis` handle. Dropping the handle does not
//! cancel: the run completes and overwrites the previous result.
//!
//! `SessionRegistry` keys sessions by id and holds at most `cap` of them; inserting
//! past the cap evicts the oldest idle session (the oldest overall if all are busy).

use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::analyze::{anon_id, validate_input, AnalyzeError, Detector};
use crate::history::History;
use crate::verdict::ClassificationResult;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub input: String,
    pub busy: bool,
    pub result: Option<ClassificationResult>,
}

#[derive(Debug, Default)]
struct State {
    input: String,
    busy: bool,
    result: Option<ClassificationResult>,
    /// Incremented per started run and on cancel; a run whose number no longer
    /// matches must not touch `busy`, `result` or history.
    run: u64,
}

#[derive(Debug, Clone)]
pub struct AnalysisSession {
    detector: Detector,
    delay: Duration,
    history: Option<Arc<History>>,
    state: Arc<Mutex<State>>,
}

/// Handle to an in-flight run.
#[derive(Debug)]
pub struct PendingAnalysis {
    handle: JoinHandle<Result<ClassificationResult, AnalyzeError>>,
    state: Arc<Mutex<State>>,
    run: u64,
}

impl AnalysisSession {
    pub fn new(detector: Detector, delay: Duration) -> Self {
        Self {
            detector,
            delay,
            history: None,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Builder: record completed runs into `history`.
    pub fn with_history(mut self, history: Arc<History>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_busy(&self) -> bool {
        lock(&self.state).busy
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let st = lock(&self.state);
        SessionSnapshot {
            input: st.input.clone(),
            busy: st.busy,
            result: st.result.clone(),
        }
    }

    /// Validate `text`, mark the session busy and schedule the delayed analysis.
    ///
    /// Must be called within a tokio runtime.
    pub fn start(&self, text: impl Into<String>) -> Result<PendingAnalysis, AnalyzeError> {
        let text = text.into();
        validate_input(&text)?;

        let run = {
            let mut st = lock(&self.state);
            if st.busy {
                return Err(AnalyzeError::Busy);
            }
            st.busy = true;
            st.input = text.clone();
            st.run += 1;
            st.run
        };
        debug!(target: "session", id = %anon_id(&text), run, "analysis scheduled");

        let detector = self.detector.clone();
        let delay = self.delay;
        let history = self.history.clone();
        let state = Arc::clone(&self.state);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let outcome = detector.classify(&text);
            if !publish(&state, run, &outcome) {
                debug!(target: "session", run, "stale analysis dropped");
                return Err(AnalyzeError::Cancelled);
            }
            if let (Ok(r), Some(h)) = (&outcome, &history) {
                h.record(&text, r);
            }
            info!(target: "session", run, ok = outcome.is_ok(), "analysis published");
            outcome
        });

        Ok(PendingAnalysis {
            handle,
            state: Arc::clone(&self.state),
            run,
        })
    }

    /// Drop the result and the input text. A run in flight is not affected.
    pub fn clear(&self) {
        let mut st = lock(&self.state);
        st.result = None;
        st.input.clear();
    }
}

impl PendingAnalysis {
    /// Wait for the run; `Cancelled` if it was aborted.
    pub async fn wait(self) -> Result<ClassificationResult, AnalyzeError> {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(_) => Err(AnalyzeError::Cancelled),
        }
    }

    /// Abort the run. The busy flag is released and the previous result is kept.
    ///
    /// The run is invalidated under the lock before aborting, so a task that has
    /// already woken from its delay cannot publish afterwards.
    pub fn cancel(&self) {
        {
            let mut st = lock(&self.state);
            if st.run == self.run && st.busy {
                st.run += 1;
                st.busy = false;
                debug!(target: "session", run = self.run, "analysis cancelled");
            }
        }
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Store `outcome` if `run` is still current. Returns false for a stale run.
fn publish(
    state: &Mutex<State>,
    run: u64,
    outcome: &Result<ClassificationResult, AnalyzeError>,
) -> bool {
    let mut st = lock(state);
    if st.run != run {
        return false;
    }
    st.busy = false;
    if let Ok(r) = outcome {
        st.result = Some(r.clone());
    }
    true
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

const MAX_SESSIONS_CAP: usize = 100_000;

#[derive(Debug, Default)]
struct Registry {
    sessions: HashMap<Uuid, AnalysisSession>,
    /// Insertion order, oldest first.
    order: VecDeque<Uuid>,
}

/// Capped map of live sessions.
#[derive(Debug)]
pub struct SessionRegistry {
    inner: Mutex<Registry>,
    cap: usize,
}

impl SessionRegistry {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: Mutex::new(Registry::default()),
            cap: cap.clamp(1, MAX_SESSIONS_CAP),
        }
    }

    /// Insert `session` under `id`; returns the id evicted to stay within the cap.
    pub fn insert(&self, id: Uuid, session: AnalysisSession) -> Option<Uuid> {
        let mut reg = self.lock();
        let mut evicted = None;
        if !reg.sessions.contains_key(&id) && reg.sessions.len() >= self.cap {
            let victim = reg
                .order
                .iter()
                .position(|k| reg.sessions.get(k).is_some_and(|s| !s.is_busy()))
                .unwrap_or(0);
            if let Some(old) = reg.order.remove(victim) {
                reg.sessions.remove(&old);
                debug!(target: "session", %old, "session evicted");
                evicted = Some(old);
            }
        }
        if reg.sessions.insert(id, session).is_none() {
            reg.order.push_back(id);
        }
        evicted
    }

    pub fn get(&self, id: &Uuid) -> Option<AnalysisSession> {
        self.lock().sessions.get(id).cloned()
    }

    pub fn remove(&self, id: &Uuid) -> Option<AnalysisSession> {
        let mut reg = self.lock();
        let removed = reg.sessions.remove(id)?;
        reg.order.retain(|k| k != id);
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.lock().sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::Label;

    const TEXT: &str = "BREAKING: Scientists say the moon is made of cheese!!!";

    fn session() -> AnalysisSession {
        AnalysisSession::new(Detector::default(), Duration::from_secs(3))
    }

    #[tokio::test(start_paused = true)]
    async fn result_is_published_after_the_delay() {
        let s = session();
        let pending = s.start(TEXT).unwrap();
        assert!(s.is_busy());
        assert!(s.snapshot().result.is_none());

        tokio::time::sleep(Duration::from_millis(2_900)).await;
        assert!(s.is_busy());

        let r = pending.wait().await.unwrap();
        assert_eq!(r.label, Label::Fake);
        let snap = s.snapshot();
        assert!(!snap.busy);
        assert_eq!(snap.input, TEXT);
        assert_eq!(snap.result, Some(r));
    }

    #[tokio::test(start_paused = true)]
    async fn second_start_while_busy_is_rejected() {
        let s = session();
        let first = s.start(TEXT).unwrap();
        assert_eq!(s.start("another statement").unwrap_err(), AnalyzeError::Busy);
        first.wait().await.unwrap();
        assert!(s.start("another statement").is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_input_never_marks_busy() {
        let s = session();
        assert_eq!(s.start("   ").unwrap_err(), AnalyzeError::EmptyInput);
        assert!(!s.is_busy());
        assert!(s.snapshot().input.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_keeps_previous_result() {
        let s = session();
        let before = s.start(TEXT).unwrap().wait().await.unwrap();

        let pending = s.start("A calm and neutral statement about the weather.").unwrap();
        pending.cancel();
        assert!(!s.is_busy());
        assert_eq!(pending.wait().await.unwrap_err(), AnalyzeError::Cancelled);
        assert_eq!(s.snapshot().result, Some(before));
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_handle_still_completes_and_records_history() {
        let history = Arc::new(History::with_capacity(10));
        let s = session().with_history(Arc::clone(&history));
        drop(s.start(TEXT).unwrap());

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert!(!s.is_busy());
        assert!(s.snapshot().result.is_some());
        assert_eq!(history.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_run_that_already_woke_cannot_publish() {
        let history = Arc::new(History::with_capacity(10));
        let s = session().with_history(Arc::clone(&history));
        let before = s.start(TEXT).unwrap().wait().await.unwrap();

        let pending = s.start("A calm and neutral statement about the weather.").unwrap();
        let stale_run = pending.run;
        pending.cancel();

        // a task past its sleep reaches publish with the old run number
        let late = Detector::default().classify("A calm and neutral statement about the weather.");
        assert!(!publish(&s.state, stale_run, &late));
        assert_eq!(s.snapshot().result, Some(before));
        assert!(!s.is_busy());
        assert_eq!(history.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_completion_is_a_no_op() {
        let s = session();
        let pending = s.start(TEXT).unwrap();
        tokio::time::sleep(Duration::from_secs(4)).await;
        assert!(pending.is_finished());
        pending.cancel();
        assert!(s.snapshot().result.is_some());
        assert!(s.start(TEXT).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn registry_evicts_oldest_idle_session() {
        let reg = SessionRegistry::with_capacity(2);
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(reg.insert(a, session()), None);
        assert_eq!(reg.insert(b, session()), None);

        // `a` is busy, so the idle `b` goes first
        let _run = reg.get(&a).unwrap().start(TEXT).unwrap();
        assert_eq!(reg.insert(c, session()), Some(b));
        assert_eq!(reg.len(), 2);
        assert!(reg.get(&a).is_some());
        assert!(reg.get(&b).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn registry_evicts_oldest_when_all_busy() {
        let reg = SessionRegistry::with_capacity(1);
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        reg.insert(a, session());
        let _run = reg.get(&a).unwrap().start(TEXT).unwrap();
        assert_eq!(reg.insert(b, session()), Some(a));
        assert!(reg.remove(&b).is_some());
        assert!(reg.is_empty());
        assert!(reg.remove(&b).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn clear_resets_result_and_input() {
        let s = session();
        s.start(TEXT).unwrap().wait().await.unwrap();
        s.clear();
        let snap = s.snapshot();
        assert!(snap.result.is_none());
        assert!(snap.input.is_empty());
    }
}
