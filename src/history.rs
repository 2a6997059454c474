//! history.rs: capped in-memory log of completed analyses, with filtering and statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use crate::analyze::Topic;
use crate::verdict::{ClassificationResult, Label};

const MAX_CAP: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: Uuid,
    pub statement: String,
    pub result: Label,
    pub confidence: u8,
    pub explanation: String,
    /// For Fake results: where to find the accurate version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_version: Option<String>,
    pub topic: Topic,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryFilter {
    #[default]
    All,
    Real,
    Fake,
}

impl HistoryFilter {
    fn accepts(self, label: Label) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::Real => label == Label::Real,
            HistoryFilter::Fake => label == Label::Fake,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_checks: usize,
    pub real_news: usize,
    pub fake_news: usize,
    /// Rounded mean confidence; 0 when there are no checks.
    pub average_confidence: u8,
}

#[derive(Debug)]
pub struct History {
    inner: Mutex<VecDeque<HistoryItem>>,
    cap: usize,
}

impl History {
    pub fn with_capacity(cap: usize) -> Self {
        let cap = cap.clamp(1, MAX_CAP);
        Self {
            inner: Mutex::new(VecDeque::with_capacity(cap)),
            cap,
        }
    }

    /// Append an entry for `result`, evicting the oldest beyond capacity.
    pub fn record(&self, statement: &str, result: &ClassificationResult) -> HistoryItem {
        let item = HistoryItem {
            id: Uuid::new_v4(),
            statement: statement.trim().to_string(),
            result: result.label,
            confidence: result.confidence,
            explanation: result.explanation.clone(),
            corrected_version: result
                .contextual_info
                .fake_news_debunking
                .as_ref()
                .map(|d| d.correct_information.clone()),
            topic: result.topic,
            timestamp: Utc::now(),
        };

        let mut v = self.lock();
        v.push_back(item.clone());
        while v.len() > self.cap {
            v.pop_front();
        }
        item
    }

    /// Newest first, at most `limit` entries matching `filter`.
    pub fn snapshot(&self, filter: HistoryFilter, limit: usize) -> Vec<HistoryItem> {
        self.lock()
            .iter()
            .rev()
            .filter(|it| filter.accepts(it.result))
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn statistics(&self) -> Statistics {
        let v = self.lock();
        let total = v.len();
        if total == 0 {
            return Statistics::default();
        }
        let fake = v.iter().filter(|it| it.result == Label::Fake).count();
        let sum: u64 = v.iter().map(|it| u64::from(it.confidence)).sum();
        Statistics {
            total_checks: total,
            real_news: total - fake,
            fake_news: fake,
            average_confidence: (sum as f64 / total as f64).round() as u8,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<HistoryItem>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
