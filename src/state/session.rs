//! Session-lifetime state owned by the upload orchestrator.

use std::sync::Arc;

use super::RequestState;
use crate::types::{StoreResult, UploadCandidate};

/// Everything the orchestrator remembers for one session
#[derive(Debug, Default)]
pub struct Session {
    pub request_state: RequestState,
    /// File selected and not yet successfully submitted
    pub candidate: Option<Arc<UploadCandidate>>,
    /// Completed uploads, newest first; unbounded and never deduplicated
    pub results: Vec<StoreResult>,
    /// Message of the most recent failure, cleared by a successful action
    pub last_error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a completed upload so index 0 is always the newest
    pub fn record(&mut self, result: StoreResult) {
        self.results.insert(0, result);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            request_state: self.request_state,
            candidate_filename: self.candidate.as_ref().map(|c| c.filename().to_string()),
            candidate_size: self.candidate.as_ref().map(|c| c.size()),
            result_count: self.results.len(),
            last_error: self.last_error.clone(),
        }
    }
}

/// Serializable view of a session for status output
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SessionSnapshot {
    pub request_state: RequestState,
    pub candidate_filename: Option<String>,
    pub candidate_size: Option<u64>,
    pub result_count: usize,
    pub last_error: Option<String>,
}
