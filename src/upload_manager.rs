use crate::blob_store::BlobStore;
use crate::error::{UploadError, ValidationError};
use crate::state::{RequestState, Session, SessionSnapshot};
use crate::types::{result_display_url, StoreResult, UploadCandidate};
use std::sync::{Arc, Mutex, MutexGuard};

/// Owns file selection, submission and the session's result list.
///
/// All methods take `&self` so the orchestrator can be shared behind an `Arc`.
/// The session lock is never held across the store request; at most one
/// submission is in flight at a time and a second one is refused, not queued.
pub struct UploadOrchestrator<S: BlobStore> {
    store: S,
    session: Mutex<Session>,
}

impl<S: BlobStore> UploadOrchestrator<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            session: Mutex::new(Session::new()),
        }
    }

    /// Blob store used for submissions and display fetches
    pub fn store(&self) -> &S {
        &self.store
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Hold a newly selected file, replacing any previous selection.
    ///
    /// An oversized file clears the selection and is never held.
    pub fn select_file(&self, candidate: UploadCandidate) -> Result<(), ValidationError> {
        let mut session = self.session();

        if let Err(e) = candidate.validate() {
            tracing::warn!(
                filename = candidate.filename(),
                size = candidate.size(),
                limit = e.limit(),
                "Rejected file: {}",
                e
            );
            session.candidate = None;
            session.last_error = Some(e.to_string());
            return Err(e);
        }

        tracing::debug!(
            filename = candidate.filename(),
            size = candidate.size(),
            content_type = candidate.content_type(),
            "File selected"
        );
        session.candidate = Some(Arc::new(candidate));
        session.last_error = None;
        Ok(())
    }

    pub fn clear_selection(&self) {
        self.session().candidate = None;
    }

    /// Store the held file on the publisher.
    ///
    /// Exactly one attempt is made. On success the result is prepended to the
    /// result list and the selection is cleared; on failure both are left as
    /// they were so the caller can resubmit. Either way the orchestrator ends
    /// up `Idle`.
    pub async fn submit(&self, publisher_url: &str, epochs: u32) -> Result<StoreResult, UploadError> {
        let epochs = epochs.max(1);

        let candidate = {
            let mut session = self.session();

            if session.request_state.is_in_flight() {
                tracing::warn!("Submission refused: an upload is already in progress");
                return Err(UploadError::Busy);
            }

            let candidate = match session.candidate.as_ref() {
                Some(candidate) => Arc::clone(candidate),
                None => {
                    let err = UploadError::NoCandidate;
                    session.last_error = Some(err.to_string());
                    return Err(err);
                }
            };

            if let Err(e) = candidate.validate() {
                session.last_error = Some(e.to_string());
                return Err(e.into());
            }

            session.request_state = RequestState::InFlight;
            candidate
        };

        tracing::info!(
            filename = candidate.filename(),
            size = candidate.size(),
            epochs,
            "Uploading to {}",
            publisher_url
        );

        let outcome = self.store.store(publisher_url, epochs, &candidate).await;

        let mut session = self.session();
        session.request_state = RequestState::Idle;

        match outcome {
            Ok(response) => {
                let result = StoreResult::from_response(response, candidate.content_type());
                tracing::info!(
                    blob_id = result.blob_id(),
                    end_epoch = result.end_epoch(),
                    "{}: {}",
                    result.status(),
                    candidate.filename()
                );
                session.record(result.clone());
                session.candidate = None;
                session.last_error = None;
                Ok(result)
            }
            Err(e) => {
                tracing::error!(filename = candidate.filename(), "Upload failed: {}", e);
                session.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Completed uploads, newest first
    pub fn results(&self) -> Vec<StoreResult> {
        self.session().results.clone()
    }

    pub fn latest(&self) -> Option<StoreResult> {
        self.session().results.first().cloned()
    }

    pub fn request_state(&self) -> RequestState {
        self.session().request_state
    }

    /// Currently held file, if any
    pub fn candidate(&self) -> Option<Arc<UploadCandidate>> {
        self.session().candidate.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session().snapshot()
    }

    pub fn display_url(&self, result: &StoreResult, aggregator_url: &str) -> String {
        result_display_url(result, aggregator_url)
    }
}
