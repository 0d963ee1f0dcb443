//! Request lifecycle of the upload orchestrator.

/// Whether a store request is currently outstanding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RequestState {
    /// Ready to accept a submission
    #[default]
    Idle,
    /// A store request has been issued and not yet completed
    InFlight,
}

impl RequestState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestState::InFlight)
    }
}
