//! Upload session state.
//!
//! This module contains the request lifecycle and the per-session
//! candidate/result storage owned by the orchestrator.

mod request_state;
mod session;

pub use request_state::RequestState;
pub use session::{Session, SessionSnapshot};
