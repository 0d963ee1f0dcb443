//! Error types for validating and submitting uploads.

use thiserror::Error;

use crate::types::MAX_FILE_SIZE;

fn as_mib(size: &u64) -> f64 {
    *size as f64 / (1024.0 * 1024.0)
}

/// A candidate file was rejected before any request was issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("File size exceeds 10 MiB limit. Current size: {:.2} MiB", as_mib(.size))]
pub struct ValidationError {
    /// Actual size of the rejected file in bytes
    pub size: u64,
}

impl ValidationError {
    /// Ceiling the file was checked against
    pub fn limit(&self) -> u64 {
        MAX_FILE_SIZE
    }
}

/// Errors surfaced by the upload orchestrator and the blob store client
#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Please select a file to upload")]
    NoCandidate,

    #[error("An upload is already in progress")]
    Busy,

    #[error("Upload failed with status: {status}")]
    UploadFailed { status: u16 },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid response format from server")]
    ResponseFormat,
}

/// Coarse classification used by callers deciding how to present an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// File too large
    Validation,
    /// Submission refused without a request (busy or nothing selected)
    Rejected,
    /// Non-2xx HTTP status
    UploadFailed,
    /// Network failure or unparseable body
    Transport,
    /// Body parsed but carried neither expected branch
    ResponseFormat,
}

impl UploadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UploadError::Validation(_) => ErrorKind::Validation,
            UploadError::NoCandidate | UploadError::Busy => ErrorKind::Rejected,
            UploadError::UploadFailed { .. } => ErrorKind::UploadFailed,
            UploadError::Transport(_) | UploadError::Decode(_) => ErrorKind::Transport,
            UploadError::ResponseFormat => ErrorKind::ResponseFormat,
        }
    }

    /// HTTP status carried by an `UploadFailed` error
    pub fn status(&self) -> Option<u16> {
        match self {
            UploadError::UploadFailed { status } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_just_over_limit() {
        let err = ValidationError { size: 10_485_761 };
        assert_eq!(
            err.to_string(),
            "File size exceeds 10 MiB limit. Current size: 10.00 MiB"
        );
        assert_eq!(err.limit(), 10_485_760);
    }

    #[test]
    fn test_validation_message_rounds_to_two_decimals() {
        let err = ValidationError { size: 12_345_678 };
        assert!(err.to_string().contains("11.77 MiB"));
    }

    #[test]
    fn test_validation_is_transparent_in_upload_error() {
        let err: UploadError = ValidationError { size: 20 * 1024 * 1024 }.into();
        assert_eq!(
            err.to_string(),
            "File size exceeds 10 MiB limit. Current size: 20.00 MiB"
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_upload_failed_carries_status() {
        let err = UploadError::UploadFailed { status: 500 };
        assert_eq!(err.to_string(), "Upload failed with status: 500");
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.kind(), ErrorKind::UploadFailed);
    }

    #[test]
    fn test_rejections_classify_together() {
        assert_eq!(UploadError::Busy.kind(), ErrorKind::Rejected);
        assert_eq!(UploadError::NoCandidate.kind(), ErrorKind::Rejected);
        assert_eq!(UploadError::NoCandidate.status(), None);
    }
}
