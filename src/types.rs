//! Core types for upload candidates and stored blob records.
//!
//! An [`UploadCandidate`] lives only between file selection and a successful
//! submission. A [`StoreResult`] is created once per successful store call and
//! is never mutated afterwards.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api_contracts::StoreResponse;
use crate::error::ValidationError;

/// Largest file the default publisher accepts (10 MiB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Media type declared when the file carries none
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Check a file size against [`MAX_FILE_SIZE`]. Pure; no side effects.
pub fn validate_candidate(size: u64) -> Result<(), ValidationError> {
    if size > MAX_FILE_SIZE {
        return Err(ValidationError { size });
    }
    Ok(())
}

/// Address a renderer uses to fetch display bytes for a stored blob.
///
/// The base URL is treated as an opaque string.
pub fn result_display_url(result: &StoreResult, aggregator_url: &str) -> String {
    blob_display_url(aggregator_url, result.blob_id())
}

/// `{aggregator_url}/v1/blobs/{blob_id}`
pub fn blob_display_url(aggregator_url: &str, blob_id: &str) -> String {
    format!("{}/v1/blobs/{}", aggregator_url, blob_id)
}

/// Sui explorer the listing links object and transaction ids to
pub const SUI_EXPLORER_URL: &str = "https://testnet.suivision.xyz";

/// Explorer page for a Sui object id
pub fn object_explorer_url(object_id: &str) -> String {
    format!("{}/object/{}", SUI_EXPLORER_URL, object_id)
}

/// Explorer page for a Sui transaction digest
pub fn tx_explorer_url(tx_digest: &str) -> String {
    format!("{}/txblock/{}", SUI_EXPLORER_URL, tx_digest)
}

/// A file selected for upload but not yet submitted
#[derive(Debug, Clone, PartialEq)]
pub struct UploadCandidate {
    filename: String,
    bytes: Vec<u8>,
    content_type: Option<String>,
}

impl UploadCandidate {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>, content_type: Option<String>) -> Self {
        // An empty declared type means "none", same as a browser File
        let content_type = content_type.filter(|ct| !ct.trim().is_empty());
        Self {
            filename: filename.into(),
            bytes,
            content_type,
        }
    }

    /// Read a file from disk, declaring a media type from its extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = fs::read(path)?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("blob")
            .to_string();
        let content_type = media_type_for_path(path).map(String::from);
        Ok(Self::new(filename, bytes, content_type))
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Declared size in bytes
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Declared media type, if any
    pub fn declared_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Media type sent as `Content-Type`
    pub fn content_type(&self) -> &str {
        self.declared_type().unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_candidate(self.size())
    }
}

/// Guess a media type from a file extension. Unknown extensions declare none.
pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let media_type = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "ico" => "image/vnd.microsoft.icon",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" | "mjs" => "text/javascript",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "wasm" => "application/wasm",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        _ => return None,
    };
    Some(media_type)
}

/// Which branch the publisher answered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlobStatus {
    NewlyCreated,
    AlreadyCertified,
}

impl BlobStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BlobStatus::NewlyCreated => "Newly created",
            BlobStatus::AlreadyCertified => "Already certified",
        }
    }
}

impl fmt::Display for BlobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized record of one completed upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreResult {
    status: BlobStatus,
    blob_id: String,
    end_epoch: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    object_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prior_event: Option<String>,
    media_type: String,
}

impl StoreResult {
    /// Normalize a publisher response into a record.
    pub fn from_response(response: StoreResponse, media_type: impl Into<String>) -> Self {
        let media_type = media_type.into();
        match response {
            StoreResponse::NewlyCreated(created) => Self {
                status: BlobStatus::NewlyCreated,
                blob_id: created.blob_object.blob_id,
                end_epoch: created.blob_object.storage.end_epoch,
                object_ref: Some(created.blob_object.id),
                prior_event: None,
                media_type,
            },
            StoreResponse::AlreadyCertified(certified) => Self {
                status: BlobStatus::AlreadyCertified,
                blob_id: certified.blob_id,
                end_epoch: certified.end_epoch,
                object_ref: None,
                prior_event: Some(certified.event.tx_digest),
                media_type,
            },
        }
    }

    pub fn status(&self) -> BlobStatus {
        self.status
    }

    pub fn blob_id(&self) -> &str {
        &self.blob_id
    }

    pub fn end_epoch(&self) -> u64 {
        self.end_epoch
    }

    /// Sui object id, present only for newly created blobs
    pub fn object_ref(&self) -> Option<&str> {
        self.object_ref.as_deref()
    }

    /// Certifying transaction digest, present only for already certified blobs
    pub fn prior_event(&self) -> Option<&str> {
        self.prior_event.as_deref()
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_contracts::{
        AlreadyCertified, BlobEvent, BlobObject, BlobStorage, NewlyCreated,
    };
    use tempfile::TempDir;

    fn newly_created(object_id: &str, blob_id: &str, end_epoch: u64) -> StoreResponse {
        StoreResponse::NewlyCreated(NewlyCreated {
            blob_object: BlobObject {
                id: object_id.to_string(),
                blob_id: blob_id.to_string(),
                storage: BlobStorage {
                    id: None,
                    start_epoch: None,
                    end_epoch,
                    storage_size: None,
                },
                registered_epoch: None,
                size: None,
                encoding_type: None,
                certified_epoch: None,
                deletable: None,
            },
            resource_operation: None,
            cost: None,
        })
    }

    #[test]
    fn test_validate_candidate_boundary() {
        assert!(validate_candidate(0).is_ok());
        assert!(validate_candidate(10_485_760).is_ok());

        let err = validate_candidate(10_485_761).unwrap_err();
        assert_eq!(err.size, 10_485_761);
        assert!(err.to_string().contains("10.00 MiB"));
    }

    #[test]
    fn test_validate_candidate_reports_actual_size() {
        let err = validate_candidate(12_345_678).unwrap_err();
        assert!(err.to_string().contains("11.77 MiB"));
    }

    #[test]
    fn test_candidate_defaults_content_type() {
        let candidate = UploadCandidate::new("data.bin", vec![1, 2, 3], None);
        assert_eq!(candidate.size(), 3);
        assert_eq!(candidate.declared_type(), None);
        assert_eq!(candidate.content_type(), "application/octet-stream");
    }

    #[test]
    fn test_candidate_empty_declared_type_is_none() {
        let candidate = UploadCandidate::new("data", vec![], Some(String::new()));
        assert_eq!(candidate.content_type(), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_candidate_from_path_infers_media_type() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Cat.PNG");
        fs::write(&path, b"\x89PNG fake").unwrap();

        let candidate = UploadCandidate::from_path(&path).unwrap();
        assert_eq!(candidate.filename(), "Cat.PNG");
        assert_eq!(candidate.content_type(), "image/png");
        assert_eq!(candidate.bytes(), b"\x89PNG fake");
    }

    #[test]
    fn test_candidate_from_path_unknown_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("archive.xyz");
        fs::write(&path, b"payload").unwrap();

        let candidate = UploadCandidate::from_path(&path).unwrap();
        assert_eq!(candidate.declared_type(), None);
        assert_eq!(candidate.content_type(), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_candidate_from_missing_path() {
        let temp_dir = TempDir::new().unwrap();
        assert!(UploadCandidate::from_path(&temp_dir.path().join("missing.png")).is_err());
    }

    #[test]
    fn test_explorer_urls() {
        assert_eq!(
            object_explorer_url("0xabc"),
            "https://testnet.suivision.xyz/object/0xabc"
        );
        assert_eq!(tx_explorer_url("Dg1"), "https://testnet.suivision.xyz/txblock/Dg1");
    }

    #[test]
    fn test_store_result_from_newly_created() {
        let result = StoreResult::from_response(newly_created("obj1", "b1", 42), "image/png");

        assert_eq!(result.status(), BlobStatus::NewlyCreated);
        assert_eq!(result.blob_id(), "b1");
        assert_eq!(result.object_ref(), Some("obj1"));
        assert_eq!(result.prior_event(), None);
        assert_eq!(result.end_epoch(), 42);
        assert_eq!(result.media_type(), "image/png");
    }

    #[test]
    fn test_store_result_from_already_certified() {
        let response = StoreResponse::AlreadyCertified(AlreadyCertified {
            blob_id: "b2".to_string(),
            event: BlobEvent {
                tx_digest: "tx1".to_string(),
                event_seq: "0".to_string(),
            },
            end_epoch: 10,
        });

        let result = StoreResult::from_response(response, DEFAULT_CONTENT_TYPE);
        assert_eq!(result.status(), BlobStatus::AlreadyCertified);
        assert_eq!(result.blob_id(), "b2");
        assert_eq!(result.end_epoch(), 10);
        assert_eq!(result.prior_event(), Some("tx1"));
        assert_eq!(result.object_ref(), None);
    }

    #[test]
    fn test_store_result_serialize_omits_absent_refs() {
        let result = StoreResult::from_response(newly_created("obj1", "b1", 42), "image/png");
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""status":"newlyCreated""#));
        assert!(json.contains(r#""objectRef":"obj1""#));
        assert!(!json.contains("priorEvent"));
    }

    #[test]
    fn test_blob_status_labels() {
        assert_eq!(BlobStatus::NewlyCreated.to_string(), "Newly created");
        assert_eq!(BlobStatus::AlreadyCertified.to_string(), "Already certified");
    }

    #[test]
    fn test_result_display_url() {
        let result = StoreResult::from_response(newly_created("obj1", "b1", 42), "image/png");
        assert_eq!(
            result_display_url(&result, "https://agg.example"),
            "https://agg.example/v1/blobs/b1"
        );
    }
}
