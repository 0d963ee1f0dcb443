/**
 * API Contract Types for the Walrus publisher
 *
 * These types define the structure of the JSON body returned by
 * `PUT {publisher}/v1/blobs?epochs={n}`.
 *
 * Principles:
 * - Only the fields the uploader reads are required; the rest are optional
 *   so publishers that return a subset still parse
 * - Use serde attributes to match the camelCase JSON exactly
 * - Unknown fields are ignored
 */

use serde::{de, Deserialize, Serialize};
use serde_json::Value;

use crate::error::UploadError;

// =============================================================================
// Newly Created Branch
// =============================================================================

/// Storage resource attached to a registered blob
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlobStorage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_epoch: Option<u64>,
    pub end_epoch: u64,             // Last epoch the blob is retained for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_size: Option<u64>,
}

/// On-chain object representing a blob registration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlobObject {
    pub id: String,                 // Sui object id
    pub blob_id: String,            // Content-derived blob id
    pub storage: BlobStorage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_epoch: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certified_epoch: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletable: Option<bool>,
}

/// Storage bought from scratch for a new registration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterFromScratch {
    pub encoded_length: u64,
    pub epochs_ahead: u64,
}

/// How the publisher acquired storage for the blob.
///
/// Publishers may report other operations (e.g. reused storage); those are
/// accepted and left unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceOperation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register_from_scratch: Option<RegisterFromScratch>,
}

/// Body of the `newlyCreated` branch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewlyCreated {
    pub blob_object: BlobObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_operation: Option<ResourceOperation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u64>,
}

// =============================================================================
// Already Certified Branch
// =============================================================================

/// Sui event that originally certified the blob
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlobEvent {
    pub tx_digest: String,
    pub event_seq: String,
}

/// Body of the `alreadyCertified` branch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlreadyCertified {
    pub blob_id: String,
    pub event: BlobEvent,
    pub end_epoch: u64,
}

// =============================================================================
// Store Response
// =============================================================================

/// Discriminated union for the store response.
///
/// Externally tagged, so it serializes as `{"newlyCreated": {...}}` or
/// `{"alreadyCertified": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum StoreResponse {
    NewlyCreated(NewlyCreated),
    AlreadyCertified(AlreadyCertified),
}

/// Raw envelope as it arrives on the wire: both branches optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublisherEnvelope {
    #[serde(default)]
    newly_created: Option<NewlyCreated>,
    #[serde(default)]
    already_certified: Option<AlreadyCertified>,
}

impl PublisherEnvelope {
    /// `newlyCreated` is checked first when a publisher sends both.
    fn into_response(self) -> Option<StoreResponse> {
        match (self.newly_created, self.already_certified) {
            (Some(created), _) => Some(StoreResponse::NewlyCreated(created)),
            (None, Some(certified)) => Some(StoreResponse::AlreadyCertified(certified)),
            (None, None) => None,
        }
    }
}

impl StoreResponse {
    /// Decode a publisher response body.
    ///
    /// Unparseable JSON, `null`, and a branch of the wrong shape fail with
    /// [`UploadError::Decode`]. Any other well-formed body carrying neither
    /// branch (including strings, numbers and arrays) fails with
    /// [`UploadError::ResponseFormat`].
    pub fn from_slice(body: &[u8]) -> Result<Self, UploadError> {
        let value: Value = serde_json::from_slice(body)?;
        match value {
            Value::Object(_) => {
                let envelope: PublisherEnvelope = serde_json::from_value(value)?;
                envelope.into_response().ok_or(UploadError::ResponseFormat)
            }
            // Nothing to look a branch up on
            Value::Null => Err(UploadError::Decode(<serde_json::Error as de::Error>::invalid_type(
                de::Unexpected::Unit,
                &"a publisher response object",
            ))),
            _ => Err(UploadError::ResponseFormat),
        }
    }

    /// Blob id regardless of branch
    pub fn blob_id(&self) -> &str {
        match self {
            StoreResponse::NewlyCreated(c) => &c.blob_object.blob_id,
            StoreResponse::AlreadyCertified(c) => &c.blob_id,
        }
    }

    /// End epoch regardless of branch
    pub fn end_epoch(&self) -> u64 {
        match self {
            StoreResponse::NewlyCreated(c) => c.blob_object.storage.end_epoch,
            StoreResponse::AlreadyCertified(c) => c.end_epoch,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
