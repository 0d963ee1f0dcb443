use crate::api_contracts::StoreResponse;
use crate::error::UploadError;
use crate::types::{blob_display_url, UploadCandidate};
use async_trait::async_trait;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use std::time::Duration;

/// Read and write paths of a Walrus-style blob store.
///
/// Every call is a single attempt; callers decide whether to retry.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// `PUT {publisher_url}/v1/blobs?epochs={epochs}` with the raw file bytes
    async fn store(
        &self,
        publisher_url: &str,
        epochs: u32,
        candidate: &UploadCandidate,
    ) -> Result<StoreResponse, UploadError>;

    /// `GET {aggregator_url}/v1/blobs/{blob_id}`
    async fn fetch_blob(&self, aggregator_url: &str, blob_id: &str) -> Result<Vec<u8>, UploadError>;
}

/// Blob store client over HTTP
pub struct HttpBlobStore {
    client: reqwest::Client,
    fetch_timeout: Option<Duration>,
}

impl HttpBlobStore {
    pub fn new() -> Self {
        // No client-wide timeout: a store runs until the transport gives up.
        // Include version in User-Agent header for tracking
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("WalrusUploader/{}", version);

        let client = reqwest::Client::builder()
            .user_agent(&user_agent)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            fetch_timeout: None,
        }
    }

    /// Bound display fetches (stores are never bounded)
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    fn blobs_url(base_url: &str) -> String {
        format!("{}/v1/blobs", base_url)
    }
}

impl Default for HttpBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn store(
        &self,
        publisher_url: &str,
        epochs: u32,
        candidate: &UploadCandidate,
    ) -> Result<StoreResponse, UploadError> {
        let url = Self::blobs_url(publisher_url);

        tracing::debug!(
            url = %url,
            epochs,
            size = candidate.size(),
            content_type = candidate.content_type(),
            "Sending store request"
        );

        let response = self
            .client
            .put(&url)
            .query(&[("epochs", epochs)])
            .header(CONTENT_LENGTH, candidate.size())
            .header(CONTENT_TYPE, candidate.content_type())
            .body(candidate.bytes().to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "Publisher rejected store request");
            return Err(UploadError::UploadFailed {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let stored = StoreResponse::from_slice(&body)?;
        tracing::debug!(
            blob_id = stored.blob_id(),
            end_epoch = stored.end_epoch(),
            "Publisher accepted store request"
        );
        Ok(stored)
    }

    async fn fetch_blob(&self, aggregator_url: &str, blob_id: &str) -> Result<Vec<u8>, UploadError> {
        let url = blob_display_url(aggregator_url, blob_id);
        tracing::debug!(url = %url, "Fetching blob from aggregator");

        let mut request = self.client.get(&url);
        if let Some(timeout) = self.fetch_timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::UploadFailed {
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
