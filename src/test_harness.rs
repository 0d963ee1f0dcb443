//! Integration test harness for mock publisher/aggregator servers
//!
//! This module provides utilities for running tests against a mock Walrus
//! endpoint instead of the public testnet.

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};

/// A test harness that sets up a mock server playing both publisher and aggregator
pub struct TestHarness {
    pub server: ServerGuard,
}

impl TestHarness {
    /// Create a new test harness with a mock server
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        Self { server }
    }

    /// Get the mock server URL
    pub fn url(&self) -> String {
        self.server.url()
    }

    pub fn newly_created_body(object_id: &str, blob_id: &str, end_epoch: u64) -> Value {
        json!({
            "newlyCreated": {
                "blobObject": {
                    "id": object_id,
                    "registeredEpoch": 1,
                    "blobId": blob_id,
                    "size": 14,
                    "encodingType": "RS2",
                    "certifiedEpoch": 1,
                    "storage": {
                        "id": "0xstorage",
                        "startEpoch": 1,
                        "endEpoch": end_epoch,
                        "storageSize": 66034000
                    },
                    "deletable": false
                },
                "resourceOperation": {
                    "registerFromScratch": {"encodedLength": 66034000, "epochsAhead": 1}
                },
                "cost": 132300
            }
        })
    }

    pub fn already_certified_body(blob_id: &str, end_epoch: u64, tx_digest: &str) -> Value {
        json!({
            "alreadyCertified": {
                "blobId": blob_id,
                "endEpoch": end_epoch,
                "event": {"txDigest": tx_digest, "eventSeq": "0"}
            }
        })
    }

    /// Mock the PUT /v1/blobs endpoint with an arbitrary 200 body
    pub fn mock_store_body(&mut self, epochs: u32, body: &str) -> Mock {
        self.server.mock("PUT", "/v1/blobs")
            .match_query(Matcher::UrlEncoded("epochs".into(), epochs.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create()
    }

    /// Mock the PUT /v1/blobs endpoint for a fresh registration
    pub fn mock_store_newly_created(&mut self, epochs: u32, object_id: &str, blob_id: &str, end_epoch: u64) -> Mock {
        let body = Self::newly_created_body(object_id, blob_id, end_epoch).to_string();
        self.mock_store_body(epochs, &body)
    }

    /// Mock the PUT /v1/blobs endpoint for content that is already stored
    pub fn mock_store_already_certified(&mut self, epochs: u32, blob_id: &str, end_epoch: u64, tx_digest: &str) -> Mock {
        let body = Self::already_certified_body(blob_id, end_epoch, tx_digest).to_string();
        self.mock_store_body(epochs, &body)
    }

    /// Mock the PUT /v1/blobs endpoint for failure (any query)
    pub fn mock_store_failure(&mut self, status: usize) -> Mock {
        self.server.mock("PUT", "/v1/blobs")
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "text/plain")
            .with_body("publisher error")
            .create()
    }

    /// Mock the GET /v1/blobs/{blob_id} endpoint
    pub fn mock_fetch_blob(&mut self, blob_id: &str, bytes: &[u8]) -> Mock {
        self.server.mock("GET", format!("/v1/blobs/{}", blob_id).as_str())
            .with_status(200)
            .with_header("content-type", "application/octet-stream")
            .with_body(bytes)
            .create()
    }

    /// Mock a missing blob on the aggregator (404)
    pub fn mock_fetch_missing(&mut self, blob_id: &str) -> Mock {
        self.server.mock("GET", format!("/v1/blobs/{}", blob_id).as_str())
            .with_status(404)
            .with_body("blob not found")
            .create()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_harness_url_is_local() {
        let harness = TestHarness::new().await;
        assert!(harness.url().starts_with("http://"));
    }

    #[test]
    fn test_fixture_bodies_have_expected_branch() {
        let created = TestHarness::newly_created_body("obj1", "b1", 42);
        assert_eq!(created["newlyCreated"]["blobObject"]["storage"]["endEpoch"], 42);

        let certified = TestHarness::already_certified_body("b2", 10, "tx1");
        assert_eq!(certified["alreadyCertified"]["event"]["txDigest"], "tx1");
    }
}
