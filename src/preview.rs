//! Display fetch for stored blobs with a placeholder fallback.
//!
//! A failed fetch never fails the caller; it degrades to a "No image"
//! placeholder so one broken blob does not break the whole listing.

use crate::blob_store::BlobStore;
use crate::types::StoreResult;

pub const PLACEHOLDER_MEDIA_TYPE: &str = "image/svg+xml";

pub const PLACEHOLDER_SVG: &str = r##"<svg width="200" height="200" viewBox="0 0 200 200" fill="none" xmlns="http://www.w3.org/2000/svg"><rect width="200" height="200" fill="#E5E5E5"/><text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" fill="#AAAAAA" font-size="16" font-family="sans-serif">No image</text></svg>"##;

/// What a renderer should show for a stored blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Content { bytes: Vec<u8>, media_type: String },
    Placeholder,
}

impl Preview {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Preview::Placeholder)
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Preview::Content { bytes, .. } => bytes,
            Preview::Placeholder => PLACEHOLDER_SVG.as_bytes(),
        }
    }

    pub fn media_type(&self) -> &str {
        match self {
            Preview::Content { media_type, .. } => media_type,
            Preview::Placeholder => PLACEHOLDER_MEDIA_TYPE,
        }
    }
}

/// Fetch display bytes for `blob_id`, falling back to the placeholder.
pub async fn fetch_blob_preview<S: BlobStore + ?Sized>(
    store: &S,
    aggregator_url: &str,
    blob_id: &str,
    media_type: &str,
) -> Preview {
    match store.fetch_blob(aggregator_url, blob_id).await {
        Ok(bytes) => Preview::Content {
            bytes,
            media_type: media_type.to_string(),
        },
        Err(e) => {
            tracing::warn!(blob_id, "Showing placeholder, display fetch failed: {}", e);
            Preview::Placeholder
        }
    }
}

/// Fetch display bytes for a stored result, using its recorded media type.
pub async fn fetch_preview<S: BlobStore + ?Sized>(
    store: &S,
    aggregator_url: &str,
    result: &StoreResult,
) -> Preview {
    fetch_blob_preview(store, aggregator_url, result.blob_id(), result.media_type()).await
}
