//! Read-path commands: display URL and blob download.

use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::blob_store::BlobStore;
use crate::preview::{fetch_blob_preview, Preview};
use crate::types::DEFAULT_CONTENT_TYPE;

/// Download a blob (or the placeholder) and write it to `output` or stdout.
pub async fn fetch_to<S: BlobStore + ?Sized>(
    store: &S,
    aggregator_url: &str,
    blob_id: &str,
    output: Option<&Path>,
) -> anyhow::Result<Preview> {
    let preview = fetch_blob_preview(store, aggregator_url, blob_id, DEFAULT_CONTENT_TYPE).await;

    match output {
        Some(path) => {
            fs::write(path, preview.bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} bytes to {}", preview.bytes().len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(preview.bytes())
                .and_then(|_| stdout.flush())
                .context("Failed to write to stdout")?;
        }
    }

    Ok(preview)
}
