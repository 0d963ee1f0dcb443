//! Upload command: select, submit and list files one after another.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::blob_store::BlobStore;
use crate::settings::Settings;
use crate::types::{
    object_explorer_url, result_display_url, tx_explorer_url, BlobStatus, StoreResult,
    UploadCandidate,
};
use crate::upload_manager::UploadOrchestrator;

/// A file that could not be stored, with the message shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Result entry as printed by `--json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResultView<'a> {
    #[serde(flatten)]
    result: &'a StoreResult,
    display_url: String,
}

/// Submit each file in turn through one orchestrator.
///
/// A failure is recorded and the next file is tried; nothing is retried.
/// Returns the failures; the successes accumulate in the orchestrator.
pub async fn upload_files<S: BlobStore>(
    orchestrator: &UploadOrchestrator<S>,
    settings: &Settings,
    files: &[PathBuf],
) -> Vec<UploadFailure> {
    let mut failures = Vec::new();

    for (index, path) in files.iter().enumerate() {
        tracing::info!("[{}/{}] {}", index + 1, files.len(), path.display());

        if let Err(message) = upload_one(orchestrator, settings, path).await {
            failures.push(UploadFailure {
                path: path.clone(),
                message,
            });
        }
    }

    failures
}

async fn upload_one<S: BlobStore>(
    orchestrator: &UploadOrchestrator<S>,
    settings: &Settings,
    path: &Path,
) -> Result<StoreResult, String> {
    let candidate = UploadCandidate::from_path(path)
        .map_err(|e| format!("Failed to read file: {}", e))?;

    orchestrator
        .select_file(candidate)
        .map_err(|e| e.to_string())?;

    orchestrator
        .submit(&settings.publisher_url, settings.epochs)
        .await
        .map_err(|e| e.to_string())
}

/// Human-readable listing, newest first
pub fn render_results(results: &[StoreResult], aggregator_url: &str) -> String {
    let mut out = String::new();

    for (index, result) in results.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&format!("Status: {}\n", result.status()));
        out.push_str(&format!("Blob ID: {}\n", result.blob_id()));
        match result.status() {
            BlobStatus::NewlyCreated => {
                if let Some(object) = result.object_ref() {
                    out.push_str(&format!(
                        "Associated Sui Object: {} ({})\n",
                        object,
                        object_explorer_url(object)
                    ));
                }
            }
            BlobStatus::AlreadyCertified => {
                if let Some(event) = result.prior_event() {
                    out.push_str(&format!(
                        "Previous Sui Certified Event: {} ({})\n",
                        event,
                        tx_explorer_url(event)
                    ));
                }
            }
        }
        out.push_str(&format!("Stored until epoch: {}\n", result.end_epoch()));
        out.push_str(&format!("Content type: {}\n", result.media_type()));
        out.push_str(&format!("URL: {}\n", result_display_url(result, aggregator_url)));
    }

    out
}

/// JSON listing, newest first
pub fn render_results_json(results: &[StoreResult], aggregator_url: &str) -> serde_json::Result<String> {
    let views: Vec<ResultView<'_>> = results
        .iter()
        .map(|result| ResultView {
            result,
            display_url: result_display_url(result, aggregator_url),
        })
        .collect();
    serde_json::to_string_pretty(&views)
}
