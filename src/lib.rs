//! Upload files to a Walrus publisher and view them through an aggregator.
//!
//! The core is [`UploadOrchestrator`]: it validates a selected file, stores it
//! with a single `PUT {publisher}/v1/blobs?epochs={n}`, classifies the
//! response and keeps the session's results newest first.

pub mod api_contracts;
pub mod blob_store;
pub mod commands;
pub mod config_utils;
pub mod error;
pub mod logging;
pub mod preview;
pub mod settings;
pub mod state;
pub mod types;
pub mod upload_manager;

#[cfg(test)]
mod test_harness;

use clap::Parser;
use std::process::ExitCode;

pub use api_contracts::StoreResponse;
pub use blob_store::{BlobStore, HttpBlobStore};
pub use error::{ErrorKind, UploadError, ValidationError};
pub use settings::Settings;
pub use state::RequestState;
pub use types::{
    result_display_url, validate_candidate, BlobStatus, StoreResult, UploadCandidate,
    DEFAULT_CONTENT_TYPE, MAX_FILE_SIZE,
};
pub use upload_manager::UploadOrchestrator;

use commands::{resolve_settings, Cli, Command};

/// Entry point for the `walrus-uploader` binary
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = logging::init_tracing(cli.verbose, cli.log_file);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(execute(cli.command)) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute(command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Upload {
            files,
            epochs,
            endpoints,
            json,
            open,
        } => {
            let settings = resolve_settings(Settings::load(), &endpoints, epochs);
            tracing::debug!(?settings, "Resolved settings");

            let orchestrator = UploadOrchestrator::new(HttpBlobStore::new());
            let failures = commands::upload::upload_files(&orchestrator, &settings, &files).await;
            let results = orchestrator.results();

            for failure in &failures {
                eprintln!("{}: {}", failure.path.display(), failure.message);
            }

            if json {
                println!("{}", commands::upload::render_results_json(&results, &settings.aggregator_url)?);
            } else if !results.is_empty() {
                print!("{}", commands::upload::render_results(&results, &settings.aggregator_url));
            }

            if open {
                for result in &results {
                    let url = orchestrator.display_url(result, &settings.aggregator_url);
                    if let Err(e) = commands::browser::open_browser(&url) {
                        eprintln!("{}", e);
                    }
                }
            }

            Ok(if failures.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Url { blob_id, endpoints } => {
            let settings = resolve_settings(Settings::load(), &endpoints, None);
            println!("{}", types::blob_display_url(&settings.aggregator_url, &blob_id));
            Ok(ExitCode::SUCCESS)
        }
        Command::Fetch {
            blob_id,
            output,
            endpoints,
        } => {
            let settings = resolve_settings(Settings::load(), &endpoints, None);
            let store = HttpBlobStore::new().with_fetch_timeout(std::time::Duration::from_secs(60));
            let preview = commands::fetch::fetch_to(
                &store,
                &settings.aggregator_url,
                &blob_id,
                output.as_deref(),
            )
            .await?;

            Ok(if preview.is_placeholder() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}
