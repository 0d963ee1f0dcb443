//! Tracing setup for the uploader binary.
//!
//! Human-readable output goes to stderr. With file logging enabled, JSON
//! lines are also written to a daily rolling file under the logs directory.

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config_utils;

const LOG_FILE_PREFIX: &str = "walrus-uploader.log";

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// `RUST_LOG` if set and valid, otherwise the verbosity default
fn build_filter(verbose: bool, from_env: Option<&str>) -> EnvFilter {
    from_env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)))
}

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
///
/// Keep the returned guard alive for the life of the process, otherwise
/// buffered file output is lost.
pub fn init_tracing(verbose: bool, log_to_file: bool) -> Option<WorkerGuard> {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(verbose, from_env.as_deref());

    let (file_layer, guard) = if log_to_file {
        match config_utils::get_logs_dir().and_then(|dir| {
            fs::create_dir_all(&dir)
                .map_err(|e| format!("Failed to create logs directory: {}", e))?;
            Ok(dir)
        }) {
            Ok(dir) => {
                let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                (Some(fmt::layer().json().with_writer(writer)), Some(guard))
            }
            Err(e) => {
                eprintln!("File logging disabled: {}", e);
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .try_init();

    guard
}
