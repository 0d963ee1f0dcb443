//! Command-line commands.
//!
//! The argument types live here; each subcommand's behaviour lives in its own
//! submodule.

pub mod browser;
pub mod fetch;
pub mod upload;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "walrus-uploader", version, about = "Upload files to Walrus and view them through an aggregator")]
pub struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs under ~/.walrus-uploader/logs
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store one or more files on the publisher and list the results
    Upload {
        /// Files to upload, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Number of epochs to store each file for (values below 1 become 1)
        #[arg(long, allow_negative_numbers = true)]
        epochs: Option<i64>,

        #[command(flatten)]
        endpoints: EndpointArgs,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Open each result's display URL in the default browser
        #[arg(long)]
        open: bool,
    },
    /// Print the aggregator URL for a blob
    Url {
        blob_id: String,

        #[command(flatten)]
        endpoints: EndpointArgs,
    },
    /// Download a blob's display bytes (placeholder image if unavailable)
    Fetch {
        blob_id: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        endpoints: EndpointArgs,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct EndpointArgs {
    /// Publisher base URL
    #[arg(long)]
    pub publisher: Option<String>,

    /// Aggregator base URL
    #[arg(long)]
    pub aggregator: Option<String>,
}

/// Layer command-line values over the loaded settings.
pub fn resolve_settings(base: Settings, endpoints: &EndpointArgs, epochs: Option<i64>) -> Settings {
    let mut settings = base;
    settings.apply_overrides(endpoints.publisher.clone(), endpoints.aggregator.clone(), epochs);
    settings
}
