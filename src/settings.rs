//! User-editable upload settings.
//!
//! Resolution order, lowest to highest priority: built-in defaults,
//! `settings.json` in the config directory, `WALRUS_*` environment
//! variables, then explicit command-line values.

use serde::{Deserialize, Serialize};
use std::env;

use crate::config_utils;

pub const DEFAULT_PUBLISHER_URL: &str = "https://publisher.walrus-testnet.walrus.space";
pub const DEFAULT_AGGREGATOR_URL: &str = "https://aggregator.walrus-testnet.walrus.space";
pub const DEFAULT_EPOCHS: u32 = 1;

const SETTINGS_FILE: &str = "settings.json";

/// Clamp any requested epoch count up to the minimum of 1.
pub fn clamp_epochs(requested: i64) -> u32 {
    requested.clamp(1, i64::from(u32::MAX)) as u32
}

/// Where to store, where to read back, and for how long
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub publisher_url: String,
    pub aggregator_url: String,
    pub epochs: u32,
}

/// Shape of `settings.json`; every field optional
#[derive(Debug, Clone, Default, Deserialize)]
struct SettingsFile {
    publisher_url: Option<String>,
    aggregator_url: Option<String>,
    epochs: Option<i64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            publisher_url: DEFAULT_PUBLISHER_URL.to_string(),
            aggregator_url: DEFAULT_AGGREGATOR_URL.to_string(),
            epochs: DEFAULT_EPOCHS,
        }
    }
}

impl Settings {
    /// Defaults, then the config file, then the environment.
    ///
    /// An unreadable config file is logged and skipped.
    pub fn load() -> Self {
        let mut settings = Self::default();

        match config_utils::load_config_file::<SettingsFile>(SETTINGS_FILE) {
            Ok(Some(file)) => {
                tracing::debug!("Loaded {}", SETTINGS_FILE);
                settings.apply_file(file);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Ignoring {}: {}", SETTINGS_FILE, e),
        }

        settings.apply_env(|key| env::var(key).ok());
        settings
    }

    fn apply_file(&mut self, file: SettingsFile) {
        self.apply_overrides(file.publisher_url, file.aggregator_url, file.epochs);
    }

    /// Read `WALRUS_PUBLISHER_URL`, `WALRUS_AGGREGATOR_URL` and `WALRUS_EPOCHS`
    /// through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let epochs = lookup("WALRUS_EPOCHS").and_then(|raw| match raw.trim().parse::<i64>() {
            Ok(n) => Some(n),
            Err(_) => {
                tracing::warn!("Ignoring WALRUS_EPOCHS={:?}: not an integer", raw);
                None
            }
        });

        self.apply_overrides(
            lookup("WALRUS_PUBLISHER_URL"),
            lookup("WALRUS_AGGREGATOR_URL"),
            epochs,
        );
    }

    /// Replace whichever values are given. Epochs below 1 clamp to 1.
    pub fn apply_overrides(
        &mut self,
        publisher_url: Option<String>,
        aggregator_url: Option<String>,
        epochs: Option<i64>,
    ) {
        if let Some(url) = publisher_url.filter(|u| !u.is_empty()) {
            self.publisher_url = url;
        }
        if let Some(url) = aggregator_url.filter(|u| !u.is_empty()) {
            self.aggregator_url = url;
        }
        if let Some(epochs) = epochs {
            self.epochs = clamp_epochs(epochs);
        }
    }
}
