//! Configuration file utilities
//!
//! Provides helper functions for locating and reading app configuration files.
//! All config files live in the platform-specific config directory under
//! "walrus-uploader/". The uploader only reads them; nothing is persisted.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "walrus-uploader";

/// Get the app's config directory path.
///
/// Returns: `~/.config/walrus-uploader` (Linux)
///          `~/Library/Application Support/walrus-uploader` (macOS)
///          `C:\Users\<User>\AppData\Roaming\walrus-uploader` (Windows)
pub fn get_config_dir() -> Result<PathBuf, String> {
    let config_dir = dirs::config_dir()
        .ok_or("Could not find config directory")?;
    Ok(config_dir.join(APP_DIR_NAME))
}

/// Get the directory where log files are written.
///
/// Returns: `~/.walrus-uploader/logs`
pub fn get_logs_dir() -> Result<PathBuf, String> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| "Could not find home directory".to_string())?;
    Ok(home_dir.join(format!(".{}", APP_DIR_NAME)).join("logs"))
}

/// Get the full path to a config file.
pub fn config_file_path(filename: &str) -> Result<PathBuf, String> {
    Ok(get_config_dir()?.join(filename))
}

/// Load data from a config file in the app's config directory.
///
/// # Returns
/// * `Ok(Some(data))` if file exists and was parsed successfully
/// * `Ok(None)` if file doesn't exist
/// * `Err(...)` if file exists but couldn't be read/parsed
pub fn load_config_file<T: DeserializeOwned>(filename: &str) -> Result<Option<T>, String> {
    load_config_from(&config_file_path(filename)?)
}

/// Load data from a config file at an explicit path.
pub fn load_config_from<T: DeserializeOwned>(config_file: &Path) -> Result<Option<T>, String> {
    if !config_file.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(config_file)
        .map_err(|e| format!("Failed to read config file: {}", e))?;

    let data = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config file: {}", e))?;

    Ok(Some(data))
}
