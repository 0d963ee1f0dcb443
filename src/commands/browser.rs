//! Browser-related commands.

/// Open a URL in the system's default browser
pub fn open_browser(url: &str) -> Result<(), String> {
    tracing::info!("Opening browser to: {}", url);
    match open::that(url) {
        Ok(_) => {
            tracing::debug!("Browser opened successfully");
            Ok(())
        }
        Err(e) => {
            let error_msg = format!("Failed to open browser: {}", e);
            tracing::error!("{}", error_msg);
            Err(error_msg)
        }
    }
}
