//! Error types for the renderer

use thiserror::Error;

/// Result type alias for render operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering a figure
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to launch the headless browser
    #[error("Browser launch failed: {0}")]
    LaunchError(String),

    /// Failed to load the generated chart page
    #[error("Failed to load chart page: {0}")]
    LoadError(String),

    /// The chart container never appeared in the page
    #[error("Chart container did not appear within {0}ms")]
    WaitTimeout(u64),

    /// Failed to capture the screenshot
    #[error("Screenshot capture failed: {0}")]
    CaptureError(String),

    /// Invalid image options
    #[error("Invalid image options: {0}")]
    ConfigError(String),

    /// I/O error while persisting output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}
