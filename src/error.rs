//! Error types for Harmock

use std::io;
use thiserror::Error;

/// Result type for Harmock operations
pub type Result<T> = std::result::Result<T, HarmockError>;

/// Errors that can occur in Harmock
#[derive(Debug, Error)]
pub enum HarmockError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Capture file unreadable or not a capture
    #[error("Capture error: {0}")]
    CaptureError(String),

    /// Malformed dynamic route template (empty segment or unnamed marker)
    #[error("Invalid route template: {0}")]
    InvalidRoute(String),
}
