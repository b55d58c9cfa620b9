//! Error types for clip2imgur

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for clip2imgur operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Upload-related errors
#[derive(Debug, Error)]
pub enum UploadError {
    /// DNS, TLS, connect or timeout failure. The request never produced a response.
    #[error("Network error: {0}")]
    Transport(String),

    /// Imgur answered with something other than HTTP 200.
    #[error("Imgur rejected the upload (HTTP {status}): {body}")]
    Rejected {
        status: u16,
        body: serde_json::Value,
    },

    /// HTTP 200 whose body does not carry `data.link`.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Refusing to upload an empty image")]
    EmptyImage,
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UploadError::Transport("Request timed out".to_string())
        } else if err.is_connect() {
            UploadError::Transport(format!("Failed to connect to Imgur: {}", err))
        } else {
            UploadError::Transport(err.to_string())
        }
    }
}

/// Credential store errors
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error(
        "Stored credential at {} is malformed ({reason}). Run `clip2imgur auth` to authorize again.",
        .path.display()
    )]
    Malformed { path: PathBuf, reason: String },

    #[error("Could not determine the user configuration directory")]
    NoConfigDir,

    #[error("Failed to save credential: {0}")]
    SaveError(String),
}

/// Clipboard access errors
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard is unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to encode clipboard image as PNG: {0}")]
    Encode(String),

    #[error("Failed to copy to clipboard: {0}")]
    Copy(String),
}
