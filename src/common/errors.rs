use serde_json::Value;
use thiserror::Error;

/// Failure of a single verification upload.
///
/// Variants only hold owned strings and JSON so the error can be cloned into
/// GUI messages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UploadError {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Request failed with status code {status}")]
    HttpStatus {
        status: u16,
        reason: Option<String>,
        /// JSON body returned along with the error status, if any.
        body: Option<Value>,
    },
    #[error("Unknown error occurred: {0}")]
    Unknown(String),
}

impl UploadError {
    pub fn body(&self) -> Option<&Value> {
        match self {
            UploadError::HttpStatus { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            UploadError::Transport(_) => "transport",
            UploadError::HttpStatus { .. } => "http_status",
            UploadError::Unknown(_) => "unknown",
        }
    }
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() || err.is_body() {
            UploadError::Transport(err.to_string())
        } else if let Some(status) = err.status() {
            UploadError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().map(str::to_string),
                body: None,
            }
        } else {
            UploadError::Unknown(err.to_string())
        }
    }
}

/// Rejection of a file at selection time, before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Unsupported file type '{0}'. Use an image (png, jpg, jpeg, bmp, gif, webp)")]
    UnsupportedType(String),
    #[error("File is too large ({size} bytes). Maximum size is {max} bytes")]
    TooLarge { size: u64, max: u64 },
    #[error("Could not read file: {0}")]
    Io(String),
}

impl From<std::io::Error> for SelectionError {
    fn from(err: std::io::Error) -> Self {
        SelectionError::Io(err.to_string())
    }
}
