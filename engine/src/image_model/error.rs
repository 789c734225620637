use std::path::PathBuf;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Everything that can go wrong while producing a single image file
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("Image download from {url} failed ({status})")]
    Download { url: String, status: StatusCode },

    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("No image data in response")]
    MissingPayload,

    #[error("Invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(rename = "type", default)]
    error_type: Option<String>,
}

impl GenerateError {
    /// Builds an [`GenerateError::Api`] from a non-success response body.
    /// Falls back to the raw body when it isn't an OpenAI error envelope.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(ErrorEnvelope {
                error:
                    ErrorBody {
                        message,
                        error_type: Some(error_type),
                    },
            }) => format!("{message} [{error_type}]"),
            Ok(ErrorEnvelope { error }) => error.message,
            Err(_) => body.trim().to_string(),
        };
        Self::Api { status, message }
    }
}
