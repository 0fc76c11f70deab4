// src/core/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("No host given to scan")]
    EmptyDomain,

    /// The API answered but reported `success: false`.
    #[error("Scan failed: {0}")]
    Rejected(String),

    /// Non-2xx HTTP status; carries the envelope's `errors` field.
    #[error("API error ({status}): {errors}")]
    Api { status: u16, errors: String },

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ScanError {
    fn from(err: serde_json::Error) -> Self {
        ScanError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
