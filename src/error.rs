// src/error.rs
use thiserror::Error;

/// A single feed or price endpoint could not deliver usable data.
///
/// Always absorbed by the owning fetch step; never surfaces past it.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("malformed payload: {0}")]
    Parse(String),
    #[error("payload contained no usable data")]
    Empty,
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => FetchError::Status(status.as_u16()),
            None => FetchError::Http(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

impl From<csv::Error> for FetchError {
    fn from(e: csv::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

impl From<quick_xml::de::DeError> for FetchError {
    fn from(e: quick_xml::de::DeError) -> Self {
        FetchError::Parse(e.to_string())
    }
}
