//! Dome9 SDK error types

use thiserror::Error;

/// Error body returned by the Dome9 API for a non-2xx response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    /// HTTP method of the failed request
    pub method: String,

    /// Request path relative to the API base URL
    pub path: String,

    /// HTTP status code
    pub status: u16,

    /// Server supplied message (or raw body when it is not JSON)
    pub message: String,
}

impl ErrorResponse {
    /// Whether the remote system reports that the object does not exist
    pub fn is_object_not_found(&self) -> bool {
        self.status == 404 || self.message.to_lowercase().contains("object not found")
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: {} {}",
            self.method, self.path, self.status, self.message
        )
    }
}

#[derive(Error, Debug)]
pub enum Dome9Error {
    #[error("API error: {0}")]
    Api(ErrorResponse),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{0} parameter must be passed")]
    MissingParameter(&'static str),

    #[error("failed to {operation} after {attempts} attempts: {source}")]
    RetriesExhausted {
        operation: String,
        attempts: u32,
        #[source]
        source: Box<Dome9Error>,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Dome9Error {
    /// HTTP status of the response behind this error, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Dome9Error::Api(response) => Some(response.status),
            Dome9Error::Http(e) => e.status().map(|s| s.as_u16()),
            Dome9Error::RetriesExhausted { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Whether this error means the remote object is gone
    pub fn is_object_not_found(&self) -> bool {
        match self {
            Dome9Error::Api(response) => response.is_object_not_found(),
            Dome9Error::RetriesExhausted { source, .. } => source.is_object_not_found(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Dome9Error>;
