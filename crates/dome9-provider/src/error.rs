//! Provider error types

use dome9_sdk::Dome9Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Dome9 error: {0}")]
    Api(#[from] Dome9Error),

    #[error("Missing required attribute: {0}")]
    MissingAttribute(String),

    #[error("Invalid attribute {name}: {reason}")]
    InvalidAttribute { name: String, reason: String },

    #[error("Invalid resource id {id:?}: {reason}")]
    InvalidId { id: String, reason: String },

    #[error("Unknown resource type: {0}")]
    UnknownResourceType(String),

    #[error("Unknown data source: {0}")]
    UnknownDataSource(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProviderError {
    pub fn invalid_attribute(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        ProviderError::InvalidAttribute {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_object_not_found(&self) -> bool {
        matches!(self, ProviderError::Api(e) if e.is_object_not_found())
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
