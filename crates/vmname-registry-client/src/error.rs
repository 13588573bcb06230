//! Registry client errors

use thiserror::Error;

/// Errors that can occur when interacting with the VM name registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// HTTP request could not be sent or its response could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Registry returned a non-200 status; carries the raw response body
    #[error("API error: {0}")]
    Api(String),

    /// Registry returned 404 for a lookup
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request (rejected before anything is sent)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl RegistryError {
    /// Whether the registry reported the record as absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound(_))
    }
}
