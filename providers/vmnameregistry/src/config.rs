//! Provider configuration
//!
//! The registry URL is the only required setting. It is validated once and
//! handed to the client constructor; nothing reads it from global state.

use crate::error::ProviderError;
use std::time::Duration;
use url::Url;
use vmname_registry_client::ClientOptions;

/// Settings shared read-only by every resource and data source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Registry endpoint; query strings are appended to it
    pub url: String,
    /// Unset means outbound calls are not bounded by the provider
    pub request_timeout: Option<Duration>,
    /// Detail lookups a listing keeps in flight; 1 is strictly sequential
    pub lookup_concurrency: usize,
}

impl ProviderConfig {
    /// Configuration with defaults for everything but the URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            request_timeout: None,
            lookup_concurrency: 1,
        }
    }

    /// Reject configurations that could never produce a working client
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.url.trim().is_empty() {
            return Err(ProviderError::InvalidConfig("url is required".to_string()));
        }

        let parsed = Url::parse(&self.url)
            .map_err(|e| ProviderError::InvalidConfig(format!("url {:?} is not valid: {}", self.url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ProviderError::InvalidConfig(format!(
                "url {:?} must use http or https",
                self.url
            )));
        }

        if self.request_timeout == Some(Duration::ZERO) {
            return Err(ProviderError::InvalidConfig(
                "request timeout must be greater than zero".to_string(),
            ));
        }

        if self.lookup_concurrency == 0 {
            return Err(ProviderError::InvalidConfig(
                "lookup concurrency must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Client options derived from this configuration
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            request_timeout: self.request_timeout,
            lookup_concurrency: self.lookup_concurrency,
        }
    }
}
