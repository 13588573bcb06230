//! Common utilities for the registry API client
//!
//! Every registry operation is one request against the same endpoint,
//! distinguished only by method and query parameters.

pub mod query;

use crate::error::RegistryError;
use reqwest::{Client, Method, StatusCode};
use tracing::debug;

pub use query::build_query_string;

/// HTTP client wrapper bound to the registry endpoint
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client wrapper.
    ///
    /// The base URL is the full endpoint; query strings are appended to it as is.
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the request URL for a set of query parameters
    pub fn build_url(&self, params: &[(&str, &str)]) -> String {
        if params.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}?{}", self.base_url, build_query_string(params))
        }
    }

    /// Make a GET request; 404 maps to [`RegistryError::NotFound`]
    pub async fn get(&self, params: &[(&str, &str)]) -> Result<String, RegistryError> {
        self.send(Method::GET, params).await
    }

    /// Make a POST request
    pub async fn post(&self, params: &[(&str, &str)]) -> Result<String, RegistryError> {
        self.send(Method::POST, params).await
    }

    /// Make a PUT request
    pub async fn put(&self, params: &[(&str, &str)]) -> Result<String, RegistryError> {
        self.send(Method::PUT, params).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, params: &[(&str, &str)]) -> Result<String, RegistryError> {
        self.send(Method::DELETE, params).await
    }

    async fn send(&self, method: Method, params: &[(&str, &str)]) -> Result<String, RegistryError> {
        let url = self.build_url(params);
        debug!("{} {}", method, url);

        let response = self
            .client
            .request(method.clone(), &url)
            .send()
            .await
            .map_err(RegistryError::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(RegistryError::Http)?;

        // Only reads treat 404 as absence; a 404 on a write is an API failure
        if status == StatusCode::NOT_FOUND && method == Method::GET {
            return Err(RegistryError::NotFound(body));
        }

        if status != StatusCode::OK {
            debug!("{} {} failed: {}", method, url, status);
            return Err(RegistryError::Api(body));
        }

        Ok(body)
    }
}
