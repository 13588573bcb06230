//! VM name registry API client
//!
//! All operations target the single registry endpoint and differ only by
//! HTTP method and query parameters:
//!
//! | Operation | Method | Parameters |
//! |---|---|---|
//! | lookup | GET | `rowkey`, `environment`?, `details=true`? |
//! | list | GET | `environment`, `location`? |
//! | create | POST | `environment`, `location`, `status`, `businessunit` |
//! | update | PUT | `environment`, `rowkey`, `status`, `businessunit` |
//! | delete | DELETE | `environment`, `rowkey` |

use crate::common::HttpClient;
use crate::error::RegistryError;
use crate::models::*;
use crate::naming::derive_location;
use crate::registry_trait::RegistryClientTrait;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Tuning knobs for [`RegistryClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
    /// Number of detail lookups a listing keeps in flight (minimum 1)
    pub lookup_concurrency: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: None,
            lookup_concurrency: 1,
        }
    }
}

/// VM name registry API client
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: HttpClient,
    lookup_concurrency: usize,
}

impl RegistryClient {
    /// Create a client with default options
    ///
    /// # Arguments
    /// * `base_url` - Registry endpoint (e.g., "https://registry.example.com/api/vmname")
    pub fn new(base_url: String) -> Result<Self, RegistryError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a client with explicit options
    pub fn with_options(base_url: String, options: ClientOptions) -> Result<Self, RegistryError> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(RegistryError::Http)?;

        Ok(Self {
            http: HttpClient::new(client, base_url),
            lookup_concurrency: options.lookup_concurrency.max(1),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Look up a single VM name.
    ///
    /// With `details`, the JSON body is parsed for status and business unit
    /// and `vm_name` echoes the queried name. Without it, the plain-text body
    /// is the registry's confirmation of the name.
    ///
    /// # Returns
    /// * `Ok(VmNameRecord)` - The record, with location derived from its name
    /// * `Err(RegistryError::NotFound)` - The registry answered 404
    /// * `Err(RegistryError)` - Any other failure
    pub async fn get_vm_name(
        &self,
        vm_name: &str,
        environment: Option<&str>,
        details: bool,
    ) -> Result<VmNameRecord, RegistryError> {
        let mut params = vec![("rowkey", vm_name)];
        if let Some(environment) = environment {
            params.insert(0, ("environment", environment));
        }
        if details {
            params.push(("details", "true"));
        }

        debug!("Looking up VM name {}", vm_name);
        let body = self.http.get(&params).await?;

        let (confirmed, details) = if details {
            (vm_name.to_string(), RecordDetails::from_body(&body))
        } else {
            (body, RecordDetails::default())
        };

        Ok(VmNameRecord {
            vm_name: confirmed,
            location: derive_location(vm_name),
            details,
        })
    }

    /// List the names of an environment together with their statuses.
    ///
    /// Statuses are fetched one detail lookup per name. A failed lookup is
    /// recorded as [`ERROR_STATUS`] for that name and does not fail the listing.
    pub async fn list_vm_names(
        &self,
        environment: &str,
        location: Option<&str>,
    ) -> Result<VmNameListing, RegistryError> {
        let mut params = vec![("environment", environment)];
        if let Some(location) = location {
            params.push(("location", location));
        }

        let body = self.http.get(&params).await.map_err(|e| match e {
            // A listing has no "absent" outcome
            RegistryError::NotFound(body) => RegistryError::Api(body),
            other => other,
        })?;
        let vm_names = parse_name_list(&body);
        debug!("Registry listed {} names for environment {}", vm_names.len(), environment);

        // Owned names keep the fan-out future Send behind the async trait
        let fetched: Vec<(String, Option<String>)> = stream::iter(vm_names.clone())
            .map(|name| async move {
                let status = self.lookup_status(environment, &name).await;
                (name, status)
            })
            .buffered(self.lookup_concurrency)
            .collect()
            .await;

        let statuses = fetched
            .into_iter()
            .filter_map(|(name, status)| status.map(|status| (name, status)))
            .collect();

        Ok(VmNameListing {
            environment: environment.to_string(),
            vm_names,
            statuses,
        })
    }

    async fn lookup_status(&self, environment: &str, vm_name: &str) -> Option<String> {
        match self.get_vm_name(vm_name, Some(environment), true).await {
            Ok(record) => record.details.status,
            Err(e) => {
                warn!("Failed to fetch status for {}: {}", vm_name, e);
                Some(ERROR_STATUS.to_string())
            }
        }
    }

    /// Allocate a new VM name
    ///
    /// # Returns
    /// * `Ok(String)` - The name assigned by the registry
    pub async fn create_vm_name(&self, request: &CreateVmNameRequest) -> Result<String, RegistryError> {
        let params = [
            ("environment", request.environment.as_str()),
            ("location", request.location.as_str()),
            ("status", request.effective_status()),
            ("businessunit", request.business_unit.as_str()),
        ];

        debug!("Allocating VM name in {}/{}", request.environment, request.location);
        let body = self.http.post(&params).await?;
        Ok(parse_created_name(&body))
    }

    /// Update status and business unit of an existing name
    pub async fn update_vm_name(&self, request: &UpdateVmNameRequest) -> Result<(), RegistryError> {
        let params = [
            ("environment", request.environment.as_str()),
            ("rowkey", request.vm_name.as_str()),
            ("status", request.status.as_str()),
            ("businessunit", request.business_unit.as_str()),
        ];

        debug!("Updating VM name {}", request.vm_name);
        self.http.put(&params).await?;
        Ok(())
    }

    /// Release a VM name
    pub async fn delete_vm_name(&self, environment: &str, vm_name: &str) -> Result<(), RegistryError> {
        let params = [("environment", environment), ("rowkey", vm_name)];

        debug!("Deleting VM name {}", vm_name);
        self.http.delete(&params).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl RegistryClientTrait for RegistryClient {
    async fn get_vm_name(
        &self,
        vm_name: &str,
        environment: Option<&str>,
        details: bool,
    ) -> Result<VmNameRecord, RegistryError> {
        self.get_vm_name(vm_name, environment, details).await
    }

    async fn list_vm_names(
        &self,
        environment: &str,
        location: Option<&str>,
    ) -> Result<VmNameListing, RegistryError> {
        self.list_vm_names(environment, location).await
    }

    async fn create_vm_name(&self, request: &CreateVmNameRequest) -> Result<String, RegistryError> {
        self.create_vm_name(request).await
    }

    async fn update_vm_name(&self, request: &UpdateVmNameRequest) -> Result<(), RegistryError> {
        self.update_vm_name(request).await
    }

    async fn delete_vm_name(&self, environment: &str, vm_name: &str) -> Result<(), RegistryError> {
        self.delete_vm_name(environment, vm_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concurrency_floor() {
        let client = RegistryClient::with_options(
            "http://registry.local/api/vmname".to_string(),
            ClientOptions {
                request_timeout: Some(Duration::from_secs(5)),
                lookup_concurrency: 0,
            },
        )
        .unwrap();
        assert_eq!(client.lookup_concurrency, 1);
        assert_eq!(client.base_url(), "http://registry.local/api/vmname");
    }

    #[test]
    fn test_default_options_are_sequential_and_unbounded() {
        let options = ClientOptions::default();
        assert_eq!(options.lookup_concurrency, 1);
        assert!(options.request_timeout.is_none());
    }
}
