//! Provider wiring
//!
//! A configured provider owns one registry client and hands it to every
//! resource and data source it creates.

use crate::config::ProviderConfig;
use crate::data_sources::{VmNameDataSource, VmNamesDataSource};
use crate::error::ProviderError;
use crate::resources::VmNameResource;
use std::sync::Arc;
use tracing::info;
use vmname_registry_client::{RegistryClient, RegistryClientTrait};

/// Resource and data source type for a single VM name
pub const VM_NAME_TYPE: &str = "vmnameregistry_vmname";

/// Data source type for the names of an environment
pub const VM_NAMES_TYPE: &str = "vmnameregistry_vmnames";

/// Configured provider holding the shared registry client
#[derive(Debug)]
pub struct Provider {
    client: Arc<dyn RegistryClientTrait>,
}

impl Provider {
    /// Validate the configuration and build the registry client
    pub fn configure(config: &ProviderConfig) -> Result<Self, ProviderError> {
        config.validate()?;
        let client = RegistryClient::with_options(config.url.clone(), config.client_options())?;

        info!("Configured registry at {}", client.base_url());
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Use an already constructed client
    pub fn with_client(client: Arc<dyn RegistryClientTrait>) -> Self {
        Self { client }
    }

    /// The `vmnameregistry_vmname` resource
    pub fn vm_name_resource(&self) -> VmNameResource {
        VmNameResource::new(Arc::clone(&self.client))
    }

    /// The `vmnameregistry_vmname` data source
    pub fn vm_name_data_source(&self) -> VmNameDataSource {
        VmNameDataSource::new(Arc::clone(&self.client))
    }

    /// The `vmnameregistry_vmnames` data source
    pub fn vm_names_data_source(&self) -> VmNamesDataSource {
        VmNamesDataSource::new(Arc::clone(&self.client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::VmNameConfig;
    use vmname_registry_client::MockRegistryClient;

    #[test]
    fn test_configure_rejects_bad_url() {
        let result = Provider::configure(&ProviderConfig::new("not a url"));
        assert!(matches!(result, Err(ProviderError::InvalidConfig(_))));
    }

    #[test]
    fn test_configure() {
        assert!(Provider::configure(&ProviderConfig::new("http://localhost:7071/api/vmname")).is_ok());
    }

    #[tokio::test]
    async fn test_resource_and_data_sources_share_client() {
        let mock = MockRegistryClient::new("http://test-registry/api/vmname");
        let provider = Provider::with_client(Arc::new(mock));

        let created = provider
            .vm_name_resource()
            .create(&VmNameConfig {
                environment: "ppd".to_string(),
                location: "ukw".to_string(),
                status: None,
                business_unit: "ops".to_string(),
            })
            .await
            .unwrap();
        let vm_name = created.vm_name.unwrap();

        let lookup = provider.vm_name_data_source().read(&vm_name).await.unwrap();
        assert_eq!(lookup.location.as_deref(), Some("ukw"));
        assert_eq!(lookup.business_unit.as_deref(), Some("ops"));

        let listing = provider.vm_names_data_source().read("ppd", None).await.unwrap();
        assert_eq!(listing.vm_names, vec![vm_name]);
        assert_eq!(listing.id, "ppd-1");
    }
}
