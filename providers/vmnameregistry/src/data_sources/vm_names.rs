//! `vmnameregistry_vmnames` data source

use crate::error::ProviderError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;
use vmname_registry_client::RegistryClientTrait;

/// Names of an environment with their statuses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmNamesState {
    /// `<environment>-<count>`; not unique across listings of equal size
    pub id: String,
    /// Environment that was listed
    pub environment: String,
    /// Location filter, if one was given
    pub location: Option<String>,
    /// Names in registry order
    pub vm_names: Vec<String>,
    /// `error` marks a name whose status could not be fetched
    pub statuses: BTreeMap<String, String>,
}

/// Lists the names of an environment
#[derive(Debug)]
pub struct VmNamesDataSource {
    client: Arc<dyn RegistryClientTrait>,
}

impl VmNamesDataSource {
    /// Create a data source backed by the given registry client
    pub fn new(client: Arc<dyn RegistryClientTrait>) -> Self {
        Self { client }
    }

    /// List `environment`, optionally narrowed to one location
    pub async fn read(&self, environment: &str, location: Option<&str>) -> Result<VmNamesState, ProviderError> {
        let listing = self.client.list_vm_names(environment, location).await?;
        debug!("Listed {} VM names in {}", listing.vm_names.len(), environment);

        Ok(VmNamesState {
            id: listing.id(),
            environment: listing.environment,
            location: location.map(str::to_string),
            vm_names: listing.vm_names,
            statuses: listing.statuses,
        })
    }
}
