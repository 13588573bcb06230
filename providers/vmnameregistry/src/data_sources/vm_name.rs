//! `vmnameregistry_vmname` data source

use crate::error::ProviderError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use vmname_registry_client::{RegistryClientTrait, RegistryError};

/// Computed attributes of a looked-up name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmNameLookupState {
    /// Same as `vm_name`
    pub id: String,
    /// Name that was looked up
    pub vm_name: String,
    /// Status reported by the registry
    pub status: Option<String>,
    /// Business unit reported by the registry
    pub business_unit: Option<String>,
    /// Absent when the name does not follow the naming convention
    pub location: Option<String>,
}

/// Reads the details of a single VM name
#[derive(Debug)]
pub struct VmNameDataSource {
    client: Arc<dyn RegistryClientTrait>,
}

impl VmNameDataSource {
    /// Create a data source backed by the given registry client
    pub fn new(client: Arc<dyn RegistryClientTrait>) -> Self {
        Self { client }
    }

    /// Look up `vm_name`; a name the registry does not know is an error here
    pub async fn read(&self, vm_name: &str) -> Result<VmNameLookupState, ProviderError> {
        let record = match self.client.get_vm_name(vm_name, None, true).await {
            Ok(record) => record,
            Err(RegistryError::NotFound(_)) => return Err(ProviderError::VmNameNotFound(vm_name.to_string())),
            Err(e) => return Err(e.into()),
        };

        Ok(VmNameLookupState {
            id: vm_name.to_string(),
            vm_name: vm_name.to_string(),
            status: record.details.status,
            business_unit: record.details.business_unit,
            location: Some(record.location).filter(|location| !location.is_empty()),
        })
    }
}
