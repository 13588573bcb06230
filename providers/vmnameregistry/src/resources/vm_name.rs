//! `vmnameregistry_vmname` resource
//!
//! Lifecycle of one allocated VM name. The registry owns the record; the
//! state kept here is the last successful response and is refreshed by
//! every read.

use crate::error::ProviderError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use vmname_registry_client::{
    derive_location, CreateVmNameRequest, RegistryClientTrait, RegistryError, UpdateVmNameRequest,
    DEFAULT_STATUS,
};

/// Attributes supplied when allocating a name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmNameConfig {
    /// Environment code (e.g. `dev`)
    pub environment: String,
    /// Location code embedded in the allocated name
    pub location: String,
    /// Defaults to `Deployed`
    pub status: Option<String>,
    /// Owning business unit
    pub business_unit: String,
}

/// Mutable attributes of an allocated name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmNameUpdate {
    /// New status
    pub status: String,
    /// New business unit
    pub business_unit: String,
}

/// Resource state
///
/// `id` is the VM name while the record exists and `None` once it is gone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmNameState {
    /// VM name while the record exists
    pub id: Option<String>,
    /// Name as confirmed by the registry
    pub vm_name: Option<String>,
    /// Environment the name belongs to
    pub environment: String,
    /// Location code, from config or derived from the name
    pub location: String,
    /// Last known status
    pub status: String,
    /// Last known business unit
    pub business_unit: String,
}

impl VmNameState {
    /// State for a name that is known to exist but has not been read yet.
    ///
    /// The location is derived from the name when the naming convention allows it.
    pub fn existing(environment: impl Into<String>, vm_name: impl Into<String>) -> Self {
        let vm_name = vm_name.into();
        Self {
            id: Some(vm_name.clone()),
            location: derive_location(&vm_name),
            vm_name: Some(vm_name),
            environment: environment.into(),
            ..Default::default()
        }
    }

    /// Whether the record is believed to exist in the registry
    pub fn is_present(&self) -> bool {
        self.id.is_some()
    }
}

/// Split an import ID of the form `environment/vm_name`
pub fn parse_import_id(import_id: &str) -> Result<(&str, &str), ProviderError> {
    let parts: Vec<&str> = import_id.split('/').collect();
    match parts.as_slice() {
        [environment, vm_name] => Ok((*environment, *vm_name)),
        _ => Err(ProviderError::InvalidImportId(import_id.to_string())),
    }
}

/// Create, read, update, delete and import of a single VM name
#[derive(Debug)]
pub struct VmNameResource {
    client: Arc<dyn RegistryClientTrait>,
}

impl VmNameResource {
    /// Create a resource backed by the given registry client
    pub fn new(client: Arc<dyn RegistryClientTrait>) -> Self {
        Self { client }
    }

    /// Allocate a new name and read it back.
    ///
    /// If the read-back fails the name is still allocated; the error carries
    /// the state built from the create response.
    pub async fn create(&self, config: &VmNameConfig) -> Result<VmNameState, ProviderError> {
        let request = CreateVmNameRequest {
            environment: config.environment.clone(),
            location: config.location.clone(),
            status: config.status.clone(),
            business_unit: config.business_unit.clone(),
        };
        let vm_name = self.client.create_vm_name(&request).await?;
        info!("Allocated VM name {} in {}", vm_name, config.environment);

        let mut state = VmNameState {
            id: Some(vm_name.clone()),
            vm_name: Some(vm_name.clone()),
            environment: config.environment.clone(),
            location: config.location.clone(),
            status: config.status.clone().unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            business_unit: config.business_unit.clone(),
        };
        if let Err(e) = self.read(&mut state).await {
            warn!("Allocated VM name {} but reading it back failed: {}", vm_name, e);
            return Err(ProviderError::AllocatedButUnread {
                vm_name,
                state: Box::new(state),
                source: Box::new(e),
            });
        }
        Ok(state)
    }

    /// Refresh state from the registry.
    ///
    /// A 404 clears `id` without an error so the record drops out of state.
    /// Reading an absent record is a no-op.
    pub async fn read(&self, state: &mut VmNameState) -> Result<(), ProviderError> {
        let Some(id) = state.id.clone() else {
            return Ok(());
        };

        match self.client.get_vm_name(&id, Some(state.environment.as_str()), true).await {
            Ok(record) => {
                state.vm_name = Some(record.vm_name);
                if let Some(status) = record.details.status {
                    state.status = status;
                }
                if let Some(business_unit) = record.details.business_unit {
                    state.business_unit = business_unit;
                }
                Ok(())
            }
            Err(RegistryError::NotFound(_)) => {
                info!("VM name {} no longer exists in {}, removing from state", id, state.environment);
                state.id = None;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Change status and business unit. Environment and location never change.
    pub async fn update(&self, state: &mut VmNameState, update: &VmNameUpdate) -> Result<(), ProviderError> {
        let id = state.id.clone().ok_or(ProviderError::MissingId("update"))?;

        self.client
            .update_vm_name(&UpdateVmNameRequest {
                environment: state.environment.clone(),
                vm_name: id.clone(),
                status: update.status.clone(),
                business_unit: update.business_unit.clone(),
            })
            .await?;
        info!("Updated VM name {}", id);

        state.status = update.status.clone();
        state.business_unit = update.business_unit.clone();
        self.read(state).await
    }

    /// Release the name
    pub async fn delete(&self, state: &mut VmNameState) -> Result<(), ProviderError> {
        let id = state.id.clone().ok_or(ProviderError::MissingId("delete"))?;

        self.client.delete_vm_name(&state.environment, &id).await?;
        info!("Deleted VM name {}", id);

        state.id = None;
        Ok(())
    }

    /// Adopt an existing name from an `environment/vm_name` import ID
    pub async fn import(&self, import_id: &str) -> Result<VmNameState, ProviderError> {
        let (environment, vm_name) = parse_import_id(import_id)?;

        let mut state = VmNameState::existing(environment, vm_name);
        self.read(&mut state).await?;
        info!("Imported VM name {} from {}", vm_name, environment);
        Ok(state)
    }
}
