//! Provider-specific error types.
//!
//! Registry failures pass through unchanged; the remaining variants cover
//! input the provider rejects before contacting the registry.

use crate::resources::VmNameState;
use thiserror::Error;
use vmname_registry_client::RegistryError;

/// Errors that can occur in the VM name registry provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Registry API or transport error
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Data source lookup of a name the registry does not know
    #[error("VM name not found: {0}")]
    VmNameNotFound(String),

    /// Import ID not in `environment/vm_name` form
    #[error("invalid import ID format {0:?}. Expected: environment/vm_name (e.g., dev/lcpdevuks-0001)")]
    InvalidImportId(String),

    /// Operation needs a record that is not in state
    #[error("VM name is not present in state; nothing to {0}")]
    MissingId(&'static str),

    /// Invalid provider configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Create allocated a name but the follow-up read failed.
    ///
    /// `state` holds the allocated name so it can still be recorded.
    #[error("VM name {vm_name} was allocated but could not be read back")]
    AllocatedButUnread {
        /// Name returned by the registry
        vm_name: String,
        /// State built from the create response
        state: Box<VmNameState>,
        /// Why the read-back failed
        source: Box<ProviderError>,
    },
}

impl ProviderError {
    /// State that exists in the registry despite the error, if any
    pub fn partial_state(&self) -> Option<&VmNameState> {
        match self {
            ProviderError::AllocatedButUnread { state, .. } => Some(state),
            _ => None,
        }
    }
}
