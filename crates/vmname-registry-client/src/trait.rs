//! RegistryClient trait for mocking
//!
//! The concrete RegistryClient implements this trait; provider code depends
//! on the trait so tests can substitute an in-memory registry.

use crate::error::RegistryError;
use crate::models::*;

/// Trait for VM name registry operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait RegistryClientTrait: Send + Sync + std::fmt::Debug {
    /// Look up one name, optionally scoped to an environment and with details
    async fn get_vm_name(&self, vm_name: &str, environment: Option<&str>, details: bool) -> Result<VmNameRecord, RegistryError>;

    /// List the names of an environment with a status per name
    async fn list_vm_names(&self, environment: &str, location: Option<&str>) -> Result<VmNameListing, RegistryError>;

    /// Allocate a new name and return it
    async fn create_vm_name(&self, request: &CreateVmNameRequest) -> Result<String, RegistryError>;

    /// Replace status and business unit of an existing name
    async fn update_vm_name(&self, request: &UpdateVmNameRequest) -> Result<(), RegistryError>;

    /// Release a name
    async fn delete_vm_name(&self, environment: &str, vm_name: &str) -> Result<(), RegistryError>;
}
