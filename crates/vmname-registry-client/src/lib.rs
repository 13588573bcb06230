//! VM Name Registry Client
//!
//! A Rust client library for the VM name registry HTTP API. The registry
//! allocates VM names of the form `lcp{env}{location}-{sequence}` and keeps
//! their status and owning business unit.
//!
//! # Example
//!
//! ```no_run
//! use vmname_registry_client::{CreateVmNameRequest, RegistryClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RegistryClient::new("https://registry.example.com/api/vmname".to_string())?;
//!
//! // Allocate a name
//! let request = CreateVmNameRequest {
//!     environment: "dev".to_string(),
//!     location: "uksouth".to_string(),
//!     status: None,
//!     business_unit: "finance".to_string(),
//! };
//! let vm_name = client.create_vm_name(&request).await?;
//!
//! // Look it up with details
//! let record = client.get_vm_name(&vm_name, Some("dev"), true).await?;
//! println!("{} is {:?} in {}", record.vm_name, record.details.status, record.location);
//!
//! // List an environment
//! let listing = client.list_vm_names("dev", None).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod common;
pub mod error;
pub mod models;
pub mod naming;
#[path = "trait.rs"]
pub mod registry_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::{ClientOptions, RegistryClient};
pub use common::HttpClient;
pub use error::RegistryError;
pub use models::*;
pub use naming::{derive_location, ENVIRONMENT_CODES};
pub use registry_trait::RegistryClientTrait;
#[cfg(feature = "test-util")]
pub use mock::{MockRecord, MockRegistryClient};
