//! Managed resources
//!
//! - `vm_name`: `vmnameregistry_vmname`, one allocated VM name

pub mod vm_name;

pub use vm_name::{VmNameConfig, VmNameResource, VmNameState, VmNameUpdate};
