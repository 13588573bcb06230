//! Data sources
//!
//! - `vm_name`: `vmnameregistry_vmname`, details of one name
//! - `vm_names`: `vmnameregistry_vmnames`, all names of an environment

pub mod vm_name;
pub mod vm_names;

pub use vm_name::VmNameDataSource;
pub use vm_names::VmNamesDataSource;
