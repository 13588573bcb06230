//! Mock RegistryClient for unit testing
//!
//! This module provides an in-memory implementation of RegistryClientTrait that
//! can be used in unit tests without a running registry.

use crate::error::RegistryError;
use crate::models::*;
use crate::naming::derive_location;
use crate::registry_trait::RegistryClientTrait;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

/// A record held by the mock registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRecord {
    /// Environment the name was allocated in
    pub environment: String,
    /// Location code used for filtering listings
    pub location: String,
    /// Status returned by detail lookups
    pub status: String,
    /// Owning business unit
    pub business_unit: String,
}

/// Mock RegistryClient for testing
///
/// Records live in memory keyed by VM name. Failures can be injected per
/// name (lookups) or globally (writes).
#[derive(Debug, Clone)]
pub struct MockRegistryClient {
    base_url: String,
    records: Arc<Mutex<BTreeMap<String, MockRecord>>>,
    failing_lookups: Arc<Mutex<HashSet<String>>>,
    write_error: Arc<Mutex<Option<String>>>,
    // Counter for generating sequence numbers
    next_sequence: Arc<Mutex<u32>>,
}

impl MockRegistryClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            records: Arc::new(Mutex::new(BTreeMap::new())),
            failing_lookups: Arc::new(Mutex::new(HashSet::new())),
            write_error: Arc::new(Mutex::new(None)),
            next_sequence: Arc::new(Mutex::new(1)),
        }
    }

    /// Get the base URL the mock was created with
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Add a record to the mock store (for test setup)
    pub fn add_record(&self, vm_name: impl Into<String>, record: MockRecord) {
        self.records.lock().unwrap().insert(vm_name.into(), record);
    }

    /// Remove a record behind the caller's back (simulates drift)
    pub fn remove_record(&self, vm_name: &str) -> Option<MockRecord> {
        self.records.lock().unwrap().remove(vm_name)
    }

    /// Get a copy of a stored record
    pub fn record(&self, vm_name: &str) -> Option<MockRecord> {
        self.records.lock().unwrap().get(vm_name).cloned()
    }

    /// Make every lookup of `vm_name` fail with an API error
    pub fn fail_lookups_for(&self, vm_name: impl Into<String>) {
        self.failing_lookups.lock().unwrap().insert(vm_name.into());
    }

    /// Make create, update and delete fail with the given body
    pub fn fail_writes(&self, message: impl Into<String>) {
        *self.write_error.lock().unwrap() = Some(message.into());
    }

    fn check_writes(&self) -> Result<(), RegistryError> {
        match self.write_error.lock().unwrap().as_ref() {
            Some(message) => Err(RegistryError::Api(message.clone())),
            None => Ok(()),
        }
    }

    fn next_sequence(&self) -> u32 {
        let mut sequence = self.next_sequence.lock().unwrap();
        let current = *sequence;
        *sequence += 1;
        current
    }
}

#[async_trait::async_trait]
impl RegistryClientTrait for MockRegistryClient {
    async fn get_vm_name(
        &self,
        vm_name: &str,
        environment: Option<&str>,
        details: bool,
    ) -> Result<VmNameRecord, RegistryError> {
        if self.failing_lookups.lock().unwrap().contains(vm_name) {
            return Err(RegistryError::Api(format!("lookup of {} failed", vm_name)));
        }

        let records = self.records.lock().unwrap();
        let record = records
            .get(vm_name)
            .filter(|record| environment.is_none_or(|env| record.environment == env))
            .ok_or_else(|| RegistryError::NotFound(format!("{} not found", vm_name)))?;

        let details = if details {
            RecordDetails {
                status: Some(record.status.clone()),
                business_unit: Some(record.business_unit.clone()),
            }
        } else {
            RecordDetails::default()
        };

        Ok(VmNameRecord {
            vm_name: vm_name.to_string(),
            location: derive_location(vm_name),
            details,
        })
    }

    async fn list_vm_names(
        &self,
        environment: &str,
        location: Option<&str>,
    ) -> Result<VmNameListing, RegistryError> {
        let records = self.records.lock().unwrap();
        let failing = self.failing_lookups.lock().unwrap();

        let mut listing = VmNameListing {
            environment: environment.to_string(),
            ..Default::default()
        };
        for (name, record) in records.iter() {
            if record.environment != environment || location.is_some_and(|loc| record.location != loc) {
                continue;
            }
            let status = if failing.contains(name) {
                ERROR_STATUS.to_string()
            } else {
                record.status.clone()
            };
            listing.vm_names.push(name.clone());
            listing.statuses.insert(name.clone(), status);
        }

        Ok(listing)
    }

    async fn create_vm_name(&self, request: &CreateVmNameRequest) -> Result<String, RegistryError> {
        self.check_writes()?;

        let vm_name = format!(
            "lcp{}{}-{:04}",
            request.environment,
            request.location,
            self.next_sequence()
        );
        self.add_record(
            vm_name.clone(),
            MockRecord {
                environment: request.environment.clone(),
                location: request.location.clone(),
                status: request.effective_status().to_string(),
                business_unit: request.business_unit.clone(),
            },
        );
        Ok(vm_name)
    }

    async fn update_vm_name(&self, request: &UpdateVmNameRequest) -> Result<(), RegistryError> {
        self.check_writes()?;

        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(&request.vm_name)
            .filter(|record| record.environment == request.environment)
            .ok_or_else(|| RegistryError::Api(format!("{} does not exist", request.vm_name)))?;
        record.status = request.status.clone();
        record.business_unit = request.business_unit.clone();
        Ok(())
    }

    async fn delete_vm_name(&self, environment: &str, vm_name: &str) -> Result<(), RegistryError> {
        self.check_writes()?;

        let mut records = self.records.lock().unwrap();
        match records.get(vm_name) {
            Some(record) if record.environment == environment => {
                records.remove(vm_name);
                Ok(())
            }
            _ => Err(RegistryError::Api(format!("{} does not exist", vm_name))),
        }
    }
}
