//! VM name registry models
//!
//! The registry speaks plain text for most operations. Only `details=true`
//! lookups return JSON, and that JSON is read leniently.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Status sent on create when the caller does not supply one
pub const DEFAULT_STATUS: &str = "Deployed";

/// Status recorded by a bulk lookup for a name whose detail fetch failed
pub const ERROR_STATUS: &str = "error";

/// Attributes returned by a `details=true` lookup.
///
/// Missing or non-string fields are left as `None`; a body that is not a
/// JSON object yields empty details rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDetails {
    /// `Status` field of the detail body
    pub status: Option<String>,
    /// `BusinessUnit` field of the detail body
    pub business_unit: Option<String>,
}

impl RecordDetails {
    /// Parse a detail response body
    pub fn from_body(body: &str) -> Self {
        let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) else {
            return Self::default();
        };

        let string_field = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            status: string_field("Status"),
            business_unit: string_field("BusinessUnit"),
        }
    }
}

/// A single registry record as seen by a lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmNameRecord {
    /// Name confirmed by the registry
    pub vm_name: String,
    /// Location derived from the name (empty when not derivable)
    pub location: String,
    /// Populated only for `details=true` lookups
    pub details: RecordDetails,
}

/// Result of listing the names of an environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmNameListing {
    /// Environment that was listed
    pub environment: String,
    /// Names in registry order
    pub vm_names: Vec<String>,
    /// Status per name; names whose details carry no status are absent
    pub statuses: BTreeMap<String, String>,
}

impl VmNameListing {
    /// Synthetic identifier `<environment>-<count>`.
    ///
    /// Two listings with the same size share an identifier even when their
    /// members differ.
    pub fn id(&self) -> String {
        format!("{}-{}", self.environment, self.vm_names.len())
    }
}

/// Request for allocating a new VM name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateVmNameRequest {
    /// Environment code (e.g. `dev`)
    pub environment: String,
    /// Location code embedded in the allocated name
    pub location: String,
    /// Defaults to [`DEFAULT_STATUS`]
    pub status: Option<String>,
    /// Owning business unit
    pub business_unit: String,
}

impl CreateVmNameRequest {
    /// Status that will be sent to the registry
    pub fn effective_status(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_STATUS)
    }
}

/// Request for updating the mutable attributes of an existing name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateVmNameRequest {
    /// Environment the name belongs to
    pub environment: String,
    /// Name to update
    pub vm_name: String,
    /// New status
    pub status: String,
    /// New business unit
    pub business_unit: String,
}

/// Extract the allocated name from a create response.
///
/// The registry may append `,<extra>` after the name. A comma in the first
/// position is not treated as a separator.
pub fn parse_created_name(body: &str) -> String {
    match body.find(',') {
        Some(idx) if idx > 0 => body[..idx].to_string(),
        _ => body.to_string(),
    }
}

/// Split a comma-separated list response into names, dropping blanks
pub fn parse_name_list(body: &str) -> Vec<String> {
    body.trim()
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
