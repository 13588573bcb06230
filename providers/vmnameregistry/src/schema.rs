//! Provider schema
//!
//! Static description of the provider block, its resource and its data
//! sources, printed by the `schema` command.

use crate::provider::{VM_NAMES_TYPE, VM_NAME_TYPE};
use serde::Serialize;
use std::collections::BTreeMap;
use vmname_registry_client::DEFAULT_STATUS;

/// Value type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    List,
    Map,
}

/// Who sets an attribute: the user (required/optional) or the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    Required,
    Optional,
    Computed,
}

/// One schema attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub mode: AttributeMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
    pub description: &'static str,
}

impl Attribute {
    const fn string(name: &'static str, mode: AttributeMode, description: &'static str) -> Self {
        Self {
            name,
            kind: AttributeType::String,
            mode,
            default: None,
            description,
        }
    }
}

/// Provider block plus every resource and data source, keyed by type name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProviderSchema {
    pub provider: Vec<Attribute>,
    pub resources: BTreeMap<&'static str, Vec<Attribute>>,
    pub data_sources: BTreeMap<&'static str, Vec<Attribute>>,
}

fn vm_name_resource() -> Vec<Attribute> {
    use AttributeMode::*;
    vec![
        Attribute::string(
            "environment",
            Required,
            "The environment for the VM name (e.g., dev, prod, preprod, devtest)",
        ),
        Attribute::string(
            "location",
            Required,
            "The Azure region/location for the VM name (e.g., uksouth)",
        ),
        Attribute {
            default: Some(DEFAULT_STATUS),
            ..Attribute::string(
                "status",
                Optional,
                "The status of the VM name (Deployed, Reserved, Available)",
            )
        },
        Attribute::string("business_unit", Required, "The business unit for the VM name"),
        Attribute::string("vm_name", Computed, "The generated VM name returned by the API."),
    ]
}

fn vm_name_data_source() -> Vec<Attribute> {
    use AttributeMode::*;
    vec![
        Attribute::string("vm_name", Required, "The VM name to look up."),
        Attribute::string("status", Computed, "The status of the VM name."),
        Attribute::string("business_unit", Computed, "The business unit of the VM name."),
        Attribute::string(
            "location",
            Computed,
            "The location/region extracted from the VM name.",
        ),
    ]
}

fn vm_names_data_source() -> Vec<Attribute> {
    use AttributeMode::*;
    vec![
        Attribute::string(
            "environment",
            Required,
            "The environment to filter VM names (e.g., dev, prod, preprod, devtest)",
        ),
        Attribute::string(
            "location",
            Optional,
            "The Azure region/location to further filter VM names (e.g., uksouth)",
        ),
        Attribute {
            kind: AttributeType::List,
            ..Attribute::string("vm_names", Computed, "The list of VM names returned by the API.")
        },
        Attribute {
            kind: AttributeType::Map,
            ..Attribute::string(
                "statuses",
                Computed,
                "A map of VM name to status, if details are available.",
            )
        },
    ]
}

/// Full provider schema
pub fn provider_schema() -> ProviderSchema {
    ProviderSchema {
        provider: vec![Attribute::string(
            "url",
            AttributeMode::Required,
            "The base URL for the registry API.",
        )],
        resources: BTreeMap::from([(VM_NAME_TYPE, vm_name_resource())]),
        data_sources: BTreeMap::from([
            (VM_NAME_TYPE, vm_name_data_source()),
            (VM_NAMES_TYPE, vm_names_data_source()),
        ]),
    }
}
