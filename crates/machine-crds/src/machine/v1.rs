//! Machine CRD (`machine.machine-api.io/v1`)
//!
//! A cluster-scoped request for a machine. Users set the spec once at
//! creation; the status is owned by the machine controller.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::list::TypedList;

/// MachineSpec describes the common attributes of a machine.
///
/// Both fields are immutable after creation. Immutability is enforced by the
/// admission layer, not by these types.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "machine.machine-api.io",
    version = "v1",
    kind = "Machine",
    doc = "Machine is a cluster-scoped request for a machine with a given name and architecture.",
    plural = "machines",
    shortname = "mach",
    status = "MachineStatus",
    derive = "PartialEq",
    derive = "Default",
    printcolumn = r#"{"name":"Name","type":"string","jsonPath":".spec.name","description":"Name of the machine."}"#,
    printcolumn = r#"{"name":"Arch","type":"string","jsonPath":".spec.arch","description":"CPU architecture of the machine."}"#,
    printcolumn = r#"{"name":"UpdateTime","type":"date","jsonPath":".status.creationTime","description":"Timestamp of the last state change reported by the controller."}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct MachineSpec {
    /// Name of the machine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// CPU architecture of the machine (e.g. `amd64`, `arm64`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
}

/// MachineStatus is the observed state of a Machine.
///
/// Eventually consistent; written only by the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineStatus {
    /// Timestamp of the last state change reported for the machine.
    /// Unset means the time is unknown.
    #[serde(rename = "creationTime", default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<chrono::DateTime<chrono::Utc>>,

    /// Whether the machine is ready to be used. Unset means readiness is unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_to_use: Option<bool>,
}

/// MachineList is a list of Machine objects
pub type MachineList = TypedList<Machine>;
