//! CRD manifests
//!
//! Collects the CustomResourceDefinitions for every kind in the crate and
//! renders them as YAML for `kubectl apply`.

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::CustomResourceExt;

use crate::error::CrdError;
use crate::machine::Machine;
use crate::machinegroup::MachineGroup;

/// Returns the CRDs for all kinds, Machine first
///
/// # Errors
///
/// Fails if the hand-built MachineGroup CRD cannot be generated.
pub fn crds() -> Result<Vec<CustomResourceDefinition>, CrdError> {
    Ok(vec![Machine::crd(), MachineGroup::crd()?])
}

/// Renders `crds` as a multi-document YAML stream
///
/// # Errors
///
/// Returns [`CrdError::Yaml`] if a CRD cannot be serialized.
pub fn to_yaml(crds: &[CustomResourceDefinition]) -> Result<String, CrdError> {
    let mut out = String::new();
    for crd in crds {
        out.push_str("---\n");
        out.push_str(&serde_yaml::to_string(crd)?);
    }
    Ok(out)
}
