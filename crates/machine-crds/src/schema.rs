//! Wire schema consistency checks
//!
//! Catches field layouts that cannot round-trip, such as two fields mapped to
//! the same JSON key, and CRD schemas the API server would reject.

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use serde::Serialize;
use tracing::debug;

use crate::error::CrdError;
use crate::machine::{MachineSpec, MachineStatus};
use crate::machinegroup::MachineGroup;

/// Checks that every populated field of `sample` serializes to its own key.
///
/// `fields` is the number of fields set in `sample`. Fields sharing a key
/// overwrite each other, so fewer keys than fields means a collision.
///
/// # Errors
///
/// Returns [`CrdError::DuplicateWireKey`] on a collision and
/// [`CrdError::InvalidSchema`] if `sample` is not a JSON object.
pub fn check_distinct_keys<T: Serialize>(
    type_name: &str,
    sample: &T,
    fields: usize,
) -> Result<(), CrdError> {
    let value = serde_json::to_value(sample)?;
    let object = value.as_object().ok_or_else(|| CrdError::InvalidSchema {
        crd: type_name.to_string(),
        reason: "does not serialize to a JSON object".to_string(),
    })?;

    if object.len() != fields {
        return Err(CrdError::DuplicateWireKey {
            type_name: type_name.to_string(),
            fields,
            keys: object.len(),
            emitted: object.keys().cloned().collect::<Vec<_>>().join(", "),
        });
    }
    Ok(())
}

/// Checks that each version of `crd` carries a structural schema and that a
/// `spec` property, when present, is required.
///
/// # Errors
///
/// Returns [`CrdError::InvalidSchema`] naming the first offending version.
pub fn check_crd(crd: &CustomResourceDefinition) -> Result<(), CrdError> {
    let name = crd.metadata.name.clone().unwrap_or_default();
    let invalid = |reason: String| CrdError::InvalidSchema {
        crd: name.clone(),
        reason,
    };

    if crd.spec.versions.is_empty() {
        return Err(invalid("no versions".to_string()));
    }

    for version in &crd.spec.versions {
        let schema = version
            .schema
            .as_ref()
            .and_then(|s| s.open_api_v3_schema.as_ref())
            .ok_or_else(|| invalid(format!("version {} has no openAPIV3Schema", version.name)))?;

        if schema.type_.as_deref() != Some("object") {
            return Err(invalid(format!("version {} root schema is not an object", version.name)));
        }

        let properties = schema
            .properties
            .as_ref()
            .ok_or_else(|| invalid(format!("version {} root schema has no properties", version.name)))?;

        if properties.contains_key("spec") {
            let required = schema.required.as_deref().unwrap_or_default();
            if !required.iter().any(|r| r == "spec") {
                return Err(invalid(format!("version {} does not require spec", version.name)));
            }
        }
        debug!(crd = %name, version = %version.name, "schema ok");
    }
    Ok(())
}

/// Runs every consistency check over the crate's types and CRDs
///
/// # Errors
///
/// Returns the first failed check.
pub fn check_all() -> Result<(), CrdError> {
    let spec = MachineSpec {
        name: Some("worker-0".to_string()),
        arch: Some("amd64".to_string()),
    };
    check_distinct_keys("MachineSpec", &spec, 2)?;

    let status = MachineStatus {
        update_time: Some(chrono::DateTime::<chrono::Utc>::UNIX_EPOCH),
        ready_to_use: Some(false),
    };
    check_distinct_keys("MachineStatus", &status, 2)?;

    // metadata, driver, parameters (apiVersion and kind left unset)
    let group = MachineGroup {
        types: None,
        ..MachineGroup::new("group", "driver.example.com").with_parameter("key", "value")
    };
    check_distinct_keys("MachineGroup", &group, 3)?;

    for crd in crate::crd::crds()? {
        check_crd(&crd)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::SerializeStruct;

    /// Two fields sharing one key, as in a copy-pasted field tag
    struct CollidingSpec {
        name: Option<String>,
        arch: Option<String>,
    }

    impl Serialize for CollidingSpec {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("CollidingSpec", 2)?;
            state.serialize_field("source", &self.name)?;
            state.serialize_field("source", &self.arch)?;
            state.end()
        }
    }

    #[test]
    fn test_colliding_wire_keys_are_flagged() {
        let spec = CollidingSpec {
            name: Some("worker-0".to_string()),
            arch: Some("arm64".to_string()),
        };
        let err = check_distinct_keys("CollidingSpec", &spec, 2).unwrap_err();
        match err {
            CrdError::DuplicateWireKey { fields, keys, emitted, .. } => {
                assert_eq!(fields, 2);
                assert_eq!(keys, 1);
                assert_eq!(emitted, "source");
            }
            other => panic!("expected DuplicateWireKey, got {other:?}"),
        }
    }

    #[test]
    fn test_machine_spec_has_distinct_wire_keys() {
        let spec = MachineSpec {
            name: Some("worker-0".to_string()),
            arch: Some("arm64".to_string()),
        };
        check_distinct_keys("MachineSpec", &spec, 2).unwrap();

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["name"], "worker-0");
        assert_eq!(value["arch"], "arm64");
        assert!(value.get("source").is_none());
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = check_distinct_keys("String", &"plain", 1).unwrap_err();
        assert!(matches!(err, CrdError::InvalidSchema { .. }));
    }

    #[test]
    fn test_crd_without_versions_is_rejected() {
        let mut crd = MachineGroup::crd().unwrap();
        crd.spec.versions.clear();
        let err = check_crd(&crd).unwrap_err();
        assert!(err.to_string().contains("no versions"), "unexpected error: {err}");
    }

    #[test]
    fn test_crd_without_schema_is_rejected() {
        let mut crd = MachineGroup::crd().unwrap();
        crd.spec.versions[0].schema = None;
        let err = check_crd(&crd).unwrap_err();
        assert!(err.to_string().contains("openAPIV3Schema"), "unexpected error: {err}");
    }

    #[test]
    fn test_all_checks_pass() {
        check_all().unwrap();
    }
}
