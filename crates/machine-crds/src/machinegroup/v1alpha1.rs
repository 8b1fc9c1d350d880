//! MachineGroup CRD (`machinegroup.machine-api.io/v1alpha1`)
//!
//! A cluster-scoped parameter class naming the driver that handles a group of
//! machines, plus opaque driver parameters. Like `StorageClass`, the fields
//! live at the top level of the object rather than under `spec`, so the
//! `CustomResource` derive cannot describe it and the resource traits and CRD
//! are written out here.

use std::borrow::Cow;
use std::collections::BTreeMap;

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::TypeMeta;
use schemars::JsonSchema;
use schemars::generate::SchemaSettings;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::CrdError;
use crate::list::{TypedList, deserialize_null_as_default};

const GROUP: &str = "machinegroup.machine-api.io";
const VERSION: &str = "v1alpha1";
const KIND: &str = "MachineGroup";
const PLURAL: &str = "machinegroups";
const SHORT_NAMES: &[&str] = &["mg", "mgroup"];

/// MachineGroup names the driver expected to handle a group of machines.
/// MachineGroups are not namespaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineGroup {
    /// `apiVersion` and `kind`
    #[serde(flatten, default)]
    #[schemars(skip)]
    pub types: Option<TypeMeta>,

    /// Standard object metadata
    #[serde(default)]
    #[schemars(skip)]
    pub metadata: ObjectMeta,

    /// Name of the driver expected to handle this MachineGroup
    #[serde(rename = "driver")]
    pub name: String,

    /// Driver specific key-value parameters.
    /// Opaque to Kubernetes and passed directly to the driver.
    #[serde(
        default,
        deserialize_with = "deserialize_null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    #[schemars(with = "BTreeMap<String, String>")]
    pub parameters: BTreeMap<String, String>,
}

/// MachineGroupList is a collection of MachineGroups
pub type MachineGroupList = TypedList<MachineGroup>;

impl MachineGroup {
    /// Creates a MachineGroup called `name` handled by `driver`
    #[must_use]
    pub fn new(name: &str, driver: impl Into<String>) -> Self {
        Self {
            types: Some(TypeMeta {
                api_version: <Self as k8s_openapi::Resource>::API_VERSION.to_string(),
                kind: KIND.to_string(),
            }),
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..ObjectMeta::default()
            },
            name: driver.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Adds a driver parameter
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// CRD name (`<plural>.<group>`)
    #[must_use]
    pub fn crd_name() -> Cow<'static, str> {
        Cow::Owned(format!("{PLURAL}.{GROUP}"))
    }

    /// Short names registered for `kubectl`
    #[must_use]
    pub fn shortnames() -> &'static [&'static str] {
        SHORT_NAMES
    }

    /// Generates the CustomResourceDefinition for MachineGroup
    ///
    /// # Errors
    ///
    /// Returns [`CrdError::Serialization`] if the generated schema does not
    /// form a valid CRD, or [`CrdError::InvalidSchema`] if it has no properties.
    pub fn crd() -> Result<CustomResourceDefinition, CrdError> {
        let generator = SchemaSettings::openapi3()
            .with(|s| {
                s.inline_subschemas = true;
                s.meta_schema = None;
            })
            .into_generator();
        let mut schema = serde_json::to_value(generator.into_root_schema_for::<Self>())?;

        let properties = schema
            .as_object_mut()
            .and_then(|root| root.get_mut("properties"))
            .and_then(Value::as_object_mut)
            .ok_or_else(|| CrdError::InvalidSchema {
                crd: Self::crd_name().into_owned(),
                reason: "root schema has no properties".to_string(),
            })?;
        properties.insert("apiVersion".to_string(), json!({ "type": "string" }));
        properties.insert("kind".to_string(), json!({ "type": "string" }));
        properties.insert("metadata".to_string(), json!({ "type": "object" }));

        let crd = json!({
            "apiVersion": "apiextensions.k8s.io/v1",
            "kind": "CustomResourceDefinition",
            "metadata": { "name": Self::crd_name() },
            "spec": {
                "group": GROUP,
                "names": {
                    "kind": KIND,
                    "listKind": format!("{KIND}List"),
                    "plural": PLURAL,
                    "singular": KIND.to_lowercase(),
                    "shortNames": SHORT_NAMES
                },
                "scope": "Cluster",
                "versions": [{
                    "name": VERSION,
                    "served": true,
                    "storage": true,
                    "additionalPrinterColumns": [
                        {
                            "name": "Driver",
                            "type": "string",
                            "jsonPath": ".driver",
                            "description": "Name of the driver handling the group."
                        },
                        {
                            "name": "Age",
                            "type": "date",
                            "jsonPath": ".metadata.creationTimestamp"
                        }
                    ],
                    "schema": { "openAPIV3Schema": schema },
                    "subresources": {}
                }]
            }
        });

        Ok(serde_json::from_value(crd)?)
    }
}

impl k8s_openapi::Resource for MachineGroup {
    const API_VERSION: &'static str = "machinegroup.machine-api.io/v1alpha1";
    const GROUP: &'static str = GROUP;
    const KIND: &'static str = KIND;
    const VERSION: &'static str = VERSION;
    const URL_PATH_SEGMENT: &'static str = PLURAL;
    type Scope = k8s_openapi::ClusterResourceScope;
}

impl k8s_openapi::ListableResource for MachineGroup {
    const LIST_KIND: &'static str = "MachineGroupList";
}

impl k8s_openapi::Metadata for MachineGroup {
    type Ty = ObjectMeta;

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}
