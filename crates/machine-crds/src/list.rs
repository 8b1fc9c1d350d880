//! Typed list wrapper
//!
//! Kubernetes list kinds (`MachineList`, `MachineGroupList`) share one shape:
//! type info, list metadata and an ordered sequence of items.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ListMeta;
use kube::Resource;
use kube::core::TypeMeta;
use serde::{Deserialize, Deserializer, Serialize};

/// A list of `K` objects as returned by the API server for a list request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "K: Deserialize<'de>"))]
pub struct TypedList<K> {
    /// `apiVersion` and `kind` (e.g. `MachineList`), absent on some client payloads
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,

    /// Standard list metadata
    #[serde(default)]
    pub metadata: ListMeta,

    /// List items, in server order
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub items: Vec<K>,
}

impl<K> TypedList<K>
where
    K: Resource<DynamicType = ()>,
{
    /// Builds a list of `items` with `apiVersion` of `K` and kind `<Kind>List`
    #[must_use]
    pub fn new(items: Vec<K>) -> Self {
        Self {
            types: Some(TypeMeta {
                api_version: K::api_version(&()).into_owned(),
                kind: format!("{}List", K::kind(&())),
            }),
            metadata: ListMeta::default(),
            items,
        }
    }
}

impl<K> TypedList<K> {
    /// Number of items in the list
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the items in order
    pub fn iter(&self) -> std::slice::Iter<'_, K> {
        self.items.iter()
    }
}

impl<K> Default for TypedList<K> {
    fn default() -> Self {
        Self {
            types: None,
            metadata: ListMeta::default(),
            items: Vec::new(),
        }
    }
}

impl<K> IntoIterator for TypedList<K> {
    type Item = K;
    type IntoIter = std::vec::IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, K> IntoIterator for &'a TypedList<K> {
    type Item = &'a K;
    type IntoIter = std::slice::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Reads `null` as the default value, the way Go decodes a null slice or map.
/// The API server sends `items: null` for empty lists.
pub(crate) fn deserialize_null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
