//! CRD generation and schema check errors

use thiserror::Error;

/// Errors that can occur while rendering or checking the CRD schemas
#[derive(Debug, Error)]
pub enum CrdError {
    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML rendering error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Two or more fields of a type serialize to the same wire key
    #[error("Duplicate wire key in {type_name}: {fields} fields serialized to only {keys} keys ({emitted})")]
    DuplicateWireKey {
        /// Name of the offending type
        type_name: String,
        /// Number of populated fields in the sample
        fields: usize,
        /// Number of distinct keys actually emitted
        keys: usize,
        /// The emitted keys, comma separated
        emitted: String,
    },

    /// Generated schema is not usable as a structural CRD schema
    #[error("Invalid schema for {crd}: {reason}")]
    InvalidSchema {
        /// CRD (or type) name
        crd: String,
        /// What is wrong with it
        reason: String,
    },
}
