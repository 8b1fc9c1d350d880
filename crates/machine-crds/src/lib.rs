//! Machine API CRD Definitions
//!
//! Kubernetes Custom Resource Definitions for the `Machine` and
//! `MachineGroup` APIs. These are passive schema types; reconciliation,
//! admission and validation live in the controllers that consume them.

pub mod crd;
pub mod error;
pub mod list;
pub mod machine;
pub mod machinegroup;
pub mod schema;

pub use crd::*;
pub use error::CrdError;
pub use list::TypedList;
pub use machine::*;
pub use machinegroup::*;
