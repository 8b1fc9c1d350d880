//! `machinegroup.machine-api.io` API group
//!
//! - v1alpha1: MachineGroup, MachineGroupList

pub mod v1alpha1;


pub use v1alpha1::*;
