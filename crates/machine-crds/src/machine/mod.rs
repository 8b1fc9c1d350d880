//! `machine.machine-api.io` API group
//!
//! - v1: Machine, MachineList

pub mod v1;


pub use v1::*;
