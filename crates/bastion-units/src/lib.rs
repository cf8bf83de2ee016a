//! Movement policies for BASTION's attacking units.
//!
//! Pure functions over plain data: tank zigzag steering and helicopter
//! direct approach, each with arrival detection. No ECS dependency.

pub mod helicopter;
pub mod tank;

pub use bastion_core as core;
