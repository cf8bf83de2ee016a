//! Bastion application driver.
//!
//! Wires the simulation to a game loop thread and to the headless
//! autopilot used by the `bastion` binary.

pub mod autopilot;
pub mod game_loop;
pub mod state;

pub use bastion_core as core;
