//! Wave and spawn simulation for Bastion.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the display.

pub mod engine;
pub mod score;
pub mod spawner;
pub mod systems;
pub mod wave_director;
pub mod world_setup;

pub use bastion_core as core;
pub use engine::{SimConfig, SimulationEngine};
