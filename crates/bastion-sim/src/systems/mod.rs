//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! They do not own state; per-unit state lives in components and wave state
//! lives in the `WaveDirector`.

pub mod cleanup;
pub mod movement;
pub mod resolution;
pub mod snapshot;
