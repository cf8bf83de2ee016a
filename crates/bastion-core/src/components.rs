//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems and in `bastion-units`, not here.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{ResolutionCause, UnitKind};

/// Identity of an attacking unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Unit {
    pub kind: UnitKind,
    /// Base position this unit is heading toward.
    pub target: Vec3,
    /// Range to `target` at which the unit counts as arrived.
    pub arrival_threshold: f32,
    /// Simulation time (seconds) at which the unit entered play.
    pub spawned_at: f64,
}

/// Position and motion shared by every unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: Vec3,
    /// Current speed (units per second).
    pub speed: f32,
    /// Facing in radians (0 = North, clockwise).
    pub heading: f32,
}

/// Tank-only zigzag state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TankSteering {
    /// Direction the tank is travelling this tick (unit vector, ground plane).
    pub current_direction: Vec3,
    /// Heading the tank is turning toward.
    pub zigzag_direction: Vec3,
    /// Simulation time (seconds) of the next heading change.
    pub next_zigzag_time: f64,
    pub last_zigzag_was_left: bool,
    /// Set while inside the straight-line radius.
    pub direct: bool,
    /// Speed is re-rolled from this range on every heading change.
    pub min_speed: f32,
    pub max_speed: f32,
}

/// Cosmetic rotor angles for helicopters (degrees, wrapped to [0, 360)).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RotorState {
    pub main_deg: f32,
    pub tail_deg: f32,
}

/// Resolution flag. Set exactly once, by whichever path removes the unit.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Lifecycle {
    pub resolved: Option<ResolutionCause>,
}
