//! Fundamental geometric and simulation types.
//!
//! World axes: x = East, y = North, z = Up. Bearings are measured in
//! radians from North, clockwise.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Opaque handle for a live unit, stable for the unit's lifetime.
///
/// Produced by the simulation from its ECS entity id and handed to
/// collaborators (hit detection, radar display) that need to refer back
/// to a specific unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Point at `distance` from `origin` along `bearing`, at absolute height `height`.
pub fn point_on_bearing(origin: Vec3, bearing: f32, distance: f32, height: f32) -> Vec3 {
    Vec3::new(
        origin.x + distance * bearing.sin(),
        origin.y + distance * bearing.cos(),
        height,
    )
}

/// Bearing of a direction vector in radians (0 = North, clockwise).
pub fn heading_of(direction: Vec3) -> f32 {
    direction.x.atan2(direction.y).rem_euclid(std::f32::consts::TAU)
}

/// Distance between two points ignoring altitude.
pub fn horizontal_range(a: Vec3, b: Vec3) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Unit vector from `from` toward `to` in the ground plane, or zero when
/// the two points share a vertical line.
pub fn ground_direction(from: Vec3, to: Vec3) -> Vec3 {
    Vec3::new(to.x - from.x, to.y - from.y, 0.0).normalize_or_zero()
}
