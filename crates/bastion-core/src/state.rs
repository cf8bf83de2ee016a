//! Game state snapshot: the complete visible state handed to the display each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{GameEvent, WaveSummary};
use crate::types::{SimTime, UnitId};

/// Complete game state broadcast to the display after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: WaveView,
    /// Set while a cleared wave waits for the player; cleared when the next wave starts.
    pub wave_complete: Option<WaveSummary>,
    /// Live units, for the minimap and radar.
    pub units: Vec<UnitView>,
    pub score: ScoreView,
    pub events: Vec<GameEvent>,
}

/// Wave ledger as seen by the display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveView {
    pub wave_number: u32,
    pub phase: WavePhase,
    pub tanks_target: u32,
    pub tanks_spawned: u32,
    pub tanks_destroyed: u32,
    pub helicopters_target: u32,
    pub helicopters_spawned: u32,
    pub helicopters_destroyed: u32,
}

/// A live unit on the radar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    pub unit_id: UnitId,
    pub kind: UnitKind,
    pub position: Vec3,
    /// Radians, 0 = North, clockwise.
    pub heading: f32,
    pub speed: f32,
    /// Horizontal range to the base.
    pub range: f32,
    /// Rotor angles in degrees (helicopters only).
    pub rotors: Option<(f32, f32)>,
    /// Whether the tank has left its zigzag for the final straight run
    /// (tanks only).
    pub direct_approach: Option<bool>,
}

/// Running score for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub tanks_destroyed: u32,
    pub helicopters_destroyed: u32,
    pub tanks_reached_base: u32,
    pub helicopters_reached_base: u32,
    pub shots_fired: u32,
    /// Percentage of shots that killed a unit (0 with no shots).
    pub accuracy: f64,
    /// Longest distance from the base at which a unit was killed.
    pub longest_kill: f32,
    /// Destroyed counts for the current wave, as last pushed by the wave director.
    pub wave_tanks_destroyed: u32,
    pub wave_helicopters_destroyed: u32,
}
