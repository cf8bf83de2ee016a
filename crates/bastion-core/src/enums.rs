//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// The two kinds of attacking unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Tank,
    Helicopter,
}

impl UnitKind {
    pub const ALL: [UnitKind; 2] = [UnitKind::Tank, UnitKind::Helicopter];
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitKind::Tank => f.write_str("tank"),
            UnitKind::Helicopter => f.write_str("helicopter"),
        }
    }
}

/// Lifecycle phase of the wave state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// No wave has been started yet.
    #[default]
    Idle,
    /// Units are spawning and/or alive.
    InProgress,
    /// Wave cleared; waiting for the player to continue.
    AwaitingAdvance,
}

/// How a unit left play. Every unit is resolved exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionCause {
    /// Killed by turret fire. Counts toward score and accuracy.
    PlayerKill,
    /// Reached the base. Counts toward wave completion only.
    ReachedBase,
    /// Force-resolved by the skip-wave debug command.
    Skipped,
}

/// Top-level engine phase (outside the wave state machine).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
}
