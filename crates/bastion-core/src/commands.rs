//! Player and collaborator commands sent to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::UnitId;

/// All inputs the simulation accepts from outside.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Wave flow ---
    /// Start wave 1 from the main menu.
    StartGame,
    /// Continue to the next wave once the current one is cleared.
    AdvanceWave,
    /// Debug: resolve every live unit except one per kind.
    SkipWave,
    /// Throw away the current run and start again from wave 1.
    Restart,

    // --- Turret ---
    /// The turret fired a round.
    FireShot,
    /// Hit detection reports a round struck a unit.
    UnitHit { unit_id: UnitId },

    // --- Simulation control ---
    /// Set time scale (1.0 = normal, 2.0 = double).
    SetTimeScale { scale: f64 },
    Pause,
    Resume,
}
