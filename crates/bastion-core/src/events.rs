//! Events emitted by the simulation for UI and audio feedback.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::UnitId;

/// Summary surfaced to the display when a wave is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveSummary {
    pub wave_number: u32,
    /// Seconds from wave start to completion.
    pub duration_secs: f64,
    pub tanks_destroyed: u32,
    pub helicopters_destroyed: u32,
}

/// Discrete happenings during a tick, drained into the next snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    WaveStarted {
        wave_number: u32,
        tanks_target: u32,
        helicopters_target: u32,
    },
    WaveCompleted(WaveSummary),
    UnitSpawned {
        unit_id: UnitId,
        kind: UnitKind,
        position: Vec3,
    },
    UnitDestroyed {
        unit_id: UnitId,
        kind: UnitKind,
        position: Vec3,
        cause: ResolutionCause,
    },
    ShotFired,
}
