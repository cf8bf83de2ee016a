//! Wave director: the wave lifecycle state machine.
//!
//! Owns the `WaveState` ledger exclusively. Spawners reach it only through
//! the `SpawnGate` capability (permission + spawned counters); the unit
//! resolution path reaches it only through `register_destroyed`.
//!
//! `Idle → InProgress → AwaitingAdvance → InProgress → …`, no terminal state.

use tracing::{debug, info, warn};

use bastion_core::config::GameConfig;
use bastion_core::enums::{UnitKind, WavePhase};
use bastion_core::events::{GameEvent, WaveSummary};
use bastion_core::state::WaveView;

use crate::score::ScoreLedger;

/// Rejected wave transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WaveError {
    #[error("wave {wave_number} is still in progress")]
    AlreadyInProgress { wave_number: u32 },
    #[error("no cleared wave to advance from (phase {phase:?})")]
    NotAwaitingAdvance { phase: WavePhase },
}

/// Spawn-side capability on the wave ledger.
///
/// A spawner must ask `can_spawn` before every attempt and call
/// `register_spawned` exactly once per unit it instantiates.
pub trait SpawnGate {
    fn can_spawn(&self, kind: UnitKind) -> bool;
    /// Count one spawn. Returns `false` (and counts nothing) if spawning
    /// was not permitted.
    fn register_spawned(&mut self, kind: UnitKind) -> bool;
}

/// Per-wave counters. `0 ≤ destroyed ≤ spawned ≤ target` for both kinds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveState {
    pub wave_number: u32,
    pub phase: WavePhase,
    pub tanks_target: u32,
    pub helicopters_target: u32,
    pub tanks_spawned: u32,
    pub helicopters_spawned: u32,
    pub tanks_destroyed: u32,
    pub helicopters_destroyed: u32,
    /// Simulation time the current wave started.
    pub started_at_secs: f64,
}

impl WaveState {
    pub fn target(&self, kind: UnitKind) -> u32 {
        match kind {
            UnitKind::Tank => self.tanks_target,
            UnitKind::Helicopter => self.helicopters_target,
        }
    }

    pub fn spawned(&self, kind: UnitKind) -> u32 {
        match kind {
            UnitKind::Tank => self.tanks_spawned,
            UnitKind::Helicopter => self.helicopters_spawned,
        }
    }

    pub fn destroyed(&self, kind: UnitKind) -> u32 {
        match kind {
            UnitKind::Tank => self.tanks_destroyed,
            UnitKind::Helicopter => self.helicopters_destroyed,
        }
    }

    /// Everything scheduled has spawned and left play, and at least one tank took part.
    pub fn is_cleared(&self) -> bool {
        self.tanks_spawned == self.tanks_target
            && self.helicopters_spawned == self.helicopters_target
            && self.tanks_destroyed == self.tanks_spawned
            && self.helicopters_destroyed == self.helicopters_spawned
            && self.tanks_spawned > 0
    }

    fn spawned_mut(&mut self, kind: UnitKind) -> &mut u32 {
        match kind {
            UnitKind::Tank => &mut self.tanks_spawned,
            UnitKind::Helicopter => &mut self.helicopters_spawned,
        }
    }

    fn destroyed_mut(&mut self, kind: UnitKind) -> &mut u32 {
        match kind {
            UnitKind::Tank => &mut self.tanks_destroyed,
            UnitKind::Helicopter => &mut self.helicopters_destroyed,
        }
    }
}

/// Units scheduled for `wave_number` (1-based).
///
/// Growth is linear from the wave-1 baseline:
/// `round(base_count * (1 + increase_percent * (wave_number - 1)))`.
pub fn scaled_target(base_count: u32, increase_percent: f64, wave_number: u32) -> u32 {
    let multiplier = 1.0 + increase_percent * wave_number.saturating_sub(1) as f64;
    (base_count as f64 * multiplier).round() as u32
}

/// Wave lifecycle state machine and difficulty scaling.
#[derive(Debug, Clone)]
pub struct WaveDirector {
    state: WaveState,
    tank_base_count: u32,
    helicopter_base_count: u32,
    increase_percent: f64,
    /// Summary shown while waiting for the player. Cleared on the next wave start.
    completed: Option<WaveSummary>,
}

impl WaveDirector {
    pub fn new(tank_base_count: u32, helicopter_base_count: u32, increase_percent: f64) -> Self {
        Self {
            state: WaveState::default(),
            tank_base_count,
            helicopter_base_count,
            increase_percent,
            completed: None,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.tank.base_count,
            config.helicopter.base_count,
            config.waves.increase_percent,
        )
    }

    pub fn state(&self) -> &WaveState {
        &self.state
    }

    pub fn phase(&self) -> WavePhase {
        self.state.phase
    }

    pub fn wave_number(&self) -> u32 {
        self.state.wave_number
    }

    /// Summary of the last cleared wave, while it awaits the player.
    pub fn completed_summary(&self) -> Option<WaveSummary> {
        self.completed
    }

    pub fn view(&self) -> WaveView {
        let s = &self.state;
        WaveView {
            wave_number: s.wave_number,
            phase: s.phase,
            tanks_target: s.tanks_target,
            tanks_spawned: s.tanks_spawned,
            tanks_destroyed: s.tanks_destroyed,
            helicopters_target: s.helicopters_target,
            helicopters_spawned: s.helicopters_spawned,
            helicopters_destroyed: s.helicopters_destroyed,
        }
    }

    /// Reset the wave counter and start wave 1.
    pub fn start_first_wave(
        &mut self,
        now: f64,
        events: &mut Vec<GameEvent>,
    ) -> Result<u32, WaveError> {
        if self.state.phase == WavePhase::InProgress {
            return Err(WaveError::AlreadyInProgress {
                wave_number: self.state.wave_number,
            });
        }
        self.state.wave_number = 0;
        self.start_next_wave(now, events)
    }

    /// Start the next wave. Returns the new wave number.
    pub fn start_next_wave(
        &mut self,
        now: f64,
        events: &mut Vec<GameEvent>,
    ) -> Result<u32, WaveError> {
        if self.state.phase == WavePhase::InProgress {
            return Err(WaveError::AlreadyInProgress {
                wave_number: self.state.wave_number,
            });
        }

        let wave_number = self.state.wave_number + 1;
        self.state = WaveState {
            wave_number,
            phase: WavePhase::InProgress,
            tanks_target: scaled_target(self.tank_base_count, self.increase_percent, wave_number),
            helicopters_target: scaled_target(
                self.helicopter_base_count,
                self.increase_percent,
                wave_number,
            ),
            started_at_secs: now,
            ..WaveState::default()
        };
        self.completed = None;

        info!(
            wave = wave_number,
            tanks = self.state.tanks_target,
            helicopters = self.state.helicopters_target,
            "wave started"
        );
        events.push(GameEvent::WaveStarted {
            wave_number,
            tanks_target: self.state.tanks_target,
            helicopters_target: self.state.helicopters_target,
        });
        Ok(wave_number)
    }

    /// Continue after a cleared wave.
    pub fn advance(&mut self, now: f64, events: &mut Vec<GameEvent>) -> Result<u32, WaveError> {
        if self.state.phase != WavePhase::AwaitingAdvance {
            return Err(WaveError::NotAwaitingAdvance {
                phase: self.state.phase,
            });
        }
        self.start_next_wave(now, events)
    }

    /// Per-tick completion check. Run after every spawn and resolution of the tick.
    pub fn evaluate(&mut self, now: f64, events: &mut Vec<GameEvent>) -> Option<WaveSummary> {
        if self.state.phase != WavePhase::InProgress || !self.state.is_cleared() {
            return None;
        }

        self.state.phase = WavePhase::AwaitingAdvance;
        let summary = WaveSummary {
            wave_number: self.state.wave_number,
            duration_secs: now - self.state.started_at_secs,
            tanks_destroyed: self.state.tanks_destroyed,
            helicopters_destroyed: self.state.helicopters_destroyed,
        };
        self.completed = Some(summary);

        info!(
            wave = summary.wave_number,
            duration_secs = summary.duration_secs,
            tanks = summary.tanks_destroyed,
            helicopters = summary.helicopters_destroyed,
            "wave cleared"
        );
        events.push(GameEvent::WaveCompleted(summary));
        Some(summary)
    }

    pub fn can_spawn_tank(&self) -> bool {
        self.can_spawn(UnitKind::Tank)
    }

    pub fn can_spawn_helicopter(&self) -> bool {
        self.can_spawn(UnitKind::Helicopter)
    }

    pub fn register_tank_spawned(&mut self) -> bool {
        self.register_spawned(UnitKind::Tank)
    }

    pub fn register_helicopter_spawned(&mut self) -> bool {
        self.register_spawned(UnitKind::Helicopter)
    }

    pub fn register_tank_destroyed(&mut self, score: Option<&mut ScoreLedger>) -> bool {
        self.register_destroyed(UnitKind::Tank, score)
    }

    pub fn register_helicopter_destroyed(&mut self, score: Option<&mut ScoreLedger>) -> bool {
        self.register_destroyed(UnitKind::Helicopter, score)
    }

    /// Count one unit of `kind` as having left play, and push the new
    /// wave tally to the score ledger if one is attached.
    ///
    /// Callers must resolve each unit at most once. A registration that would
    /// push `destroyed` past `spawned` is refused.
    pub fn register_destroyed(&mut self, kind: UnitKind, score: Option<&mut ScoreLedger>) -> bool {
        if self.state.destroyed(kind) >= self.state.spawned(kind) {
            warn!(
                %kind,
                wave = self.state.wave_number,
                "destroyed registration with no matching spawn refused"
            );
            return false;
        }
        *self.state.destroyed_mut(kind) += 1;
        debug!(
            %kind,
            destroyed = self.state.destroyed(kind),
            spawned = self.state.spawned(kind),
            "unit left play"
        );

        if let Some(score) = score {
            score.record_wave_progress(
                self.state.wave_number,
                self.state.tanks_destroyed,
                self.state.helicopters_destroyed,
            );
        }
        true
    }
}

impl SpawnGate for WaveDirector {
    fn can_spawn(&self, kind: UnitKind) -> bool {
        self.state.phase == WavePhase::InProgress
            && self.state.spawned(kind) < self.state.target(kind)
    }

    fn register_spawned(&mut self, kind: UnitKind) -> bool {
        if !self.can_spawn(kind) {
            warn!(%kind, wave = self.state.wave_number, "spawn registered without permission");
            return false;
        }
        *self.state.spawned_mut(kind) += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn director() -> WaveDirector {
        WaveDirector::new(5, 2, 0.2)
    }

    /// Spawn and destroy everything scheduled for the current wave.
    fn clear_wave(director: &mut WaveDirector) {
        for kind in UnitKind::ALL {
            while director.can_spawn(kind) {
                assert!(director.register_spawned(kind));
            }
            for _ in 0..director.state().target(kind) {
                assert!(director.register_destroyed(kind, None));
            }
        }
    }

    #[test]
    fn test_scaled_target_linear_growth() {
        assert_eq!(scaled_target(5, 0.2, 1), 5);
        assert_eq!(scaled_target(5, 0.2, 2), 6);
        assert_eq!(scaled_target(5, 0.2, 3), 7);
        assert_eq!(scaled_target(5, 0.2, 6), 10);
        // Linear, not compounding: 1.2^5 * 5 would round to 12.
        assert_ne!(scaled_target(5, 0.2, 6), 12);
    }

    #[test]
    fn test_scaled_target_matches_formula_for_many_waves() {
        for base in [1u32, 2, 3, 5, 8, 13] {
            for increase in [0.0, 0.1, 0.2, 0.35, 1.0] {
                for wave in 1..=40u32 {
                    let expected = (base as f64 * (1.0 + increase * (wave - 1) as f64)).round();
                    assert_eq!(scaled_target(base, increase, wave), expected as u32);
                }
            }
        }
    }

    #[test]
    fn test_starts_idle() {
        let d = director();
        assert_eq!(d.phase(), WavePhase::Idle);
        assert_eq!(d.wave_number(), 0);
        assert!(!d.can_spawn_tank());
        assert!(!d.can_spawn_helicopter());
    }

    #[test]
    fn test_start_first_wave_sets_targets_and_broadcasts() {
        let mut d = director();
        let mut events = Vec::new();
        assert_eq!(d.start_first_wave(3.0, &mut events), Ok(1));
        assert_eq!(d.phase(), WavePhase::InProgress);
        assert_eq!(d.state().tanks_target, 5);
        assert_eq!(d.state().helicopters_target, 2);
        assert_eq!(d.state().started_at_secs, 3.0);
        assert!(matches!(
            events.as_slice(),
            [GameEvent::WaveStarted {
                wave_number: 1,
                tanks_target: 5,
                helicopters_target: 2
            }]
        ));
    }

    #[test]
    fn test_start_next_wave_rejected_while_in_progress() {
        let mut d = director();
        let mut events = Vec::new();
        d.start_first_wave(0.0, &mut events).unwrap();
        assert_eq!(
            d.start_next_wave(1.0, &mut events),
            Err(WaveError::AlreadyInProgress { wave_number: 1 })
        );
        assert_eq!(d.wave_number(), 1);
    }

    #[test]
    fn test_can_spawn_until_target_reached() {
        let mut d = director();
        d.start_first_wave(0.0, &mut Vec::new()).unwrap();
        for _ in 0..5 {
            assert!(d.can_spawn_tank());
            assert!(d.register_tank_spawned());
        }
        assert!(!d.can_spawn_tank());
        assert!(!d.register_tank_spawned(), "over-target spawn must be refused");
        assert_eq!(d.state().tanks_spawned, 5);
        assert!(d.can_spawn_helicopter());
    }

    #[test]
    fn test_destroyed_never_exceeds_spawned() {
        let mut d = director();
        d.start_first_wave(0.0, &mut Vec::new()).unwrap();
        assert!(!d.register_tank_destroyed(None));
        d.register_tank_spawned();
        assert!(d.register_tank_destroyed(None));
        assert!(!d.register_tank_destroyed(None));
        assert_eq!(d.state().tanks_destroyed, 1);
    }

    #[test]
    fn test_completion_requires_all_conditions() {
        let mut d = director();
        let mut events = Vec::new();
        d.start_first_wave(0.0, &mut events).unwrap();

        // All tanks spawned and destroyed, helicopters outstanding.
        for _ in 0..5 {
            d.register_tank_spawned();
            d.register_tank_destroyed(None);
        }
        assert!(d.evaluate(1.0, &mut events).is_none());

        // Helicopters spawned but one still alive.
        d.register_helicopter_spawned();
        d.register_helicopter_spawned();
        d.register_helicopter_destroyed(None);
        assert!(d.evaluate(2.0, &mut events).is_none());
        assert_eq!(d.phase(), WavePhase::InProgress);

        d.register_helicopter_destroyed(None);
        let summary = d.evaluate(12.5, &mut events).expect("wave should complete");
        assert_eq!(d.phase(), WavePhase::AwaitingAdvance);
        assert_eq!(summary.wave_number, 1);
        assert_eq!(summary.duration_secs, 12.5);
        assert_eq!(summary.tanks_destroyed, 5);
        assert_eq!(summary.helicopters_destroyed, 2);
        assert_eq!(d.completed_summary(), Some(summary));
        assert!(matches!(events.last(), Some(GameEvent::WaveCompleted(_))));
    }

    #[test]
    fn test_evaluate_fires_once() {
        let mut d = director();
        let mut events = Vec::new();
        d.start_first_wave(0.0, &mut events).unwrap();
        clear_wave(&mut d);
        assert!(d.evaluate(1.0, &mut events).is_some());
        assert!(d.evaluate(2.0, &mut events).is_none());
        let completions = events
            .iter()
            .filter(|e| matches!(e, GameEvent::WaveCompleted(_)))
            .count();
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_no_completion_without_tanks() {
        let mut d = WaveDirector::new(0, 1, 0.2);
        let mut events = Vec::new();
        d.start_first_wave(0.0, &mut events).unwrap();
        d.register_helicopter_spawned();
        d.register_helicopter_destroyed(None);
        assert!(d.evaluate(1.0, &mut events).is_none());
        assert_eq!(d.phase(), WavePhase::InProgress);
    }

    #[test]
    fn test_spawning_blocked_while_awaiting_advance() {
        let mut d = director();
        let mut events = Vec::new();
        d.start_first_wave(0.0, &mut events).unwrap();
        clear_wave(&mut d);
        d.evaluate(1.0, &mut events);
        assert!(!d.can_spawn_tank());
        assert!(!d.can_spawn_helicopter());
    }

    #[test]
    fn test_advance_starts_scaled_wave_and_clears_summary() {
        let mut d = director();
        let mut events = Vec::new();
        d.start_first_wave(0.0, &mut events).unwrap();
        clear_wave(&mut d);
        d.evaluate(10.0, &mut events);

        assert_eq!(d.advance(15.0, &mut events), Ok(2));
        assert_eq!(d.state().tanks_target, 6);
        assert_eq!(d.state().tanks_spawned, 0);
        assert_eq!(d.state().tanks_destroyed, 0);
        assert_eq!(d.state().started_at_secs, 15.0);
        assert!(d.completed_summary().is_none());

        clear_wave(&mut d);
        d.evaluate(20.0, &mut events);
        d.advance(21.0, &mut events).unwrap();
        assert_eq!(d.state().tanks_target, 7);
    }

    #[test]
    fn test_advance_rejected_unless_awaiting() {
        let mut d = director();
        let mut events = Vec::new();
        assert_eq!(
            d.advance(0.0, &mut events),
            Err(WaveError::NotAwaitingAdvance {
                phase: WavePhase::Idle
            })
        );
        d.start_first_wave(0.0, &mut events).unwrap();
        assert!(d.advance(0.0, &mut events).is_err());
    }

    #[test]
    fn test_destroyed_registration_pushes_progress_to_ledger() {
        let mut d = director();
        let mut score = ScoreLedger::default();
        d.start_first_wave(0.0, &mut Vec::new()).unwrap();
        d.register_tank_spawned();
        d.register_helicopter_spawned();

        d.register_tank_destroyed(Some(&mut score));
        assert_eq!(score.view().wave_tanks_destroyed, 1);
        d.register_helicopter_destroyed(Some(&mut score));
        assert_eq!(score.view().wave_helicopters_destroyed, 1);
        // Wave bookkeeping never counts as a player kill.
        assert_eq!(score.view().tanks_destroyed, 0);
    }
}
