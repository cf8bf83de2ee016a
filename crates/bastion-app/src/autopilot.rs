//! Headless stand-ins for the player and the hit-detection collaborator.
//!
//! `Autogunner` fires at the nearest unit on a fixed cadence and reports a
//! hit with a seeded probability. `Autopilot` wraps it, advances every
//! cleared wave, and stops after a configured number of waves.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use bastion_core::commands::PlayerCommand;
use bastion_core::enums::GamePhase;
use bastion_core::events::WaveSummary;
use bastion_core::state::GameStateSnapshot;

/// Fires at the closest unit every `cadence_ticks` ticks.
#[derive(Debug, Clone)]
pub struct Autogunner {
    rng: ChaCha8Rng,
    hit_chance: f64,
    cadence_ticks: u64,
    last_shot_tick: Option<u64>,
}

impl Autogunner {
    /// A non-finite `hit_chance` is treated as 0, so every shot misses.
    pub fn new(seed: u64, hit_chance: f64, cadence_ticks: u64) -> Self {
        let hit_chance = if hit_chance.is_finite() {
            hit_chance.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            hit_chance,
            cadence_ticks: cadence_ticks.max(1),
            last_shot_tick: None,
        }
    }

    /// Commands to send in response to `snapshot`: nothing, a miss
    /// (`FireShot`), or a hit (`FireShot` then `UnitHit`).
    pub fn react(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        if snapshot.phase != GamePhase::Active {
            return Vec::new();
        }
        let tick = snapshot.time.tick;
        if let Some(last) = self.last_shot_tick {
            if tick < last + self.cadence_ticks {
                return Vec::new();
            }
        }
        let Some(target) = snapshot
            .units
            .iter()
            .min_by(|a, b| a.range.total_cmp(&b.range))
        else {
            return Vec::new();
        };

        self.last_shot_tick = Some(tick);
        let mut commands = vec![PlayerCommand::FireShot];
        if self.rng.gen_bool(self.hit_chance) {
            commands.push(PlayerCommand::UnitHit {
                unit_id: target.unit_id,
            });
        }
        commands
    }
}

/// Plays a run to a fixed number of cleared waves.
#[derive(Debug, Clone)]
pub struct Autopilot {
    gunner: Autogunner,
    waves_to_play: u32,
    cleared: Vec<WaveSummary>,
    last_tick: Option<u64>,
}

impl Autopilot {
    pub fn new(gunner: Autogunner, waves_to_play: u32) -> Self {
        Self {
            gunner,
            waves_to_play,
            cleared: Vec::new(),
            last_tick: None,
        }
    }

    pub fn cleared(&self) -> &[WaveSummary] {
        &self.cleared
    }

    pub fn is_finished(&self) -> bool {
        self.cleared.len() as u32 >= self.waves_to_play
    }

    /// Observe one snapshot and decide what to send. Repeated snapshots of
    /// the same tick are ignored, so a poller may call this freely.
    pub fn observe(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        if self.last_tick == Some(snapshot.time.tick) {
            return Vec::new();
        }
        self.last_tick = Some(snapshot.time.tick);

        if let Some(summary) = snapshot.wave_complete {
            let new_wave = self
                .cleared
                .last()
                .map_or(true, |last| last.wave_number != summary.wave_number);
            if new_wave {
                info!(
                    wave = summary.wave_number,
                    duration_secs = summary.duration_secs,
                    tanks = summary.tanks_destroyed,
                    helicopters = summary.helicopters_destroyed,
                    "wave cleared"
                );
                self.cleared.push(summary);
                if !self.is_finished() {
                    return vec![PlayerCommand::AdvanceWave];
                }
            }
            return Vec::new();
        }

        self.gunner.react(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use bastion_core::enums::UnitKind;
    use bastion_core::state::UnitView;
    use bastion_core::types::UnitId;

    use super::*;

    fn unit(id: u64, range: f32) -> UnitView {
        UnitView {
            unit_id: UnitId(id),
            kind: UnitKind::Tank,
            position: Vec3::new(0.0, range, 0.0),
            heading: 0.0,
            speed: 4.0,
            range,
            rotors: None,
            direct_approach: Some(false),
        }
    }

    fn active(tick: u64, units: Vec<UnitView>) -> GameStateSnapshot {
        let mut snapshot = GameStateSnapshot {
            phase: GamePhase::Active,
            units,
            ..Default::default()
        };
        snapshot.time.tick = tick;
        snapshot
    }

    #[test]
    fn test_gunner_targets_nearest_unit() {
        let mut gunner = Autogunner::new(1, 1.0, 1);
        let commands = gunner.react(&active(1, vec![unit(1, 80.0), unit(2, 30.0), unit(3, 55.0)]));
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], PlayerCommand::FireShot));
        assert!(matches!(
            commands[1],
            PlayerCommand::UnitHit {
                unit_id: UnitId(2)
            }
        ));
    }

    #[test]
    fn test_gunner_respects_cadence() {
        let mut gunner = Autogunner::new(1, 1.0, 10);
        let units = vec![unit(1, 50.0)];
        assert!(!gunner.react(&active(5, units.clone())).is_empty());
        assert!(gunner.react(&active(6, units.clone())).is_empty());
        assert!(gunner.react(&active(14, units.clone())).is_empty());
        assert!(!gunner.react(&active(15, units)).is_empty());
    }

    #[test]
    fn test_gunner_zero_hit_chance_only_misses() {
        let mut gunner = Autogunner::new(9, 0.0, 1);
        for tick in 0..100 {
            let commands = gunner.react(&active(tick, vec![unit(1, 50.0)]));
            assert!(matches!(commands.as_slice(), [PlayerCommand::FireShot]));
        }
    }

    #[test]
    fn test_gunner_non_finite_hit_chance_only_misses() {
        for chance in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut gunner = Autogunner::new(4, chance, 1);
            let commands = gunner.react(&active(1, vec![unit(1, 50.0)]));
            assert!(matches!(commands.as_slice(), [PlayerCommand::FireShot]));
        }
    }

    #[test]
    fn test_gunner_holds_fire_without_targets_or_when_paused() {
        let mut gunner = Autogunner::new(1, 1.0, 1);
        assert!(gunner.react(&active(1, Vec::new())).is_empty());
        let mut paused = active(2, vec![unit(1, 10.0)]);
        paused.phase = GamePhase::Paused;
        assert!(gunner.react(&paused).is_empty());
    }

    #[test]
    fn test_autopilot_advances_then_finishes() {
        let mut pilot = Autopilot::new(Autogunner::new(1, 1.0, 1), 2);
        let summary = |wave_number| WaveSummary {
            wave_number,
            duration_secs: 10.0,
            tanks_destroyed: 5,
            helicopters_destroyed: 2,
        };

        let mut cleared = active(100, Vec::new());
        cleared.wave_complete = Some(summary(1));
        assert!(matches!(
            pilot.observe(&cleared).as_slice(),
            [PlayerCommand::AdvanceWave]
        ));
        // Same tick polled again: no duplicate advance.
        assert!(pilot.observe(&cleared).is_empty());
        assert!(!pilot.is_finished());

        let mut cleared_two = active(200, Vec::new());
        cleared_two.wave_complete = Some(summary(2));
        assert!(pilot.observe(&cleared_two).is_empty());
        assert!(pilot.is_finished());
        assert_eq!(pilot.cleared().len(), 2);
    }
}
