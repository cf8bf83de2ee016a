//! Run-wide scoring: kills, accuracy, longest kill, units that got through.
//!
//! The engine holds the ledger as `Option<ScoreLedger>`. Every caller treats
//! a missing ledger as "skip scoring", never as an error.

use glam::Vec3;

use bastion_core::enums::UnitKind;
use bastion_core::state::ScoreView;
use bastion_core::types::horizontal_range;

/// Cumulative score for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreLedger {
    pub shots_fired: u32,
    /// Player kills only.
    pub tanks_destroyed: u32,
    pub helicopters_destroyed: u32,
    pub tanks_reached_base: u32,
    pub helicopters_reached_base: u32,
    /// Horizontal range from the base of the farthest kill.
    pub longest_kill: f32,
    /// Last wave tally pushed by the wave director.
    pub wave_number: u32,
    pub wave_tanks_destroyed: u32,
    pub wave_helicopters_destroyed: u32,
}

impl ScoreLedger {
    pub fn record_shot(&mut self) {
        self.shots_fired += 1;
    }

    /// A unit destroyed by the player at `position`.
    pub fn record_kill(&mut self, kind: UnitKind, position: Vec3, base: Vec3) {
        match kind {
            UnitKind::Tank => self.tanks_destroyed += 1,
            UnitKind::Helicopter => self.helicopters_destroyed += 1,
        }
        self.longest_kill = self.longest_kill.max(horizontal_range(position, base));
    }

    /// A unit that got through to the base. Never counts as a kill.
    pub fn record_reached_base(&mut self, kind: UnitKind) {
        match kind {
            UnitKind::Tank => self.tanks_reached_base += 1,
            UnitKind::Helicopter => self.helicopters_reached_base += 1,
        }
    }

    /// Mirror of the wave director's destroyed counters for the current wave.
    pub fn record_wave_progress(
        &mut self,
        wave_number: u32,
        tanks_destroyed: u32,
        helicopters_destroyed: u32,
    ) {
        self.wave_number = wave_number;
        self.wave_tanks_destroyed = tanks_destroyed;
        self.wave_helicopters_destroyed = helicopters_destroyed;
    }

    pub fn hits(&self) -> u32 {
        self.tanks_destroyed + self.helicopters_destroyed
    }

    /// Hits per shot as a percentage, capped at 100. Zero before the first shot.
    pub fn accuracy(&self) -> f64 {
        if self.shots_fired == 0 {
            return 0.0;
        }
        (self.hits() as f64 / self.shots_fired as f64 * 100.0).min(100.0)
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            tanks_destroyed: self.tanks_destroyed,
            helicopters_destroyed: self.helicopters_destroyed,
            tanks_reached_base: self.tanks_reached_base,
            helicopters_reached_base: self.helicopters_reached_base,
            shots_fired: self.shots_fired,
            accuracy: self.accuracy(),
            longest_kill: self.longest_kill,
            wave_tanks_destroyed: self.wave_tanks_destroyed,
            wave_helicopters_destroyed: self.wave_helicopters_destroyed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_zero_without_shots() {
        let ledger = ScoreLedger::default();
        assert_eq!(ledger.accuracy(), 0.0);
    }

    #[test]
    fn test_accuracy_is_hits_over_shots() {
        let mut ledger = ScoreLedger::default();
        for _ in 0..4 {
            ledger.record_shot();
        }
        ledger.record_kill(UnitKind::Tank, Vec3::new(0.0, 50.0, 0.0), Vec3::ZERO);
        assert!((ledger.accuracy() - 25.0).abs() < 1e-9);
        ledger.record_kill(UnitKind::Helicopter, Vec3::new(0.0, 10.0, 30.0), Vec3::ZERO);
        assert!((ledger.accuracy() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_accuracy_capped_when_hits_outnumber_shots() {
        let mut ledger = ScoreLedger::default();
        ledger.record_shot();
        ledger.record_kill(UnitKind::Tank, Vec3::X, Vec3::ZERO);
        ledger.record_kill(UnitKind::Tank, Vec3::X, Vec3::ZERO);
        assert_eq!(ledger.accuracy(), 100.0);
    }

    #[test]
    fn test_longest_kill_tracks_maximum_ground_range() {
        let mut ledger = ScoreLedger::default();
        let base = Vec3::new(10.0, 0.0, 0.0);
        ledger.record_kill(UnitKind::Tank, Vec3::new(10.0, 40.0, 0.0), base);
        // Altitude does not add range.
        ledger.record_kill(UnitKind::Helicopter, Vec3::new(10.0, 30.0, 500.0), base);
        assert!((ledger.longest_kill - 40.0).abs() < 1e-4);
        ledger.record_kill(UnitKind::Tank, Vec3::new(-90.0, 0.0, 0.0), base);
        assert!((ledger.longest_kill - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_reached_base_is_not_a_kill() {
        let mut ledger = ScoreLedger::default();
        ledger.record_reached_base(UnitKind::Tank);
        ledger.record_reached_base(UnitKind::Helicopter);
        ledger.record_reached_base(UnitKind::Helicopter);
        let view = ledger.view();
        assert_eq!(view.tanks_reached_base, 1);
        assert_eq!(view.helicopters_reached_base, 2);
        assert_eq!(view.tanks_destroyed, 0);
        assert_eq!(view.helicopters_destroyed, 0);
        assert_eq!(ledger.longest_kill, 0.0);
    }

    #[test]
    fn test_wave_progress_overwrites() {
        let mut ledger = ScoreLedger::default();
        ledger.record_wave_progress(1, 3, 1);
        ledger.record_wave_progress(2, 0, 1);
        let view = ledger.view();
        assert_eq!(ledger.wave_number, 2);
        assert_eq!(view.wave_tanks_destroyed, 0);
        assert_eq!(view.wave_helicopters_destroyed, 1);
    }
}
