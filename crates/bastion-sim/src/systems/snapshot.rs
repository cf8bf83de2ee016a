//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use glam::Vec3;
use hecs::World;

use bastion_core::components::*;
use bastion_core::enums::GamePhase;
use bastion_core::events::GameEvent;
use bastion_core::state::*;
use bastion_core::types::{horizontal_range, SimTime};

use crate::score::ScoreLedger;
use crate::wave_director::WaveDirector;
use crate::world_setup::unit_id;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    director: &WaveDirector,
    score: Option<&ScoreLedger>,
    base: Vec3,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        wave: director.view(),
        wave_complete: director.completed_summary(),
        units: build_units(world, base),
        score: score.map(ScoreLedger::view).unwrap_or_default(),
        events,
    }
}

/// Build UnitView list from all unresolved units, ordered by id.
fn build_units(world: &World, base: Vec3) -> Vec<UnitView> {
    let mut units: Vec<UnitView> = world
        .query::<(
            &Unit,
            &Kinematics,
            &Lifecycle,
            Option<&RotorState>,
            Option<&TankSteering>,
        )>()
        .iter()
        .filter(|(_, (_, _, lifecycle, _, _))| lifecycle.resolved.is_none())
        .map(|(entity, (unit, kinematics, _, rotors, steering))| UnitView {
            unit_id: unit_id(entity),
            kind: unit.kind,
            position: kinematics.position,
            heading: kinematics.heading,
            speed: kinematics.speed,
            range: horizontal_range(kinematics.position, base),
            rotors: rotors.map(|r| (r.main_deg, r.tail_deg)),
            direct_approach: steering.map(|s| s.direct),
        })
        .collect();
    units.sort_by_key(|u| u.unit_id.0);
    units
}
