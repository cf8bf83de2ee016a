//! Unit resolution: the single path by which a unit leaves play.
//!
//! A player kill, an arrival at the base and a skipped wave all go through
//! `resolve_unit`, which sets the unit's `Lifecycle` flag before any
//! counter moves. A second resolution of the same unit is a no-op, so a
//! unit shot on the tick it arrives is counted once.

use glam::Vec3;
use hecs::{Entity, World};
use tracing::debug;

use bastion_core::components::{Kinematics, Lifecycle, Unit};
use bastion_core::enums::{ResolutionCause, UnitKind};
use bastion_core::events::GameEvent;

use crate::score::ScoreLedger;
use crate::wave_director::WaveDirector;
use crate::world_setup::unit_id;

/// Collaborators touched when a unit is resolved.
pub struct ResolutionContext<'a> {
    pub director: &'a mut WaveDirector,
    /// Scoring is skipped when no ledger is attached.
    pub score: Option<&'a mut ScoreLedger>,
    pub base: Vec3,
    pub events: &'a mut Vec<GameEvent>,
}

/// Remove `entity` from play with `cause`. Returns `false` if the entity
/// is not a live unit or was already resolved.
pub fn resolve_unit(
    world: &mut World,
    entity: Entity,
    cause: ResolutionCause,
    ctx: &mut ResolutionContext<'_>,
) -> bool {
    let Ok((unit, kinematics, lifecycle)) =
        world.query_one_mut::<(&Unit, &Kinematics, &mut Lifecycle)>(entity)
    else {
        debug!(?entity, ?cause, "resolution for unknown entity ignored");
        return false;
    };
    if let Some(previous) = lifecycle.resolved {
        debug!(?entity, ?cause, ?previous, "unit already resolved");
        return false;
    }
    lifecycle.resolved = Some(cause);
    let kind = unit.kind;
    let position = kinematics.position;

    ctx.director
        .register_destroyed(kind, ctx.score.as_deref_mut());
    if let Some(score) = ctx.score.as_deref_mut() {
        match cause {
            ResolutionCause::PlayerKill => score.record_kill(kind, position, ctx.base),
            ResolutionCause::ReachedBase => score.record_reached_base(kind),
            ResolutionCause::Skipped => {}
        }
    }

    debug!(%kind, ?cause, ?position, "unit resolved");
    ctx.events.push(GameEvent::UnitDestroyed {
        unit_id: unit_id(entity),
        kind,
        position,
        cause,
    });
    true
}

/// Resolve every live unit except one of each kind.
///
/// The retained units keep moving, so the wave still ends through a normal
/// kill or arrival. Returns the number of units removed.
pub fn skip_wave(world: &mut World, ctx: &mut ResolutionContext<'_>) -> usize {
    let mut live: Vec<(Entity, UnitKind, f64)> = world
        .query::<(&Unit, &Lifecycle)>()
        .iter()
        .filter(|(_, (_, lifecycle))| lifecycle.resolved.is_none())
        .map(|(entity, (unit, _))| (entity, unit.kind, unit.spawned_at))
        .collect();
    // Earliest spawned unit of each kind survives. Entity bits break ties
    // between units spawned on the same tick.
    live.sort_by(|a, b| a.2.total_cmp(&b.2).then(a.0.to_bits().cmp(&b.0.to_bits())));

    let mut retained = Vec::with_capacity(UnitKind::ALL.len());
    let mut removed = 0;
    for (entity, kind, _) in live {
        if !retained.contains(&kind) {
            retained.push(kind);
            continue;
        }
        if resolve_unit(world, entity, ResolutionCause::Skipped, ctx) {
            removed += 1;
        }
    }
    removed
}
