//! Cleanup system: despawns units that have been resolved.

use hecs::{Entity, World};

use bastion_core::components::Lifecycle;

/// Despawn every resolved unit.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, lifecycle) in world.query_mut::<&Lifecycle>() {
        if lifecycle.resolved.is_some() {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Despawn every unit, resolved or not.
///
/// Each freed slot gets a new generation, so ids handed out before the
/// call never match a unit spawned after it. `World::clear` resets
/// generations and must not be used for this.
pub fn despawn_all(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    despawn_buffer.extend(world.iter().map(|entity_ref| entity_ref.entity()));

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
