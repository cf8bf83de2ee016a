//! Entity spawn factories.
//!
//! Units appear on a ring around the base at a random bearing and start
//! out facing the base.

use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::components::*;
use bastion_core::config::SpawnPolicy;
use bastion_core::enums::UnitKind;
use bastion_core::types::{ground_direction, heading_of, point_on_bearing, UnitId};
use bastion_units::tank;

/// Spawn one unit of `kind` on the policy's spawn ring around `base`.
pub fn spawn_unit(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    kind: UnitKind,
    policy: &SpawnPolicy,
    base: Vec3,
    now: f64,
) -> Entity {
    // Bearing from North, clockwise, uniform over the full circle.
    let bearing: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    let height = base.z + roll(rng, policy.min_spawn_height, policy.max_spawn_height);
    let position = point_on_bearing(base, bearing, policy.spawn_distance, height);
    let speed = roll(rng, policy.min_speed, policy.max_speed);

    let unit = Unit {
        kind,
        target: base,
        arrival_threshold: policy.arrival_threshold,
        spawned_at: now,
    };
    let kinematics = Kinematics {
        position,
        speed,
        heading: heading_of(ground_direction(position, base)),
    };

    match kind {
        UnitKind::Tank => world.spawn((
            unit,
            kinematics,
            tank::initial_steering(position, base, policy.min_speed, policy.max_speed, now),
            Lifecycle::default(),
        )),
        UnitKind::Helicopter => world.spawn((
            unit,
            kinematics,
            RotorState::default(),
            Lifecycle::default(),
        )),
    }
}

/// Stable external id for an entity.
pub fn unit_id(entity: Entity) -> UnitId {
    UnitId(entity.to_bits().get())
}

/// Entity behind an external id, if the id is well-formed.
pub fn entity_for(id: UnitId) -> Option<Entity> {
    Entity::from_bits(id.0)
}

fn roll(rng: &mut ChaCha8Rng, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}
