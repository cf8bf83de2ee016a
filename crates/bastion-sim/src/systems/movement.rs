//! Unit movement system.
//!
//! Drives every unresolved unit one tick toward its target through the
//! steering policies in `bastion-units`, and reports the ones that arrived.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use bastion_core::components::*;
use bastion_core::config::GameConfig;
use bastion_units::helicopter::{self, HelicopterContext};
use bastion_units::tank::{self, TankContext};

/// Move all units. Arrived units are pushed onto `arrivals` for the
/// resolution pass; they are not resolved here.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
    now: f64,
    dt: f32,
    arrivals: &mut Vec<Entity>,
) {
    arrivals.clear();

    for (entity, (unit, kinematics, steering, lifecycle)) in
        world.query_mut::<(&Unit, &mut Kinematics, &mut TankSteering, &Lifecycle)>()
    {
        if lifecycle.resolved.is_some() {
            continue;
        }
        let ctx = TankContext {
            position: kinematics.position,
            target: unit.target,
            speed: kinematics.speed,
            heading: kinematics.heading,
            arrival_threshold: unit.arrival_threshold,
            now,
            dt,
            zigzag: &config.zigzag,
        };
        let update = tank::step(&ctx, steering, rng);
        kinematics.position = update.position;
        kinematics.speed = update.speed;
        kinematics.heading = update.heading;
        if update.arrived {
            arrivals.push(entity);
        }
    }

    for (entity, (unit, kinematics, rotors, lifecycle)) in
        world.query_mut::<(&Unit, &mut Kinematics, &mut RotorState, &Lifecycle)>()
    {
        if lifecycle.resolved.is_some() {
            continue;
        }
        let ctx = HelicopterContext {
            position: kinematics.position,
            target: unit.target,
            speed: kinematics.speed,
            heading: kinematics.heading,
            arrival_threshold: unit.arrival_threshold,
            dt,
            rotors: &config.rotors,
        };
        let update = helicopter::step(&ctx, rotors);
        kinematics.position = update.position;
        kinematics.heading = update.heading;
        if update.arrived {
            arrivals.push(entity);
        }
    }
}
