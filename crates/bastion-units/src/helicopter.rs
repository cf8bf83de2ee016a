//! Helicopter steering: straight at the base at a fixed speed.

use glam::Vec3;

use bastion_core::components::RotorState;
use bastion_core::config::RotorConfig;
use bastion_core::types::heading_of;

/// Input to the helicopter policy for a single unit.
pub struct HelicopterContext<'a> {
    pub position: Vec3,
    pub target: Vec3,
    pub speed: f32,
    pub heading: f32,
    pub arrival_threshold: f32,
    pub dt: f32,
    pub rotors: &'a RotorConfig,
}

/// Output from the helicopter policy.
#[derive(Debug, Clone, Copy)]
pub struct HelicopterUpdate {
    pub position: Vec3,
    pub heading: f32,
    pub arrived: bool,
}

/// Advance one helicopter by one tick and spin its rotors.
pub fn step(ctx: &HelicopterContext<'_>, rotors: &mut RotorState) -> HelicopterUpdate {
    rotors.main_deg = spin(rotors.main_deg, ctx.rotors.main_rate_deg, ctx.dt);
    rotors.tail_deg = spin(rotors.tail_deg, ctx.rotors.tail_rate_deg, ctx.dt);

    let to_target = ctx.target - ctx.position;
    let distance = to_target.length();
    let direction = to_target.normalize_or_zero();
    let position = ctx.position + direction * (ctx.speed * ctx.dt).min(distance);

    // Keep the old facing when hovering straight above the base.
    let ground = Vec3::new(direction.x, direction.y, 0.0);
    let heading = if ground.length_squared() > 1e-8 {
        heading_of(ground)
    } else {
        ctx.heading
    };

    HelicopterUpdate {
        position,
        heading,
        arrived: position.distance(ctx.target) <= ctx.arrival_threshold,
    }
}

fn spin(angle_deg: f32, rate_deg: f32, dt: f32) -> f32 {
    (angle_deg + rate_deg * dt).rem_euclid(360.0)
}
