//! Tank steering: a zigzag approach that never gives up forward progress.
//!
//! Far from the base a tank alternates left and right turns off the direct
//! line, re-rolling its speed at every turn and easing into each new
//! heading. Once inside `straight_line_distance` it drives straight at the
//! base. No heading ever points more than `ZIGZAG_CLAMP_ANGLE_DEG` away
//! from the base.

use glam::{Quat, Vec3};
use rand::Rng;

use bastion_core::components::TankSteering;
use bastion_core::config::ZigzagConfig;
use bastion_core::constants::{
    ZIGZAG_CLAMP_ANGLE_DEG, ZIGZAG_FALLBACK_ANGLE_DEG, ZIGZAG_MIN_ANGLE_DEG,
};
use bastion_core::types::{ground_direction, heading_of, horizontal_range};

/// Input to the tank policy for a single unit.
pub struct TankContext<'a> {
    pub position: Vec3,
    pub target: Vec3,
    pub speed: f32,
    pub heading: f32,
    pub arrival_threshold: f32,
    /// Current simulation time (seconds).
    pub now: f64,
    /// Seconds covered by this tick.
    pub dt: f32,
    pub zigzag: &'a ZigzagConfig,
}

/// Output from the tank policy.
#[derive(Debug, Clone, Copy)]
pub struct TankUpdate {
    pub position: Vec3,
    pub speed: f32,
    pub heading: f32,
    pub arrived: bool,
}

/// Cosine of the largest permitted deviation from the direct line.
pub fn progress_limit() -> f32 {
    ZIGZAG_CLAMP_ANGLE_DEG.to_radians().cos()
}

/// Steering state for a tank that has just spawned at `position`.
///
/// The first heading change happens on the tank's first tick.
pub fn initial_steering(
    position: Vec3,
    target: Vec3,
    min_speed: f32,
    max_speed: f32,
    now: f64,
) -> TankSteering {
    let to_target = ground_direction(position, target);
    TankSteering {
        current_direction: to_target,
        zigzag_direction: to_target,
        next_zigzag_time: now,
        last_zigzag_was_left: false,
        direct: false,
        min_speed,
        max_speed,
    }
}

/// Advance one tank by one tick.
pub fn step<R: Rng + ?Sized>(
    ctx: &TankContext<'_>,
    steering: &mut TankSteering,
    rng: &mut R,
) -> TankUpdate {
    let distance = horizontal_range(ctx.position, ctx.target);
    let to_target = ground_direction(ctx.position, ctx.target);
    let mut speed = ctx.speed;

    if distance <= ctx.zigzag.straight_line_distance {
        // Immediate snap, no smoothing.
        steering.direct = true;
        steering.current_direction = to_target;
        steering.zigzag_direction = to_target;
    } else {
        steering.direct = false;
        // The line to the base turns as the tank moves, so a held heading
        // can drift out of the progress cone before its turn is due.
        let heading_lost = steering.zigzag_direction.dot(to_target) <= progress_limit();
        if ctx.now >= steering.next_zigzag_time || heading_lost {
            steering.zigzag_direction = roll_heading(
                to_target,
                &mut steering.last_zigzag_was_left,
                ctx.zigzag.max_angle_deg,
                rng,
            );
            speed = roll_speed(steering.min_speed, steering.max_speed, rng);
            steering.next_zigzag_time = ctx.now + roll_interval(ctx.zigzag, rng);
        }
        let t = ctx.zigzag.smoothing_rate * ctx.dt;
        steering.current_direction =
            slerp_direction(steering.current_direction, steering.zigzag_direction, t);
        if steering.current_direction.dot(to_target) <= progress_limit() {
            steering.current_direction = steering.zigzag_direction;
        }
    }

    let travel = (speed * ctx.dt).min(distance);
    let position = ctx.position + steering.current_direction * travel;
    let heading = if steering.current_direction == Vec3::ZERO {
        ctx.heading
    } else {
        heading_of(steering.current_direction)
    };
    let arrived = horizontal_range(position, ctx.target) <= ctx.arrival_threshold;

    TankUpdate {
        position,
        speed,
        heading,
        arrived,
    }
}

/// Pick the next zigzag heading off `to_target`.
///
/// Turns alternate strictly: `last_was_left` is flipped on every call. The
/// turn magnitude is uniform in `[ZIGZAG_MIN_ANGLE_DEG, max_angle_deg]`,
/// clamped to `ZIGZAG_CLAMP_ANGLE_DEG`. A result that fails the
/// forward-progress check is replaced by a `ZIGZAG_FALLBACK_ANGLE_DEG` turn.
pub fn roll_heading<R: Rng + ?Sized>(
    to_target: Vec3,
    last_was_left: &mut bool,
    max_angle_deg: f32,
    rng: &mut R,
) -> Vec3 {
    let turn_left = !*last_was_left;
    *last_was_left = turn_left;

    let upper = max_angle_deg.clamp(ZIGZAG_MIN_ANGLE_DEG, ZIGZAG_CLAMP_ANGLE_DEG);
    let magnitude = if upper > ZIGZAG_MIN_ANGLE_DEG {
        rng.gen_range(ZIGZAG_MIN_ANGLE_DEG..=upper)
    } else {
        ZIGZAG_MIN_ANGLE_DEG
    };
    let sign = if turn_left { 1.0 } else { -1.0 };

    let heading = rotate_about_up(to_target, sign * magnitude.to_radians());
    if heading.dot(to_target) <= progress_limit() {
        rotate_about_up(to_target, sign * ZIGZAG_FALLBACK_ANGLE_DEG.to_radians())
    } else {
        heading
    }
}

/// Rotate a ground-plane direction about the up axis. Positive is a left turn.
pub fn rotate_about_up(direction: Vec3, angle_rad: f32) -> Vec3 {
    Quat::from_rotation_z(angle_rad) * direction
}

/// Turn `from` toward `to` by fraction `t` of the angle between them,
/// staying in the ground plane.
pub fn slerp_direction(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    let to = to.normalize_or_zero();
    let from = from.normalize_or_zero();
    if from == Vec3::ZERO {
        return to;
    }
    if to == Vec3::ZERO {
        return from;
    }
    let t = t.clamp(0.0, 1.0);
    let cross = from.x * to.y - from.y * to.x;
    let angle = cross.atan2(from.dot(to));
    rotate_about_up(from, angle * t).normalize_or_zero()
}

fn roll_speed<R: Rng + ?Sized>(min_speed: f32, max_speed: f32, rng: &mut R) -> f32 {
    if max_speed > min_speed {
        rng.gen_range(min_speed..=max_speed)
    } else {
        min_speed
    }
}

fn roll_interval<R: Rng + ?Sized>(zigzag: &ZigzagConfig, rng: &mut R) -> f64 {
    let offset = if zigzag.interval_offset_secs > 0.0 {
        rng.gen_range(0.0..=zigzag.interval_offset_secs)
    } else {
        0.0
    };
    zigzag.min_interval_secs + offset
}
