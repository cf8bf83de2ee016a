//! Simulation constants and tuning parameters.
//!
//! These are the defaults behind `GameConfig`; a run reads its values from
//! the config, never from here directly.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Tanks ---

/// Distance from the base at which tanks appear (world units).
pub const TANK_SPAWN_DISTANCE: f32 = 120.0;

pub const TANK_MIN_SPEED: f32 = 3.0;
pub const TANK_MAX_SPEED: f32 = 6.0;

/// Seconds between tank spawns.
pub const TANK_SPAWN_INTERVAL: f64 = 4.0;

/// Maximum tanks alive at once.
pub const TANK_MAX_CONCURRENT: u32 = 5;

/// Tanks in wave 1.
pub const TANK_BASE_COUNT: u32 = 5;

/// Ground height tanks drive at.
pub const TANK_GROUND_HEIGHT: f32 = 0.0;

/// Range at which a tank counts as having reached the base.
pub const TANK_ARRIVAL_THRESHOLD: f32 = 2.0;

// --- Helicopters ---

pub const HELICOPTER_SPAWN_DISTANCE: f32 = 160.0;

pub const HELICOPTER_MIN_SPEED: f32 = 8.0;
pub const HELICOPTER_MAX_SPEED: f32 = 14.0;

pub const HELICOPTER_SPAWN_INTERVAL: f64 = 8.0;

pub const HELICOPTER_MAX_CONCURRENT: u32 = 3;

pub const HELICOPTER_BASE_COUNT: u32 = 2;

pub const HELICOPTER_MIN_SPAWN_HEIGHT: f32 = 20.0;
pub const HELICOPTER_MAX_SPAWN_HEIGHT: f32 = 40.0;

pub const HELICOPTER_ARRIVAL_THRESHOLD: f32 = 5.0;

/// Main rotor spin rate (degrees per second).
pub const MAIN_ROTOR_RATE_DEG: f32 = 1080.0;

/// Tail rotor spin rate (degrees per second).
pub const TAIL_ROTOR_RATE_DEG: f32 = 1620.0;

// --- Tank zigzag ---

/// Inside this range tanks drop the zigzag and drive straight at the base.
pub const STRAIGHT_LINE_DISTANCE: f32 = 20.0;

/// Minimum seconds between heading changes.
pub const ZIGZAG_MIN_INTERVAL: f64 = 1.5;

/// Random extra seconds added on top of `ZIGZAG_MIN_INTERVAL`.
pub const ZIGZAG_INTERVAL_OFFSET: f64 = 1.5;

/// Upper bound of a zigzag turn, off the direct line (degrees).
pub const ZIGZAG_MAX_ANGLE_DEG: f32 = 45.0;

/// Lower bound of a zigzag turn (degrees).
pub const ZIGZAG_MIN_ANGLE_DEG: f32 = 10.0;

/// Hard limit on deviation from the direct line (degrees).
pub const ZIGZAG_CLAMP_ANGLE_DEG: f32 = 75.0;

/// Turn used when a rolled heading fails the forward-progress check (degrees).
pub const ZIGZAG_FALLBACK_ANGLE_DEG: f32 = 30.0;

/// Fraction of the remaining heading error closed per second.
pub const ZIGZAG_SMOOTHING_RATE: f32 = 2.0;

// --- Waves ---

/// Linear growth of unit counts per wave, relative to wave 1.
pub const WAVE_INCREASE_PERCENT: f64 = 0.2;

// --- Time scale ---

pub const MAX_TIME_SCALE: f64 = 4.0;
