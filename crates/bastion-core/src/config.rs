//! Run configuration: spawn policies, zigzag tuning and wave scaling.
//!
//! Everything defaults to the values in `constants.rs`, so a JSON file only
//! needs to name the sections it overrides. A spawn policy section, once
//! present, must be complete.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::UnitKind;

/// Errors produced while loading or validating a `GameConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{kind} policy: {field} must be {requirement}, got {value}")]
    InvalidPolicy {
        kind: UnitKind,
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },
    #[error("zigzag: {field} must be {requirement}, got {value}")]
    InvalidZigzag {
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },
    #[error("waves: increase_percent must be finite and non-negative, got {0}")]
    InvalidIncrease(f64),
}

/// Spawn and movement parameters for one unit kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPolicy {
    /// Distance from the base at which units appear.
    pub spawn_distance: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Seconds between spawns.
    pub spawn_interval_secs: f64,
    /// Population cap on simultaneously alive units.
    pub max_concurrent: u32,
    /// Units of this kind in wave 1.
    pub base_count: u32,
    pub min_spawn_height: f32,
    pub max_spawn_height: f32,
    pub arrival_threshold: f32,
}

impl SpawnPolicy {
    pub fn tank_default() -> Self {
        Self {
            spawn_distance: TANK_SPAWN_DISTANCE,
            min_speed: TANK_MIN_SPEED,
            max_speed: TANK_MAX_SPEED,
            spawn_interval_secs: TANK_SPAWN_INTERVAL,
            max_concurrent: TANK_MAX_CONCURRENT,
            base_count: TANK_BASE_COUNT,
            min_spawn_height: TANK_GROUND_HEIGHT,
            max_spawn_height: TANK_GROUND_HEIGHT,
            arrival_threshold: TANK_ARRIVAL_THRESHOLD,
        }
    }

    pub fn helicopter_default() -> Self {
        Self {
            spawn_distance: HELICOPTER_SPAWN_DISTANCE,
            min_speed: HELICOPTER_MIN_SPEED,
            max_speed: HELICOPTER_MAX_SPEED,
            spawn_interval_secs: HELICOPTER_SPAWN_INTERVAL,
            max_concurrent: HELICOPTER_MAX_CONCURRENT,
            base_count: HELICOPTER_BASE_COUNT,
            min_spawn_height: HELICOPTER_MIN_SPAWN_HEIGHT,
            max_spawn_height: HELICOPTER_MAX_SPAWN_HEIGHT,
            arrival_threshold: HELICOPTER_ARRIVAL_THRESHOLD,
        }
    }

    pub fn default_for(kind: UnitKind) -> Self {
        match kind {
            UnitKind::Tank => Self::tank_default(),
            UnitKind::Helicopter => Self::helicopter_default(),
        }
    }

    /// Check the policy is usable for spawning `kind`.
    pub fn validate(&self, kind: UnitKind) -> Result<(), ConfigError> {
        let invalid = |field, requirement, value: f64| ConfigError::InvalidPolicy {
            kind,
            field,
            requirement,
            value,
        };

        if !(self.spawn_distance.is_finite() && self.spawn_distance > 0.0) {
            return Err(invalid("spawn_distance", "positive", self.spawn_distance as f64));
        }
        if !(self.min_speed.is_finite() && self.min_speed > 0.0) {
            return Err(invalid("min_speed", "positive", self.min_speed as f64));
        }
        if !(self.max_speed.is_finite() && self.max_speed >= self.min_speed) {
            return Err(invalid("max_speed", "at least min_speed", self.max_speed as f64));
        }
        if !(self.spawn_interval_secs.is_finite() && self.spawn_interval_secs > 0.0) {
            return Err(invalid("spawn_interval_secs", "positive", self.spawn_interval_secs));
        }
        if self.max_concurrent == 0 {
            return Err(invalid("max_concurrent", "at least 1", 0.0));
        }
        if !(self.min_spawn_height.is_finite() && self.max_spawn_height >= self.min_spawn_height)
        {
            return Err(invalid(
                "max_spawn_height",
                "at least min_spawn_height",
                self.max_spawn_height as f64,
            ));
        }
        if !(self.arrival_threshold.is_finite() && self.arrival_threshold > 0.0) {
            return Err(invalid("arrival_threshold", "positive", self.arrival_threshold as f64));
        }
        Ok(())
    }
}

/// Tank zigzag tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZigzagConfig {
    pub straight_line_distance: f32,
    pub min_interval_secs: f64,
    pub interval_offset_secs: f64,
    pub max_angle_deg: f32,
    pub smoothing_rate: f32,
}

impl Default for ZigzagConfig {
    fn default() -> Self {
        Self {
            straight_line_distance: STRAIGHT_LINE_DISTANCE,
            min_interval_secs: ZIGZAG_MIN_INTERVAL,
            interval_offset_secs: ZIGZAG_INTERVAL_OFFSET,
            max_angle_deg: ZIGZAG_MAX_ANGLE_DEG,
            smoothing_rate: ZIGZAG_SMOOTHING_RATE,
        }
    }
}

impl ZigzagConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, requirement, value: f64| ConfigError::InvalidZigzag {
            field,
            requirement,
            value,
        };

        if !(self.straight_line_distance.is_finite() && self.straight_line_distance >= 0.0) {
            return Err(invalid(
                "straight_line_distance",
                "non-negative",
                self.straight_line_distance as f64,
            ));
        }
        if !(self.min_interval_secs.is_finite() && self.min_interval_secs > 0.0) {
            return Err(invalid("min_interval_secs", "positive", self.min_interval_secs));
        }
        if !(self.interval_offset_secs.is_finite() && self.interval_offset_secs >= 0.0) {
            return Err(invalid(
                "interval_offset_secs",
                "non-negative",
                self.interval_offset_secs,
            ));
        }
        // Any finite max_angle_deg is accepted; steering clamps it.
        if !self.max_angle_deg.is_finite() {
            return Err(invalid("max_angle_deg", "finite", self.max_angle_deg as f64));
        }
        if !(self.smoothing_rate.is_finite() && self.smoothing_rate > 0.0) {
            return Err(invalid("smoothing_rate", "positive", self.smoothing_rate as f64));
        }
        Ok(())
    }
}

/// Wave-over-wave difficulty scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Added to the wave-1 multiplier once per wave after the first.
    pub increase_percent: f64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            increase_percent: WAVE_INCREASE_PERCENT,
        }
    }
}

/// Cosmetic helicopter rotor speeds (degrees per second).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotorConfig {
    pub main_rate_deg: f32,
    pub tail_rate_deg: f32,
}

impl Default for RotorConfig {
    fn default() -> Self {
        Self {
            main_rate_deg: MAIN_ROTOR_RATE_DEG,
            tail_rate_deg: TAIL_ROTOR_RATE_DEG,
        }
    }
}

/// Complete configuration for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Where the defended base sits. Static for the run.
    pub base_position: Vec3,
    pub tank: SpawnPolicy,
    pub helicopter: SpawnPolicy,
    pub zigzag: ZigzagConfig,
    pub waves: WaveConfig,
    pub rotors: RotorConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_position: Vec3::ZERO,
            tank: SpawnPolicy::tank_default(),
            helicopter: SpawnPolicy::helicopter_default(),
            zigzag: ZigzagConfig::default(),
            waves: WaveConfig::default(),
            rotors: RotorConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Does not validate.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a config file. Does not validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn policy(&self, kind: UnitKind) -> &SpawnPolicy {
        match kind {
            UnitKind::Tank => &self.tank,
            UnitKind::Helicopter => &self.helicopter,
        }
    }

    /// Validate every section.
    ///
    /// The simulation tolerates an invalid spawn policy (that spawner is
    /// disabled), so callers decide whether an error here is fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tank.validate(UnitKind::Tank)?;
        if self.tank.base_count == 0 {
            // A wave only completes once at least one tank has spawned.
            return Err(ConfigError::InvalidPolicy {
                kind: UnitKind::Tank,
                field: "base_count",
                requirement: "at least 1",
                value: 0.0,
            });
        }
        self.helicopter.validate(UnitKind::Helicopter)?;
        self.zigzag.validate()?;
        let increase = self.waves.increase_percent;
        if !(increase.is_finite() && increase >= 0.0) {
            return Err(ConfigError::InvalidIncrease(increase));
        }
        Ok(())
    }
}
