#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::commands::PlayerCommand;
    use crate::config::{ConfigError, GameConfig, SpawnPolicy};
    use crate::enums::*;
    use crate::events::{GameEvent, WaveSummary};
    use crate::state::GameStateSnapshot;
    use crate::types::{self, SimTime, UnitId};

    #[test]
    fn test_unit_kind_serde() {
        for v in UnitKind::ALL {
            let json = serde_json::to_string(&v).unwrap();
            let back: UnitKind = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    /// Verify PlayerCommand round-trips through serde (tagged union).
    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::StartGame,
            PlayerCommand::AdvanceWave,
            PlayerCommand::SkipWave,
            PlayerCommand::FireShot,
            PlayerCommand::UnitHit {
                unit_id: UnitId(42),
            },
            PlayerCommand::SetTimeScale { scale: 2.0 },
            PlayerCommand::Pause,
            PlayerCommand::Resume,
            PlayerCommand::Restart,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_player_command_tag_format() {
        let json = serde_json::to_string(&PlayerCommand::UnitHit {
            unit_id: UnitId(7),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"UnitHit","unit_id":7}"#);
    }

    #[test]
    fn test_game_event_wave_completed_serde() {
        let event = GameEvent::WaveCompleted(WaveSummary {
            wave_number: 3,
            duration_secs: 41.5,
            tanks_destroyed: 7,
            helicopters_destroyed: 3,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"WaveCompleted""#));
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        match back {
            GameEvent::WaveCompleted(summary) => assert_eq!(summary.wave_number, 3),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, GamePhase::MainMenu);
        assert_eq!(back.wave.phase, WavePhase::Idle);
        assert!(back.units.is_empty());
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..crate::constants::TICK_RATE {
            time.advance();
        }
        assert_eq!(time.tick, crate::constants::TICK_RATE as u64);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_on_bearing_north_and_east() {
        let base = Vec3::new(10.0, 20.0, 0.0);
        let north = types::point_on_bearing(base, 0.0, 100.0, 5.0);
        assert!((north - Vec3::new(10.0, 120.0, 5.0)).length() < 1e-3);

        let east = types::point_on_bearing(base, std::f32::consts::FRAC_PI_2, 100.0, 0.0);
        assert!((east - Vec3::new(110.0, 20.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_heading_of_cardinal_directions() {
        assert!(types::heading_of(Vec3::Y).abs() < 1e-6);
        let east = types::heading_of(Vec3::X);
        assert!((east - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        let west = types::heading_of(-Vec3::X);
        assert!((west - 3.0 * std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_ground_direction_ignores_altitude() {
        let dir = types::ground_direction(Vec3::new(0.0, 0.0, 30.0), Vec3::new(0.0, 10.0, 0.0));
        assert!((dir - Vec3::Y).length() < 1e-6);
        let none = types::ground_direction(Vec3::new(1.0, 1.0, 5.0), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(none, Vec3::ZERO);
    }

    // ---- Config ----

    #[test]
    fn test_default_config_is_valid() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            GameConfig::from_json_str(r#"{ "waves": { "increase_percent": 0.5 } }"#).unwrap();
        assert_eq!(config.waves.increase_percent, 0.5);
        assert_eq!(config.tank, SpawnPolicy::tank_default());
        assert_eq!(config.zigzag, GameConfig::default().zigzag);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back = GameConfig::from_json_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_invalid_speed_range_rejected() {
        let mut policy = SpawnPolicy::tank_default();
        policy.min_speed = 8.0;
        policy.max_speed = 4.0;
        let err = policy.validate(UnitKind::Tank).unwrap_err();
        match err {
            ConfigError::InvalidPolicy { kind, field, .. } => {
                assert_eq!(kind, UnitKind::Tank);
                assert_eq!(field, "max_speed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = GameConfig::default();
        config.helicopter.max_concurrent = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPolicy {
                kind: UnitKind::Helicopter,
                field: "max_concurrent",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_tank_base_count_rejected() {
        let mut config = GameConfig::default();
        config.tank.base_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_increase_rejected() {
        let mut config = GameConfig::default();
        config.waves.increase_percent = -0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidIncrease(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load("/definitely/not/here/bastion.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("bastion.json"));
    }
}
