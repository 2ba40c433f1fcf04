//! Tests for config loading and validation.

#[cfg(test)]
mod tests {
    use crate::config::{ConfigError, GameConfig};

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = GameConfig::from_ron_str("()").unwrap();

        assert_eq!(config.agent.max_speed, 15.0);
        assert_eq!(config.controls.look_sensitivity, 9.0);
        assert_eq!(config.weapon.fire_rate, 10.0);
        assert_eq!(config.weapon.recoil_angles, 60.0);
    }

    #[test]
    fn test_partial_override() {
        let config = GameConfig::from_ron_str(
            r#"(
                agent: (max_speed: 12.0, jump_speed: 6.0),
                weapon: (
                    model: "weapons/smg.glb",
                    fire_rate: 14.0,
                    automatic: true,
                    recoil_curve: [
                        (time: 0.0, value: 0.0),
                        (time: 0.04, value: 1.0),
                        (time: 0.2, value: 0.0),
                    ],
                ),
            )"#,
        )
        .unwrap();

        assert_eq!(config.agent.max_speed, 12.0);
        assert_eq!(config.agent.jump_speed, 6.0);
        assert_eq!(config.agent.radius, 0.3);
        assert_eq!(config.weapon.model, "weapons/smg.glb");
        assert!(config.weapon.automatic);
        assert_eq!(config.weapon.recoil_curve.duration(), 0.2);
        assert_eq!(config.weapon.recoil_curve.keys()[1].in_tangent, 0.0);
    }

    #[test]
    fn test_zero_fire_rate_rejected_at_load() {
        let result = GameConfig::from_ron_str("(weapon: (fire_rate: 0.0))");
        assert!(matches!(result, Err(ConfigError::NonPositiveFireRate { .. })));
    }

    #[test]
    fn test_empty_recoil_curve_rejected_at_load() {
        let result = GameConfig::from_ron_str("(weapon: (recoil_curve: []))");
        assert!(matches!(result, Err(ConfigError::EmptyRecoilCurve { .. })));
    }

    #[test]
    fn test_capsule_must_fit_radius() {
        let result = GameConfig::from_ron_str("(agent: (radius: 1.0, height: 1.5))");
        assert!(matches!(result, Err(ConfigError::InvalidDimension { .. })));
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let result = GameConfig::from_ron_str("(agent: (max_speed: \"fast\"))");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = GameConfig::load("definitely/not/here.ron");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_round_trip_through_ron() {
        let config = GameConfig::default();
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        let parsed = GameConfig::from_ron_str(&text).unwrap();

        assert_eq!(parsed.weapon, config.weapon);
        assert_eq!(parsed.agent, config.agent);
    }

    #[test]
    fn test_infinite_recoil_keyframe_rejected_at_load() {
        let result = GameConfig::from_ron_str(
            "(weapon: (recoil_curve: [(time: 0.0, value: 0.0), (time: inf, value: 1.0)]))",
        );
        assert!(matches!(
            result,
            Err(ConfigError::NonFiniteKeyframe { ref curve, .. }) if curve == "recoil"
        ));
    }

    #[test]
    fn test_nan_recoil_value_rejected_at_load() {
        let result = GameConfig::from_ron_str(
            "(weapon: (recoil_curve: [(time: 0.0, value: 0.0), (time: 0.2, value: NaN)]))",
        );
        assert!(matches!(result, Err(ConfigError::NonFiniteKeyframe { .. })));
    }

    #[test]
    fn test_infinite_part_keyframe_rejected_at_load() {
        let result = GameConfig::from_ron_str(
            r#"(weapon: (parts: [(name: "bolt", curve: [(time: 0.0, value: 0.0), (time: inf, value: 1.0)])]))"#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::NonFiniteKeyframe { ref curve, .. }) if curve == "bolt"
        ));
    }
}
