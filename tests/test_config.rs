use std::io::Write;

use lane_crosser::config::*;

#[test]
fn defaults() {
    let cfg = GameConfig::default();
    assert_eq!(cfg.enemy_count, 5);
    assert_eq!(cfg.frame_ms, 16);
    assert_eq!(cfg.seed, None);
    assert!(cfg.validate().is_ok());
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let cfg = GameConfig::from_json_str(r#"{ "seed": 7 }"#).unwrap();
    assert_eq!(cfg.enemy_count, 5);
    assert_eq!(cfg.frame_ms, 16);
    assert_eq!(cfg.seed, Some(7));
}

#[test]
fn full_config_parses() {
    let cfg =
        GameConfig::from_json_str(r#"{ "enemy_count": 3, "frame_ms": 33, "seed": null }"#)
            .unwrap();
    assert_eq!(cfg.enemy_count, 3);
    assert_eq!(cfg.frame_ms, 33);
    assert_eq!(cfg.seed, None);
}

#[test]
fn zero_enemies_rejected() {
    let err = GameConfig::from_json_str(r#"{ "enemy_count": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn too_many_enemies_rejected() {
    let cfg = GameConfig {
        enemy_count: MAX_ENEMIES + 1,
        ..GameConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn zero_frame_time_rejected() {
    let err = GameConfig::from_json_str(r#"{ "frame_ms": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = GameConfig::from_json_str("{ enemy_count: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "enemy_count": 8, "seed": 42 }}"#).unwrap();

    let cfg = GameConfig::load(file.path()).unwrap();
    assert_eq!(cfg.enemy_count, 8);
    assert_eq!(cfg.seed, Some(42));
}

#[test]
fn load_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::load(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
