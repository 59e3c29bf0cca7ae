//! Session config loading and validation.

use riverfarm_core::{FertilizerLevel, SessionConfig, SessionController};
use std::io::Write;

#[test]
fn partial_json_fills_defaults() {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = SessionConfig::from_json(r#"{ "yield_target": 2500.0 }"#).unwrap();
    assert_eq!(config.yield_target, 2500.0);
    assert_eq!(config.collapse_threshold, 10.0);
    assert_eq!(config.min_health_for_achievement, 40.0);
    assert_eq!(config.initial_river_health, 100.0);
    assert_eq!(config.initial_decisions.fertilizer_level, FertilizerLevel::Medium);
}

#[test]
fn out_of_range_values_are_rejected_when_building_a_session() {
    let bad = [
        r#"{ "initial_river_health": 101.0 }"#,
        r#"{ "initial_river_health": -3.0 }"#,
        r#"{ "yield_target": -1.0 }"#,
    ];
    for json in bad {
        // Parsing only reads the file; range checks happen once, in with_config.
        let config = SessionConfig::from_json(json).unwrap();
        assert!(config.validate().is_err(), "{json}");
        assert!(SessionController::with_config(config).is_err(), "{json}");
    }
}

#[test]
fn unknown_decision_values_fail_to_parse() {
    let json = r#"{ "initial_decisions": { "fertilizer_level": "huge",
        "pest_management": "integrated", "buffer_present": true } }"#;
    assert!(SessionConfig::from_json(json).is_err());
}

#[test]
fn inverted_thresholds_build_a_session() {
    let json = r#"{ "collapse_threshold": 20.0, "min_health_for_achievement": 15.0 }"#;
    let config = SessionConfig::from_json(json).unwrap();
    let session = SessionController::with_config(config).unwrap();
    assert_eq!(session.config().collapse_threshold, 20.0);
}

#[test]
fn load_reads_file_and_reports_missing_path() {
    let name = format!("riverfarm-config-{}.json", std::process::id());
    let path = std::env::temp_dir().join(name);
    {
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, r#"{{ "collapse_threshold": 20.0 }}"#).unwrap();
    }
    let config = SessionConfig::load(path.to_str().unwrap()).unwrap();
    assert_eq!(config.collapse_threshold, 20.0);
    std::fs::remove_file(&path).unwrap();

    let err = SessionConfig::load("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("Cannot read"), "{err}");
}

#[test]
fn shipped_config_matches_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/session.json");
    let config = SessionConfig::load(path).unwrap();
    assert_eq!(config, SessionConfig::default());
}
