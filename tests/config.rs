//! Config persistence tests

use std::time::Duration;

use caret::config::CaretConfig;
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = CaretConfig::default();
    assert_eq!(config.theme, "default-dark");
    assert_eq!(config.blink_interval_ms, 500);
    assert_eq!(config.font_path, None);
    assert!(config.blink_timer_config().blinks());
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = CaretConfig::load_from(&dir.path().join("config.yaml"));
    assert_eq!(config, CaretConfig::default());
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = CaretConfig {
        theme: "default-light".to_string(),
        blink_interval_ms: 300,
        font_path: Some("/tmp/font.ttf".into()),
        font_size: 18.0,
    };
    config.save_to(&path).unwrap();

    assert_eq!(CaretConfig::load_from(&path), config);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "blink_interval_ms: 0\n").unwrap();

    let config = CaretConfig::load_from(&path);
    assert_eq!(config.theme, "default-dark");
    assert_eq!(config.font_size, 14.0);
    assert!(!config.blink_timer_config().blinks());
}

#[test]
fn test_invalid_yaml_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "theme: [unclosed\n").unwrap();

    assert_eq!(CaretConfig::load_from(&path), CaretConfig::default());
}

#[test]
fn test_negative_interval_disables_blink() {
    let config = CaretConfig {
        blink_interval_ms: -250,
        ..CaretConfig::default()
    };
    assert!(!config.blink_timer_config().blinks());
}

#[test]
fn test_interval_maps_to_duration() {
    let config = CaretConfig {
        blink_interval_ms: 750,
        ..CaretConfig::default()
    };
    assert_eq!(
        config.blink_timer_config().interval,
        Duration::from_millis(750)
    );
}

#[test]
fn test_configured_font_tried_first() {
    let config = CaretConfig {
        font_path: Some("/fonts/mine.ttf".into()),
        ..CaretConfig::default()
    };
    let candidates = config.font_candidates();
    assert_eq!(candidates[0], std::path::PathBuf::from("/fonts/mine.ttf"));
    assert!(candidates.len() > 1);
}
