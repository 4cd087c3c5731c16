use std::fs;

use tempfile::TempDir;

use super::{RuntimeSettings, load_runtime_settings_from};
use crate::{cli::PerformanceArg, domain::resolver::TimeConfig, test_support::test_cli};

fn write_settings(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("settings.json");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn from_cli_defaults_maps_flags() {
    let mut cli = test_cli();
    cli.no_animation = true;
    cli.refresh_interval = 120;
    cli.api_key = Some("key".to_string());

    let settings = RuntimeSettings::from_cli_defaults(&cli);
    assert!(settings.no_animation);
    assert!(settings.no_flash);
    assert_eq!(settings.refresh_interval_secs, 120);
    assert_eq!(settings.performance, PerformanceArg::High);
    assert_eq!(settings.api_key.as_deref(), Some("key"));
    let location = settings.location.unwrap();
    assert!((location.latitude - 59.3293).abs() < 1e-9);
}

#[test]
fn missing_file_keeps_cli_values() {
    let dir = TempDir::new().unwrap();
    let settings = load_runtime_settings_from(&test_cli(), Some(&dir.path().join("nope.json")));
    assert_eq!(settings, RuntimeSettings::from_cli_defaults(&test_cli()));
}

#[test]
fn file_values_fill_in_where_cli_is_default() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(
        &dir,
        r#"{
            "performance": "low",
            "fps": 45,
            "refresh_interval_secs": 900,
            "api_key": "from-file",
            "location": {"name": "Oslo", "latitude": 59.91, "longitude": 10.75},
            "day_start_hour": 7,
            "day_end_hour": 19
        }"#,
    );
    let mut cli = test_cli();
    cli.performance = PerformanceArg::Auto;
    cli.lat = None;
    cli.lon = None;
    cli.no_flash = false;

    let settings = load_runtime_settings_from(&cli, Some(&path));
    assert_eq!(settings.performance, PerformanceArg::Low);
    assert_eq!(settings.fps, 45);
    assert_eq!(settings.refresh_interval_secs, 900);
    assert_eq!(settings.api_key.as_deref(), Some("from-file"));
    assert_eq!(settings.location.as_ref().unwrap().name, "Oslo");
    assert!(!settings.no_flash);
    assert_eq!(
        settings.time_config(),
        TimeConfig {
            day_start_hour: 7,
            day_end_hour: 19
        }
    );
}

#[test]
fn explicit_cli_flags_win_over_file() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(&dir, r#"{"performance": "low", "fps": 45, "no_flash": false}"#);
    let mut cli = test_cli();
    cli.fps = 20;

    let settings = load_runtime_settings_from(&cli, Some(&path));
    assert_eq!(settings.performance, PerformanceArg::High);
    assert_eq!(settings.fps, 20);
    assert!(settings.no_flash);
    assert_eq!(settings.location.unwrap().name, "59.3293, 18.0686");
}

#[test]
fn malformed_file_is_ignored() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(&dir, "{ not json");
    let settings = load_runtime_settings_from(&test_cli(), Some(&path));
    assert_eq!(settings, RuntimeSettings::from_cli_defaults(&test_cli()));
}

#[test]
fn file_values_are_clamped() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(
        &dir,
        r#"{"fps": 240, "refresh_interval_secs": 5, "api_key": "  ", "day_start_hour": 20, "day_end_hour": 4}"#,
    );
    let mut cli = test_cli();
    cli.performance = PerformanceArg::Auto;
    let settings = load_runtime_settings_from(&cli, Some(&path));
    assert_eq!(settings.fps, 60);
    assert_eq!(settings.refresh_interval_secs(), 60);
    assert_eq!(settings.api_key, None);
    assert_eq!(settings.time_config(), TimeConfig::default());
}
