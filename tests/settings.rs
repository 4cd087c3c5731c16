mod common;

use std::fs;

use common::stockholm_cli;
use tempfile::TempDir;
use weather_backdrop::{
    app::{
        performance::PerformanceTier,
        settings::load_runtime_settings_from,
        state::{AppState, WeatherMode},
    },
    cli::PerformanceArg,
};

#[test]
fn settings_file_drives_the_initial_state() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{
            "performance": "medium",
            "location": {"name": "Reykjavik", "latitude": 64.1466, "longitude": -21.9426},
            "no_animation": true
        }"#,
    )
    .unwrap();

    let mut cli = stockholm_cli();
    cli.performance = PerformanceArg::Auto;
    cli.lat = None;
    cli.lon = None;

    let settings = load_runtime_settings_from(&cli, Some(&path));
    let state = AppState::new(&cli, settings);
    assert_eq!(state.tier(), PerformanceTier::Medium);
    assert_eq!(state.mode, WeatherMode::Auto);
    assert_eq!(state.location.as_ref().map(|l| l.name.as_str()), Some("Reykjavik"));
    assert_eq!(
        state.observation.details.city_name.as_deref(),
        Some("Reykjavik")
    );
    assert!(!state.is_animating());
}

#[test]
fn unreadable_settings_fall_back_to_cli_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"performance": "turbo"}"#).unwrap();

    let settings = load_runtime_settings_from(&stockholm_cli(), Some(&path));
    assert_eq!(settings.performance, PerformanceArg::High);
    assert_eq!(settings.fps, 30);
}
