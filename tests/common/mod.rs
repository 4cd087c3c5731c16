#![allow(dead_code)]

use weather_backdrop::{
    app::{settings::RuntimeSettings, state::AppState},
    cli::{Cli, PerformanceArg},
};

pub fn stockholm_cli() -> Cli {
    Cli {
        weather: None,
        night: false,
        performance: PerformanceArg::High,
        fps: 30,
        seed: Some(11),
        no_animation: false,
        no_flash: true,
        lat: Some(59.3293),
        lon: Some(18.0686),
        api_key: None,
        weather_url: None,
        refresh_interval: 600,
        log_file: None,
        snapshot: None,
        width: 320,
        height: 180,
        one_shot: false,
    }
}

/// CLI pointed at a mock OpenWeatherMap endpoint.
pub fn mocked_cli(base_url: &str) -> Cli {
    Cli {
        api_key: Some("test-key".to_string()),
        weather_url: Some(format!("{base_url}/data/2.5/weather")),
        ..stockholm_cli()
    }
}

pub fn state_for(cli: &Cli) -> AppState {
    AppState::new(cli, RuntimeSettings::from_cli_defaults(cli))
}

/// Daytime payload: `dt` sits between sunrise and sunset.
pub fn weather_body(code: u16) -> String {
    format!(
        r#"{{
            "weather": [{{"id": {code}, "main": "x", "description": "fixture"}}],
            "main": {{"temp": 4.5, "humidity": 81}},
            "wind": {{"speed": 5.1}},
            "clouds": {{"all": 75}},
            "dt": 1770890400,
            "sys": {{"sunrise": 1770876000, "sunset": 1770912000}},
            "name": "Stockholm"
        }}"#
    )
}

/// Night payload: `dt` is after sunset.
pub fn night_weather_body(code: u16) -> String {
    weather_body(code).replace("\"dt\": 1770890400", "\"dt\": 1770920000")
}
