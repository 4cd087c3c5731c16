use chrono::{DateTime, TimeZone, Utc};

use crate::{
    cli::{Cli, PerformanceArg},
    domain::weather::{ObservationDetails, WeatherObservation},
};

/// Offline CLI: fixed coordinates, no API key, deterministic particles.
pub(crate) fn test_cli() -> Cli {
    Cli {
        weather: None,
        night: false,
        performance: PerformanceArg::High,
        fps: 30,
        seed: Some(7),
        no_animation: false,
        no_flash: true,
        lat: Some(59.3293),
        lon: Some(18.0686),
        api_key: None,
        weather_url: None,
        refresh_interval: 600,
        log_file: None,
        snapshot: None,
        width: 1280,
        height: 720,
        one_shot: false,
    }
}

pub(crate) fn noon_utc() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 12, 12, 0, 0)
        .single()
        .expect("valid fixed time")
}

/// Daytime observation for `code`, with sun times bracketing `noon_utc`.
pub(crate) fn day_observation(code: u16) -> WeatherObservation {
    let ts = noon_utc().timestamp();
    WeatherObservation {
        condition_code: code,
        timestamp_utc: Some(ts),
        sunrise_utc: Some(ts - 6 * 3600),
        sunset_utc: Some(ts + 6 * 3600),
        details: ObservationDetails {
            description: "fixture".to_string(),
            city_name: Some("Stockholm".to_string()),
            ..ObservationDetails::default()
        },
    }
}
