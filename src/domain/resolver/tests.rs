use chrono::TimeZone;

use super::*;
use crate::domain::weather::{ObservationDetails, code_for_category};

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 12, 12, 0, 0).unwrap()
}

fn observation(code: u16, ts: i64, sunrise: Option<i64>, sunset: Option<i64>) -> WeatherObservation {
    WeatherObservation {
        condition_code: code,
        timestamp_utc: Some(ts),
        sunrise_utc: sunrise,
        sunset_utc: sunset,
        details: ObservationDetails::default(),
    }
}

#[test]
fn non_sunny_keys_follow_category_and_time_of_day() {
    let resolver = WeatherResolver::builtin();
    for category in WeatherCategory::ALL {
        if category == WeatherCategory::Sunny {
            continue;
        }
        for is_night in [false, true] {
            let resolved = resolver.resolve_manual_at(ManualSelection { category, is_night }, noon());
            let suffix = if is_night { "night" } else { "day" };
            assert_eq!(resolved.state_key, format!("{}_{suffix}", category.as_str()));
            assert_eq!(resolved.state.key, resolved.state_key);
            assert!(!resolved.fell_back);
        }
    }
}

#[test]
fn sunny_resolves_to_sunny_day_and_clear_night() {
    let resolver = WeatherResolver::builtin();
    let day = resolver.resolve_manual_at(
        ManualSelection {
            category: WeatherCategory::Sunny,
            is_night: false,
        },
        noon(),
    );
    assert_eq!(day.state_key, "sunny_day");
    assert!(!day.is_night);

    let night = resolver.resolve_manual_at(
        ManualSelection {
            category: WeatherCategory::Sunny,
            is_night: true,
        },
        noon(),
    );
    assert_eq!(night.state_key, "clear_night");
    assert!(night.is_night);
    assert_eq!(night.state.name, "Clear Night");
}

#[test]
fn sun_times_decide_day_and_night_at_the_boundaries() {
    let resolver = WeatherResolver::builtin();
    let sunrise = 1_000_000;
    let sunset = 1_040_000;
    let at = |ts| observation(500, ts, Some(sunrise), Some(sunset));

    assert!(resolver.is_night(&at(sunrise - 1), noon(), 12));
    assert!(!resolver.is_night(&at(sunrise), noon(), 12));
    assert!(!resolver.is_night(&at(sunrise + 1), noon(), 0));
    assert!(!resolver.is_night(&at(sunset - 1), noon(), 0));
    assert!(resolver.is_night(&at(sunset), noon(), 12));
    assert!(resolver.is_night(&at(sunset + 3600), noon(), 12));
}

#[test]
fn missing_sun_times_fall_back_to_local_hour() {
    let resolver = WeatherResolver::builtin();
    let obs = observation(800, noon().timestamp(), None, Some(1));
    assert!(resolver.is_night(&obs, noon(), 5));
    assert!(!resolver.is_night(&obs, noon(), 6));
    assert!(!resolver.is_night(&obs, noon(), 17));
    assert!(resolver.is_night(&obs, noon(), 18));
}

#[test]
fn custom_time_window_moves_the_hour_fallback() {
    let resolver = WeatherResolver::builtin().with_time_config(TimeConfig {
        day_start_hour: 8,
        day_end_hour: 20,
    });
    let obs = observation(800, noon().timestamp(), None, None);
    assert!(resolver.is_night(&obs, noon(), 7));
    assert!(!resolver.is_night(&obs, noon(), 19));
}

#[test]
fn observation_code_selects_the_category() {
    let resolver = WeatherResolver::builtin();
    let ts = noon().timestamp();
    let resolved = resolver.resolve_at(&observation(602, ts, Some(ts - 10), Some(ts + 10)), noon(), 12);
    assert_eq!(resolved.state_key, "snow_day");
    assert_eq!(resolved.category, WeatherCategory::Snow);

    let resolved = resolver.resolve_at(&observation(211, ts, Some(ts - 10), Some(ts - 5)), noon(), 12);
    assert_eq!(resolved.state_key, "storm_night");
    assert!(resolved.state.pulse_effect);
}

#[test]
fn missing_state_falls_back_without_failing() {
    let table = VisualStateTable::new(vec![sunny_day()]);
    let resolver = WeatherResolver::new(&table);

    let resolved = resolver.resolve_manual_at(
        ManualSelection {
            category: WeatherCategory::Fog,
            is_night: false,
        },
        noon(),
    );
    assert_eq!(resolved.state_key, "fog_day");
    assert!(resolved.fell_back);
    assert_eq!(resolved.state.key, "sunny_day");

    let resolved = resolver.resolve_manual_at(
        ManualSelection {
            category: WeatherCategory::Rain,
            is_night: true,
        },
        noon(),
    );
    assert!(resolved.fell_back);
    assert_eq!(resolved.state.key, "clear_night");
}

#[test]
fn manual_request_round_trips_through_state_request() {
    let resolver = WeatherResolver::builtin();
    let resolved = resolver.resolve_visual_state(&StateRequest::Manual(ManualSelection {
        category: WeatherCategory::Storm,
        is_night: true,
    }));
    assert_eq!(resolved.state_key, "storm_night");
    assert_eq!(
        resolved.observation.condition_code,
        code_for_category(WeatherCategory::Storm)
    );
}

#[test]
fn manual_observation_resolves_consistently_with_its_pinned_sun_times() {
    let resolver = WeatherResolver::builtin();
    for is_night in [false, true] {
        let resolved = resolver.resolve_manual_at(
            ManualSelection {
                category: WeatherCategory::Cloudy,
                is_night,
            },
            noon(),
        );
        let hour_that_disagrees = if is_night { 12 } else { 2 };
        assert_eq!(
            resolver.is_night(&resolved.observation, noon(), hour_that_disagrees),
            is_night
        );
    }
}
