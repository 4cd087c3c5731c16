use super::*;

const EXPECTED_KEYS: [&str; 12] = [
    "sunny_day",
    "cloudy_day",
    "rain_day",
    "storm_day",
    "snow_day",
    "fog_day",
    "clear_night",
    "cloudy_night",
    "rain_night",
    "storm_night",
    "snow_night",
    "fog_night",
];

#[test]
fn builtin_table_holds_every_weather_and_time_combination() {
    let table = VisualStateTable::builtin();
    assert_eq!(table.len(), EXPECTED_KEYS.len());
    for key in EXPECTED_KEYS {
        let state = table.get(key).unwrap_or_else(|| panic!("missing {key}"));
        assert_eq!(state.key, key);
    }
    assert!(table.get("sunny_night").is_none());
}

#[test]
fn gradients_span_zero_to_hundred_in_order() {
    for state in VisualStateTable::builtin().iter() {
        let stops = &state.gradient;
        assert!(stops.len() >= 2, "{}", state.key);
        assert!((stops[0].position - 0.0).abs() < f32::EPSILON, "{}", state.key);
        assert!(
            (stops[stops.len() - 1].position - 100.0).abs() < f32::EPSILON,
            "{}",
            state.key
        );
        for pair in stops.windows(2) {
            assert!(pair[0].position <= pair[1].position, "{}", state.key);
        }
        for stop in stops {
            assert!((0.0..=1.0).contains(&stop.opacity));
        }
    }
}

#[test]
fn particle_specs_are_already_well_formed() {
    for state in VisualStateTable::builtin().iter() {
        assert_eq!(state.particles.sanitized(), state.particles, "{}", state.key);
        assert!(state.particles.speed > 0.0);
    }
}

#[test]
fn aurora_when_present_has_two_or_more_colors() {
    for state in VisualStateTable::builtin().iter() {
        if let Some(aurora) = &state.aurora {
            assert!(aurora.colors.len() >= 2, "{}", state.key);
            assert!((0.0..=1.0).contains(&aurora.intensity));
            assert!(aurora.speed > 0.0);
        }
    }
}

#[test]
fn only_clear_night_carries_an_aurora() {
    let with_aurora: Vec<&str> = VisualStateTable::builtin()
        .iter()
        .filter(|state| state.aurora.is_some())
        .map(|state| state.key.as_str())
        .collect();
    assert_eq!(with_aurora, ["clear_night"]);
}

#[test]
fn storm_states_pulse_and_fog_states_blur() {
    let table = VisualStateTable::builtin();
    assert!(table.get("storm_day").is_some_and(|s| s.pulse_effect));
    assert!(table.get("storm_night").is_some_and(|s| s.pulse_effect));
    assert!(table.get("fog_day").is_some_and(|s| s.blur_effect));
    assert!(table.get("rain_day").is_some_and(|s| !s.pulse_effect && !s.blur_effect));
}

#[test]
fn sanitized_clamps_negative_count_and_swaps_inverted_ranges() {
    let spec = ParticleSpec {
        kind: ParticleType::Snow,
        count: -12,
        speed: -0.5,
        size: ValueRange::new(5.0, 2.0),
        opacity: ValueRange::new(1.4, -0.2),
        angle: Some(f32::NAN),
        sway: true,
        twinkle: false,
    };
    let clean = spec.sanitized();
    assert_eq!(clean.count, 0);
    assert!((clean.speed - 0.5).abs() < f32::EPSILON);
    assert_eq!(clean.size, ValueRange::new(2.0, 5.0));
    assert_eq!(clean.opacity, ValueRange::new(0.0, 1.0));
    assert_eq!(clean.angle, None);
    assert!((clean.angle_deg() - DEFAULT_RAIN_ANGLE_DEG).abs() < f32::EPSILON);
}

#[test]
fn rgb_from_hex_splits_channels() {
    assert_eq!(Rgb::from_hex(0x1A237E), Rgb::new(0x1A, 0x23, 0x7E));
    assert_eq!(Rgb::from_hex(0xFFFFFF), Rgb::WHITE);
}
