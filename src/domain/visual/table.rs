use std::sync::LazyLock;

use super::{
    AuroraSpec, GradientStop, ParticleSpec, ParticleType, Rgb, Rgba, ValueRange, VisualState,
};

#[derive(Debug, Clone, Default)]
pub struct VisualStateTable {
    states: Vec<VisualState>,
}

static BUILTIN: LazyLock<VisualStateTable> = LazyLock::new(|| {
    VisualStateTable::new(vec![
        sunny_day(),
        cloudy_day(),
        rain_day(),
        storm_day(),
        snow_day(),
        fog_day(),
        clear_night(),
        cloudy_night(),
        rain_night(),
        storm_night(),
        snow_night(),
        fog_night(),
    ])
});

impl VisualStateTable {
    pub fn new(states: Vec<VisualState>) -> Self {
        Self { states }
    }

    pub fn builtin() -> &'static VisualStateTable {
        &BUILTIN
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&VisualState> {
        self.states.iter().find(|state| state.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|state| state.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisualState> {
        self.states.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

fn stops(entries: &[(u32, f32)]) -> Vec<GradientStop> {
    entries
        .iter()
        .map(|&(hex, position)| GradientStop {
            color: Rgb::from_hex(hex),
            opacity: 1.0,
            position,
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn particles(
    kind: ParticleType,
    count: i32,
    speed: f32,
    size: (f32, f32),
    opacity: (f32, f32),
    angle: Option<f32>,
    sway: bool,
    twinkle: bool,
) -> ParticleSpec {
    ParticleSpec {
        kind,
        count,
        speed,
        size: ValueRange::new(size.0, size.1),
        opacity: ValueRange::new(opacity.0, opacity.1),
        angle,
        sway,
        twinkle,
    }
}

fn state(
    key: &str,
    name: &str,
    gradient: Vec<GradientStop>,
    particles: ParticleSpec,
    overlay: Option<Rgba>,
    animation_speed: f32,
) -> VisualState {
    VisualState {
        key: key.to_string(),
        name: name.to_string(),
        gradient,
        particles,
        aurora: None,
        overlay,
        animation_speed,
        pulse_effect: false,
        blur_effect: false,
    }
}

pub fn sunny_day() -> VisualState {
    state(
        "sunny_day",
        "Sunny Day",
        stops(&[
            (0xFFE082, 0.0),
            (0xFFDD70, 11.0),
            (0xFFDA5E, 22.0),
            (0xFFD54F, 33.0),
            (0xFFC73D, 44.0),
            (0xFFB831, 55.0),
            (0xFFA726, 66.0),
            (0xFF9135, 77.0),
            (0xFF813C, 88.0),
            (0xFF7043, 100.0),
        ]),
        particles(ParticleType::Dust, 30, 0.3, (1.0, 3.0), (0.2, 0.5), None, false, false),
        Some(Rgba::new(255, 255, 255, 0.1)),
        0.5,
    )
}

fn cloudy_day() -> VisualState {
    state(
        "cloudy_day",
        "Cloudy Day",
        stops(&[
            (0xB8C5CC, 0.0),
            (0xB0BEC5, 12.0),
            (0xA8B6BE, 24.0),
            (0xA0AEB7, 36.0),
            (0x98A6B0, 48.0),
            (0x909EA9, 60.0),
            (0x8896A2, 72.0),
            (0x808E9B, 84.0),
            (0x708491, 92.0),
            (0x607D8B, 100.0),
        ]),
        particles(ParticleType::Dust, 20, 0.4, (2.0, 4.0), (0.1, 0.3), None, false, false),
        None,
        0.6,
    )
}

fn rain_day() -> VisualState {
    state(
        "rain_day",
        "Rainy Day",
        stops(&[
            (0x546E7A, 0.0),
            (0x50696F, 12.0),
            (0x4C6469, 25.0),
            (0x475F64, 37.0),
            (0x42595E, 50.0),
            (0x3D5258, 62.0),
            (0x374D53, 75.0),
            (0x31444A, 87.0),
            (0x263238, 100.0),
        ]),
        particles(ParticleType::Rain, 100, 2.5, (1.0, 2.0), (0.3, 0.6), Some(75.0), false, false),
        Some(Rgba::new(100, 120, 140, 0.2)),
        1.2,
    )
}

fn storm_day() -> VisualState {
    VisualState {
        pulse_effect: true,
        ..state(
            "storm_day",
            "Stormy Day",
            stops(&[
                (0x455A64, 0.0),
                (0x40545E, 11.0),
                (0x3B4E58, 22.0),
                (0x374852, 33.0),
                (0x32424C, 44.0),
                (0x2D3C46, 55.0),
                (0x293640, 66.0),
                (0x24303A, 77.0),
                (0x202A34, 88.0),
                (0x1C2833, 100.0),
            ]),
            particles(ParticleType::Rain, 150, 3.5, (1.0, 3.0), (0.4, 0.7), Some(70.0), false, false),
            Some(Rgba::new(70, 80, 90, 0.3)),
            2.0,
        )
    }
}

fn snow_day() -> VisualState {
    state(
        "snow_day",
        "Snowy Day",
        stops(&[
            (0xCFD8DC, 0.0),
            (0xC7D2D7, 11.0),
            (0xBFCCD2, 22.0),
            (0xB7C6CD, 33.0),
            (0xAFC0C8, 44.0),
            (0xA0B2BC, 55.0),
            (0x98ACB6, 66.0),
            (0x8FA6B0, 77.0),
            (0x87A0AA, 88.0),
            (0x78909C, 100.0),
        ]),
        particles(ParticleType::Snow, 80, 0.8, (2.0, 5.0), (0.4, 0.8), None, true, false),
        Some(Rgba::new(255, 255, 255, 0.2)),
        0.7,
    )
}

fn fog_day() -> VisualState {
    VisualState {
        blur_effect: true,
        ..state(
            "fog_day",
            "Foggy Day",
            stops(&[
                (0xF2F5F7, 0.0),
                (0xECEFF1, 10.0),
                (0xE5E9EB, 20.0),
                (0xDFE3E6, 30.0),
                (0xD8DDE0, 40.0),
                (0xD2D7DA, 50.0),
                (0xC4CCD1, 60.0),
                (0xB8C1C7, 70.0),
                (0xACB6BD, 80.0),
                (0xA0ABB3, 90.0),
                (0x95A1AA, 100.0),
            ]),
            particles(ParticleType::Fog, 20, 0.15, (60.0, 120.0), (0.15, 0.35), None, false, false),
            None,
            0.3,
        )
    }
}

pub fn clear_night() -> VisualState {
    VisualState {
        aurora: Some(AuroraSpec {
            colors: vec![
                Rgb::new(102, 232, 242),
                Rgb::new(94, 214, 160),
                Rgb::new(150, 120, 255),
            ],
            intensity: 0.18,
            speed: 0.5,
        }),
        ..state(
            "clear_night",
            "Clear Night",
            stops(&[
                (0x1A237E, 0.0),
                (0x1E2885, 11.0),
                (0x232D8B, 22.0),
                (0x283593, 33.0),
                (0x2C3996, 44.0),
                (0x2E3C99, 55.0),
                (0x303F9F, 66.0),
                (0x3442A3, 77.0),
                (0x3745A7, 88.0),
                (0x3949AB, 100.0),
            ]),
            particles(ParticleType::Stars, 100, 0.1, (1.0, 2.0), (0.3, 0.9), None, false, true),
            Some(Rgba::new(26, 35, 126, 0.2)),
            0.4,
        )
    }
}

fn cloudy_night() -> VisualState {
    state(
        "cloudy_night",
        "Cloudy Night",
        stops(&[
            (0x2D3A41, 0.0),
            (0x374650, 15.0),
            (0x3F4F58, 25.0),
            (0x455A64, 35.0),
            (0x4D6169, 45.0),
            (0x546E7A, 55.0),
            (0x5C7580, 65.0),
            (0x657D87, 75.0),
            (0x6E858F, 85.0),
            (0x778D96, 95.0),
            (0x7A919A, 100.0),
        ]),
        particles(ParticleType::Dust, 15, 0.3, (2.0, 4.0), (0.1, 0.2), None, false, false),
        None,
        0.5,
    )
}

fn rain_night() -> VisualState {
    state(
        "rain_night",
        "Rainy Night",
        stops(&[
            (0x263238, 0.0),
            (0x2B383F, 12.0),
            (0x313F46, 25.0),
            (0x36454D, 37.0),
            (0x3C4C54, 50.0),
            (0x41525A, 62.0),
            (0x47585F, 75.0),
            (0x4D616A, 87.0),
            (0x546E7A, 100.0),
        ]),
        particles(ParticleType::Rain, 100, 2.5, (1.0, 2.0), (0.3, 0.6), Some(75.0), false, false),
        Some(Rgba::new(38, 50, 56, 0.4)),
        1.2,
    )
}

fn storm_night() -> VisualState {
    VisualState {
        pulse_effect: true,
        ..state(
            "storm_night",
            "Stormy Night",
            stops(&[
                (0x1C2833, 0.0),
                (0x1F2B35, 11.0),
                (0x232E38, 22.0),
                (0x27323C, 33.0),
                (0x2B3742, 44.0),
                (0x303D48, 55.0),
                (0x36454D, 66.0),
                (0x3C4D56, 77.0),
                (0x41535D, 88.0),
                (0x455A64, 100.0),
            ]),
            particles(ParticleType::Rain, 150, 3.5, (1.0, 3.0), (0.4, 0.7), Some(70.0), false, false),
            Some(Rgba::new(28, 40, 51, 0.5)),
            2.0,
        )
    }
}

fn snow_night() -> VisualState {
    state(
        "snow_night",
        "Snowy Night",
        stops(&[
            (0x455A64, 0.0),
            (0x4A6169, 11.0),
            (0x4F676F, 22.0),
            (0x546E7A, 33.0),
            (0x5A7480, 44.0),
            (0x5F7A85, 55.0),
            (0x657E88, 66.0),
            (0x6B858F, 77.0),
            (0x728B96, 88.0),
            (0x78909C, 100.0),
        ]),
        particles(ParticleType::Snow, 80, 0.8, (2.0, 5.0), (0.4, 0.8), None, true, false),
        Some(Rgba::new(69, 90, 100, 0.3)),
        0.7,
    )
}

fn fog_night() -> VisualState {
    VisualState {
        blur_effect: true,
        ..state(
            "fog_night",
            "Foggy Night",
            stops(&[
                (0x2F3C43, 0.0),
                (0x37474F, 12.0),
                (0x3F4F57, 24.0),
                (0x47575F, 36.0),
                (0x4F5F67, 48.0),
                (0x57676F, 60.0),
                (0x5F6F77, 72.0),
                (0x677781, 84.0),
                (0x6F7F89, 92.0),
                (0x758188, 100.0),
            ]),
            particles(ParticleType::Fog, 20, 0.15, (60.0, 120.0), (0.15, 0.35), None, false, false),
            None,
            0.3,
        )
    }
}
