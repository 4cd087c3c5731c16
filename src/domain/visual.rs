use serde::{Deserialize, Serialize};

mod table;

pub use table::{VisualStateTable, clear_night, sunny_day};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB`
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub color: Rgb,
    pub alpha: f32,
}

impl Rgba {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self {
            color: Rgb::new(r, g, b),
            alpha,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: Rgb,
    pub opacity: f32,
    /// Percent along the gradient line, 0..=100.
    pub position: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleType {
    Rain,
    Snow,
    Dust,
    Fog,
    Stars,
}

impl ParticleType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ParticleType::Rain => "rain",
            ParticleType::Snow => "snow",
            ParticleType::Dust => "dust",
            ParticleType::Fog => "fog",
            ParticleType::Stars => "stars",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Swaps inverted bounds and replaces non-finite ones with zero.
    #[must_use]
    pub fn ordered(self) -> Self {
        let min = finite_or_zero(self.min);
        let max = finite_or_zero(self.max);
        if min > max {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    #[must_use]
    pub fn clamped(self, lo: f32, hi: f32) -> Self {
        let ordered = self.ordered();
        Self {
            min: ordered.min.clamp(lo, hi),
            max: ordered.max.clamp(lo, hi),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleSpec {
    pub kind: ParticleType,
    /// Signed so malformed configuration can be represented and clamped.
    pub count: i32,
    pub speed: f32,
    pub size: ValueRange,
    pub opacity: ValueRange,
    /// Degrees from vertical; rain only.
    pub angle: Option<f32>,
    pub sway: bool,
    pub twinkle: bool,
}

pub const DEFAULT_RAIN_ANGLE_DEG: f32 = 75.0;

impl ParticleSpec {
    /// Copy with every bound forced into a usable range. Never fails.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            kind: self.kind,
            count: self.count.max(0),
            speed: finite_or_zero(self.speed).abs(),
            size: self.size.clamped(0.0, f32::MAX),
            opacity: self.opacity.clamped(0.0, 1.0),
            angle: self.angle.filter(|deg| deg.is_finite()),
            sway: self.sway,
            twinkle: self.twinkle,
        }
    }

    #[must_use]
    pub fn angle_deg(&self) -> f32 {
        self.angle.unwrap_or(DEFAULT_RAIN_ANGLE_DEG)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuroraSpec {
    pub colors: Vec<Rgb>,
    pub intensity: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    pub key: String,
    pub name: String,
    pub gradient: Vec<GradientStop>,
    pub particles: ParticleSpec,
    pub aurora: Option<AuroraSpec>,
    pub overlay: Option<Rgba>,
    pub animation_speed: f32,
    pub pulse_effect: bool,
    pub blur_effect: bool,
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests;
