#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::domain::weather::WeatherCategory;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum WeatherArg {
    Sunny,
    Cloudy,
    Rain,
    Storm,
    Snow,
    Fog,
}

impl From<WeatherArg> for WeatherCategory {
    fn from(arg: WeatherArg) -> Self {
        match arg {
            WeatherArg::Sunny => WeatherCategory::Sunny,
            WeatherArg::Cloudy => WeatherCategory::Cloudy,
            WeatherArg::Rain => WeatherCategory::Rain,
            WeatherArg::Storm => WeatherCategory::Storm,
            WeatherArg::Snow => WeatherCategory::Snow,
            WeatherArg::Fog => WeatherCategory::Fog,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceArg {
    #[default]
    Auto,
    High,
    Medium,
    Low,
}

pub const DEFAULT_FPS: u8 = 30;
pub const DEFAULT_REFRESH_SECS: u64 = 600;

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser, Clone)]
#[command(
    name = "weather-backdrop",
    version,
    about = "Animated weather-driven background for the terminal"
)]
pub struct Cli {
    /// Pin the scene to a weather category instead of live data
    #[arg(long, value_enum)]
    pub weather: Option<WeatherArg>,

    /// Night variant of the pinned weather
    #[arg(long, requires = "weather")]
    pub night: bool,

    /// Performance tier (auto profiles the host)
    #[arg(long, value_enum, default_value_t = PerformanceArg::Auto)]
    pub performance: PerformanceArg,

    /// Target FPS (15..60)
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u8).range(15..=60))]
    pub fps: u8,

    /// Seed for particle placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Freeze the animation clock
    #[arg(long)]
    pub no_animation: bool,

    /// Disable storm flashes
    #[arg(long)]
    pub no_flash: bool,

    /// Latitude (requires --lon)
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude (requires --lat)
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the current-weather endpoint
    #[arg(long)]
    pub weather_url: Option<String>,

    /// Refresh interval in seconds
    #[arg(long, default_value_t = DEFAULT_REFRESH_SECS)]
    pub refresh_interval: u64,

    /// Write logs to this file (the interactive UI logs nowhere otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Render one frame to a PNG and exit
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Snapshot width in pixels
    #[arg(long, default_value_t = 1280, requires = "snapshot")]
    pub width: u32,

    /// Snapshot height in pixels
    #[arg(long, default_value_t = 720, requires = "snapshot")]
    pub height: u32,

    /// Print the resolved state and exit (non-interactive)
    #[arg(long, conflicts_with = "snapshot")]
    pub one_shot: bool,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            (Some(lat), Some(lon)) if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) => {
                anyhow::bail!("coordinates out of range: {lat}, {lon}")
            }
            _ => {}
        }
        if self.snapshot.is_some() && (self.width == 0 || self.height == 0) {
            anyhow::bail!("snapshot size must be non-zero");
        }
        Ok(())
    }

    /// Headless runs log to stderr; the interactive UI owns the terminal.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.snapshot.is_none() && !self.one_shot
    }

    /// API key, ignoring empty values.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }
}
