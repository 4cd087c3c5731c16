use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    cli::{Cli, DEFAULT_FPS, DEFAULT_REFRESH_SECS, PerformanceArg},
    domain::{resolver::TimeConfig, weather::Location},
};

const MIN_REFRESH_SECS: u64 = 60;

/// Effective configuration: CLI defaults, overlaid by the optional settings
/// file, overlaid by explicit CLI flags. The file is only ever read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    pub performance: PerformanceArg,
    pub fps: u8,
    pub refresh_interval_secs: u64,
    pub no_animation: bool,
    pub no_flash: bool,
    /// Fixed location; IP lookup is used when absent.
    pub location: Option<Location>,
    pub api_key: Option<String>,
    pub weather_url: Option<String>,
    pub day_start_hour: u32,
    pub day_end_hour: u32,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        let time = TimeConfig::default();
        Self {
            performance: PerformanceArg::Auto,
            fps: DEFAULT_FPS,
            refresh_interval_secs: DEFAULT_REFRESH_SECS,
            no_animation: false,
            no_flash: false,
            location: None,
            api_key: None,
            weather_url: None,
            day_start_hour: time.day_start_hour,
            day_end_hour: time.day_end_hour,
        }
    }
}

impl RuntimeSettings {
    pub fn from_cli_defaults(cli: &Cli) -> Self {
        let mut settings = Self {
            performance: cli.performance,
            fps: cli.fps,
            refresh_interval_secs: cli.refresh_interval,
            no_animation: cli.no_animation,
            no_flash: cli.no_flash,
            api_key: cli.api_key().map(str::to_string),
            weather_url: cli.weather_url.clone(),
            ..Self::default()
        };
        if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
            settings.location = Some(Location::from_coords(lat, lon));
        }
        settings
    }

    pub fn time_config(&self) -> TimeConfig {
        if self.day_start_hour < self.day_end_hour && self.day_end_hour <= 24 {
            TimeConfig {
                day_start_hour: self.day_start_hour,
                day_end_hour: self.day_end_hour,
            }
        } else {
            log::warn!(
                "ignoring day window {}..{}, using defaults",
                self.day_start_hour,
                self.day_end_hour
            );
            TimeConfig::default()
        }
    }

    pub fn refresh_interval_secs(&self) -> u64 {
        self.refresh_interval_secs.max(MIN_REFRESH_SECS)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if cli.performance != PerformanceArg::Auto {
            self.performance = cli.performance;
        }
        if cli.fps != DEFAULT_FPS {
            self.fps = cli.fps;
        }
        if cli.refresh_interval != DEFAULT_REFRESH_SECS {
            self.refresh_interval_secs = cli.refresh_interval;
        }
        if cli.no_animation {
            self.no_animation = true;
        }
        if cli.no_flash {
            self.no_flash = true;
        }
        if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
            self.location = Some(Location::from_coords(lat, lon));
        }
        if let Some(key) = cli.api_key() {
            self.api_key = Some(key.to_string());
        }
        if let Some(url) = &cli.weather_url {
            self.weather_url = Some(url.clone());
        }
        self.fps = self.fps.clamp(15, 60);
        self.api_key = self.api_key.take().filter(|key| !key.trim().is_empty());
    }
}

pub fn load_runtime_settings(cli: &Cli) -> (RuntimeSettings, Option<PathBuf>) {
    let path = settings_path();
    let settings = load_runtime_settings_from(cli, path.as_deref());
    (settings, path)
}

/// Missing files are normal; unreadable or malformed ones are logged and skipped.
pub fn load_runtime_settings_from(cli: &Cli, path: Option<&Path>) -> RuntimeSettings {
    let mut settings = RuntimeSettings::from_cli_defaults(cli);
    if let Some(path) = path
        && path.exists()
    {
        match read_settings_file(path) {
            Ok(saved) => settings = saved,
            Err(err) => log::warn!("ignoring settings file: {err:#}"),
        }
    }
    settings.apply_cli_overrides(cli);
    settings
}

fn read_settings_file(path: &Path) -> anyhow::Result<RuntimeSettings> {
    use anyhow::Context;

    let content = fs::read_to_string(path)
        .with_context(|| format!("reading {} failed", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {} failed", path.display()))
}

pub fn settings_path() -> Option<PathBuf> {
    if let Some(base) = std::env::var_os("WEATHER_BACKDROP_CONFIG_DIR") {
        return Some(PathBuf::from(base).join("settings.json"));
    }

    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("weather-backdrop")
            .join("settings.json"),
    )
}

#[cfg(test)]
mod tests;
