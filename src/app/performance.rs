#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use std::fs;

use crate::{cli::PerformanceArg, ui::color::ColorCapability, ui::renderer::RenderQuality};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PerformanceTier {
    Low,
    Medium,
    High,
}

impl PerformanceTier {
    pub fn label(self) -> &'static str {
        match self {
            PerformanceTier::High => "high",
            PerformanceTier::Medium => "medium",
            PerformanceTier::Low => "low",
        }
    }

    /// Cycling order for the tier key: high, medium, low, high, ...
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            PerformanceTier::High => PerformanceTier::Medium,
            PerformanceTier::Medium => PerformanceTier::Low,
            PerformanceTier::Low => PerformanceTier::High,
        }
    }

    #[must_use]
    pub fn downgraded(self) -> Self {
        match self {
            PerformanceTier::High => PerformanceTier::Medium,
            PerformanceTier::Medium | PerformanceTier::Low => PerformanceTier::Low,
        }
    }

    pub fn from_arg(arg: PerformanceArg) -> Option<Self> {
        match arg {
            PerformanceArg::Auto => None,
            PerformanceArg::High => Some(PerformanceTier::High),
            PerformanceArg::Medium => Some(PerformanceTier::Medium),
            PerformanceArg::Low => Some(PerformanceTier::Low),
        }
    }

    pub fn config(self) -> PerformanceConfig {
        match self {
            PerformanceTier::High => PerformanceConfig {
                particle_multiplier: 1.0,
                transition_secs: 0.8,
                aurora: true,
                effects: true,
            },
            PerformanceTier::Medium => PerformanceConfig {
                particle_multiplier: 0.6,
                transition_secs: 0.6,
                aurora: true,
                effects: true,
            },
            PerformanceTier::Low => PerformanceConfig {
                particle_multiplier: 0.3,
                transition_secs: 0.4,
                aurora: false,
                effects: false,
            },
        }
    }

    pub fn render_quality(self) -> RenderQuality {
        let config = self.config();
        RenderQuality {
            dither: self == PerformanceTier::High,
            effects: config.effects,
            aurora_ribbons: match (config.aurora, self) {
                (false, _) => 0,
                (true, PerformanceTier::High) => 3,
                (true, _) => 2,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceConfig {
    pub particle_multiplier: f32,
    /// Crossfade length when the visual state changes.
    pub transition_secs: f32,
    pub aurora: bool,
    pub effects: bool,
}

/// Host facts the tier heuristic looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceProfile {
    pub cores: usize,
    pub memory_gib: Option<f32>,
    pub surface_pixels: usize,
    pub color: ColorCapability,
}

pub trait DeviceProfiler {
    fn profile(&self) -> DeviceProfile;
}

/// Reads the running machine: parallelism, `/proc/meminfo`, terminal size and
/// colour depth.
#[derive(Debug, Clone, Copy)]
pub struct SystemProfiler {
    pub color: ColorCapability,
    pub surface_pixels: usize,
}

impl DeviceProfiler for SystemProfiler {
    fn profile(&self) -> DeviceProfile {
        DeviceProfile {
            cores: std::thread::available_parallelism().map_or(2, std::num::NonZeroUsize::get),
            memory_gib: read_meminfo_gib(),
            surface_pixels: self.surface_pixels,
            color: self.color,
        }
    }
}

fn read_meminfo_gib() -> Option<f32> {
    let content = fs::read_to_string("/proc/meminfo").ok()?;
    parse_meminfo_gib(&content)
}

fn parse_meminfo_gib(content: &str) -> Option<f32> {
    let line = content.lines().find(|line| line.starts_with("MemTotal:"))?;
    let kib: f64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some((kib / (1024.0 * 1024.0)) as f32)
}

#[must_use]
pub fn device_score(profile: &DeviceProfile) -> u32 {
    // Terminals run on desktops.
    let device = 2;
    let cores = match profile.cores {
        n if n >= 8 => 3,
        n if n >= 4 => 2,
        _ => 1,
    };
    let memory = match profile.memory_gib {
        Some(gib) if gib >= 8.0 => 3,
        Some(gib) if gib >= 4.0 => 2,
        Some(_) => 1,
        None => 2,
    };
    let pixels = match profile.surface_pixels {
        n if n >= 3840 * 2160 => 2,
        n if n >= 1920 * 1080 => 1,
        _ => 0,
    };
    let color = match profile.color {
        ColorCapability::TrueColor => 2,
        ColorCapability::Xterm256 => 1,
        ColorCapability::Basic16 => 0,
    };
    device + cores + memory + pixels + color
}

#[must_use]
pub fn tier_for_score(score: u32) -> PerformanceTier {
    if score >= 10 {
        PerformanceTier::High
    } else if score >= 6 {
        PerformanceTier::Medium
    } else {
        PerformanceTier::Low
    }
}

pub fn detect_tier(profiler: &impl DeviceProfiler) -> PerformanceTier {
    let profile = profiler.profile();
    let score = device_score(&profile);
    let tier = tier_for_score(score);
    log::debug!("device score {score} ({profile:?}) -> {} tier", tier.label());
    tier
}

const MEASURE_WINDOW_SECS: f32 = 1.0;
const MAX_MEASURED_FRAMES: u32 = 120;

/// Measures the frame rate over the first second of animation and suggests a
/// single downgrade when the host cannot keep up.
#[derive(Debug, Clone)]
pub struct FrameRateMonitor {
    target_fps: f32,
    elapsed: f32,
    frames: u32,
    done: bool,
}

impl FrameRateMonitor {
    pub fn new(target_fps: u8) -> Self {
        Self {
            target_fps: f32::from(target_fps.max(1)),
            elapsed: 0.0,
            frames: 0,
            done: false,
        }
    }

    /// A monitor that never measures, for explicitly chosen tiers.
    pub fn disabled() -> Self {
        Self {
            done: true,
            ..Self::new(30)
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feeds one frame interval. Returns the downgraded tier once, if one is due.
    pub fn record(&mut self, dt: f32, current: PerformanceTier) -> Option<PerformanceTier> {
        if self.done || !dt.is_finite() || dt < 0.0 {
            return None;
        }
        self.elapsed += dt;
        self.frames += 1;
        if self.elapsed < MEASURE_WINDOW_SECS {
            if self.frames >= MAX_MEASURED_FRAMES {
                self.done = true;
            }
            return None;
        }
        self.done = true;
        let fps = self.frames as f32 / self.elapsed;
        let verdict = self.verdict(fps, current);
        if let Some(tier) = verdict {
            log::info!(
                "measured {fps:.1} fps against a {:.0} fps target, dropping to {} tier",
                self.target_fps,
                tier.label()
            );
        }
        verdict
    }

    /// High needs half the target rate and medium a third, which at a 60 fps
    /// target are the 30 and 20 fps floors.
    fn verdict(&self, fps: f32, current: PerformanceTier) -> Option<PerformanceTier> {
        match current {
            PerformanceTier::High if fps < self.target_fps * 0.5 => Some(PerformanceTier::Medium),
            PerformanceTier::Medium if fps < self.target_fps / 3.0 => Some(PerformanceTier::Low),
            _ => None,
        }
    }
}
