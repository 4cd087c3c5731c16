use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::{mpsc, watch};

use crate::{
    app::{
        events::{AppEvent, TaskHandle, schedule_retry, start_frame_task, start_refresh_task},
        performance::{FrameRateMonitor, PerformanceTier, SystemProfiler, detect_tier},
        settings::RuntimeSettings,
    },
    cli::Cli,
    data::{
        geoip::{LocationSource, locate_or_default},
        weather::{OpenWeatherClient, WeatherSource},
    },
    domain::{
        resolver::{ManualSelection, ResolvedState, WeatherResolver},
        weather::{Location, WeatherCategory, WeatherObservation},
    },
    resilience::backoff::Backoff,
    ui::{
        color::{ColorCapability, detect_color_capability},
        flash::StormFlash,
        particles::ParticleEngine,
        raster::Surface,
        renderer::{FrameContext, RasterRenderer},
        terminal::raster_size_for,
        transition::Crossfade,
    },
};

mod fetch;
mod input;


/// Frames longer than this are treated as a stall, not as elapsed simulation time.
pub const MAX_FRAME_DT: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherMode {
    Auto,
    Manual(ManualSelection),
}

impl WeatherMode {
    pub fn label(self) -> &'static str {
        match self {
            WeatherMode::Auto => "auto",
            WeatherMode::Manual(_) => "manual",
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub running: bool,
    pub mode: WeatherMode,
    pub settings: RuntimeSettings,
    pub location: Option<Location>,
    pub observation: WeatherObservation,
    pub last_error: Option<String>,
    pub fetch_in_flight: bool,
    pub capability: ColorCapability,
    pub frame_tick: u64,
    pub backoff: Backoff,
    resolved: ResolvedState,
    publisher: watch::Sender<ResolvedState>,
    resolver: WeatherResolver<'static>,
    tier: PerformanceTier,
    monitor: FrameRateMonitor,
    engine: ParticleEngine,
    renderer: RasterRenderer,
    surface: Surface,
    flash: StormFlash,
    fade: Option<Crossfade>,
    clock: f32,
    pulse_clock: f32,
    last_frame_at: Instant,
    frame_task: Option<TaskHandle>,
    refresh_task: Option<TaskHandle>,
    retry_task: Option<TaskHandle>,
}

impl AppState {
    pub fn new(cli: &Cli, settings: RuntimeSettings) -> Self {
        let capability = detect_color_capability();
        let tier = PerformanceTier::from_arg(settings.performance).unwrap_or_else(|| {
            let surface_pixels = crossterm::terminal::size()
                .map(|(cols, rows)| {
                    let (w, h) = raster_size_for(cols, rows);
                    w * h
                })
                .unwrap_or(0);
            detect_tier(&SystemProfiler {
                color: capability,
                surface_pixels,
            })
        });
        let monitor = if PerformanceTier::from_arg(settings.performance).is_none() {
            FrameRateMonitor::new(settings.fps)
        } else {
            FrameRateMonitor::disabled()
        };

        let mode = match cli.weather {
            Some(weather) => WeatherMode::Manual(ManualSelection {
                category: WeatherCategory::from(weather),
                is_night: cli.night,
            }),
            None => WeatherMode::Auto,
        };

        let resolver = WeatherResolver::builtin().with_time_config(settings.time_config());
        let location = settings.location.clone();
        let city = location.as_ref().map_or_else(|| Location::default().name, |l| l.name.clone());
        let observation = WeatherObservation::placeholder(&city, Utc::now());
        let resolved = match mode {
            WeatherMode::Auto => resolver.resolve(&observation),
            WeatherMode::Manual(selection) => resolver.resolve_manual(selection),
        };
        let (publisher, _) = watch::channel(resolved.clone());

        let engine = match cli.seed {
            Some(seed) => ParticleEngine::with_seed(seed),
            None => ParticleEngine::new(),
        };
        let flash_seed = cli.seed.map_or_else(rand::random, |seed| seed.wrapping_add(1));
        let flash = StormFlash::new(!settings.no_flash, flash_seed);

        log::debug!(
            "initial state {} (mode {}, tier {})",
            resolved.state_key,
            mode.label(),
            tier.label()
        );

        Self {
            running: true,
            mode,
            location,
            observation,
            last_error: None,
            fetch_in_flight: false,
            capability,
            frame_tick: 0,
            backoff: Backoff::default(),
            resolved,
            publisher,
            resolver,
            tier,
            monitor,
            engine,
            renderer: RasterRenderer::new(tier.render_quality()),
            surface: Surface::new(0, 0),
            flash,
            fade: None,
            clock: 0.0,
            pulse_clock: 0.0,
            last_frame_at: Instant::now(),
            frame_task: None,
            refresh_task: None,
            retry_task: None,
            settings,
        }
    }

    pub fn resolved(&self) -> &ResolvedState {
        &self.resolved
    }

    /// Every state change is pushed to subscribers; late subscribers see the
    /// current state immediately.
    pub fn subscribe(&self) -> watch::Receiver<ResolvedState> {
        self.publisher.subscribe()
    }

    pub fn tier(&self) -> PerformanceTier {
        self.tier
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn engine(&self) -> &ParticleEngine {
        &self.engine
    }

    pub fn is_animating(&self) -> bool {
        !self.settings.no_animation
    }

    pub fn has_refresh_task(&self) -> bool {
        self.refresh_task.is_some()
    }

    pub fn has_frame_task(&self) -> bool {
        self.frame_task.is_some()
    }

    pub fn is_transitioning(&self) -> bool {
        self.fade.is_some()
    }

    pub fn status_line(&self) -> String {
        let resolved = &self.resolved;
        let details = &resolved.observation.details;
        let mut line = format!(
            "{} [{}] {} · {}",
            resolved.state.name,
            resolved.state_key,
            self.mode.label(),
            self.tier.label()
        );
        if let Some(city) = &details.city_name {
            line.push_str(&format!(" · {city}"));
        }
        if let Some(temp) = details.temperature_c {
            line.push_str(&format!(" {temp:.0}°C"));
        }
        if details.is_placeholder {
            line.push_str(" · placeholder");
        }
        line
    }

    pub async fn handle_event(&mut self, event: AppEvent, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        match event {
            AppEvent::Bootstrap => {
                self.frame_task = Some(start_frame_task(tx.clone(), self.settings.fps));
                if self.mode == WeatherMode::Auto {
                    self.refresh_task = Some(start_refresh_task(
                        tx.clone(),
                        self.settings.refresh_interval_secs(),
                    ));
                    self.start_fetch(tx);
                }
            }
            AppEvent::TickFrame => {
                let now = Instant::now();
                let dt = now.duration_since(self.last_frame_at).as_secs_f32();
                self.last_frame_at = now;
                self.frame_tick = self.frame_tick.saturating_add(1);
                if let Some(tier) = self.monitor.record(dt, self.tier) {
                    self.set_tier(tier);
                }
                self.advance_frame(dt);
            }
            AppEvent::TickRefresh => {
                self.retry_task = None;
                if self.mode == WeatherMode::Auto {
                    self.start_fetch(tx);
                }
            }
            AppEvent::Input(event) => self.handle_input(event, tx).await?,
            AppEvent::LocationResolved(location) => {
                self.location = Some(location.clone());
                self.fetch_observation(tx, location);
            }
            AppEvent::ObservationFetched(observation) => self.accept_observation(observation),
            AppEvent::FetchFailed(err) => self.reject_fetch(err, tx),
            AppEvent::Quit => self.shutdown(),
        }
        Ok(())
    }

    pub fn set_manual(&mut self, selection: ManualSelection) {
        self.mode = WeatherMode::Manual(selection);
        self.refresh_task = None;
        self.retry_task = None;
        let resolved = self.resolver.resolve_manual(selection);
        self.apply_resolved(resolved);
    }

    /// Back to live weather: the last observation is shown immediately and a
    /// fresh fetch starts.
    pub fn set_auto(&mut self, tx: &mpsc::Sender<AppEvent>) {
        if self.mode == WeatherMode::Auto {
            return;
        }
        self.mode = WeatherMode::Auto;
        let resolved = self.resolver.resolve(&self.observation);
        self.apply_resolved(resolved);
        self.refresh_task = Some(start_refresh_task(
            tx.clone(),
            self.settings.refresh_interval_secs(),
        ));
        self.start_fetch(tx);
    }

    pub fn set_tier(&mut self, tier: PerformanceTier) {
        if tier == self.tier {
            return;
        }
        log::info!("performance tier {} -> {}", self.tier.label(), tier.label());
        self.tier = tier;
        self.renderer.set_quality(tier.render_quality());
        self.reset_engine();
        self.paint();
    }

    pub fn cycle_tier(&mut self) {
        self.monitor = FrameRateMonitor::disabled();
        self.set_tier(self.tier.next());
    }

    pub fn resize_viewport(&mut self, cols: u16, rows: u16) {
        let (width, height) = raster_size_for(cols, rows);
        self.resize_surface(width, height);
    }

    /// Existing particles keep their positions inside the new bounds, except
    /// on the first non-empty size where the pool is spawned fresh.
    pub fn resize_surface(&mut self, width: usize, height: usize) {
        if width == self.surface.width() && height == self.surface.height() {
            return;
        }
        let was_empty = self.surface.width() == 0 || self.surface.height() == 0;
        self.fade = None;
        self.surface.resize(width, height);
        if width == 0 || height == 0 {
            self.engine.clear();
            return;
        }
        if was_empty || self.engine.is_empty() {
            self.reset_engine();
        } else {
            self.engine.resize(width as f32, height as f32);
        }
        self.paint();
    }

    /// Replaces the displayed state. The particle pool is respawned only when
    /// the state key changes, and the previous frame then fades out over the
    /// tier's transition time. Subscribers are notified either way.
    pub fn apply_resolved(&mut self, resolved: ResolvedState) {
        let key_changed = resolved.state_key != self.resolved.state_key;
        if resolved.fell_back {
            log::warn!("no visual state for {}, using default", resolved.state_key);
        }
        self.resolved = resolved;
        if key_changed {
            log::info!("visual state -> {}", self.resolved.state_key);
            self.start_crossfade();
            self.pulse_clock = 0.0;
            self.reset_engine();
        }
        self.publisher.send_replace(self.resolved.clone());
        self.paint();
    }

    pub fn advance_frame(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        if self.is_animating() {
            self.engine.advance(dt);
            self.clock += dt * self.resolved.state.animation_speed.max(0.0);
            self.pulse_clock += dt;
            self.flash.tick(dt, self.resolved.state.pulse_effect);
        }
        if let Some(fade) = &mut self.fade {
            fade.advance(dt);
        }
        if self.fade.as_ref().is_some_and(Crossfade::is_done) {
            self.fade = None;
        }
        self.paint();
    }

    pub fn paint(&mut self) {
        let frame = FrameContext {
            clock: self.clock,
            flash: self.flash.level(),
            pulse: self.pulse_clock,
        };
        self.renderer.paint_scene(
            &mut self.surface,
            self.engine.snapshot(),
            &self.resolved.state,
            frame,
        );
        if let Some(fade) = &self.fade {
            fade.composite(&mut self.surface);
        }
    }

    /// Frozen animation switches instantly.
    fn start_crossfade(&mut self) {
        let empty = self.surface.width() == 0 || self.surface.height() == 0;
        let secs = self.tier.config().transition_secs;
        self.fade = (!empty && self.is_animating() && secs > 0.0)
            .then(|| Crossfade::new(self.surface.clone(), secs));
    }

    fn reset_engine(&mut self) {
        let (width, height) = (self.surface.width(), self.surface.height());
        if width == 0 || height == 0 {
            self.engine.clear();
            return;
        }
        let multiplier = self.tier.config().particle_multiplier;
        self.engine.reset(
            &self.resolved.state.particles,
            width as f32,
            height as f32,
            multiplier,
        );
    }

    fn shutdown(&mut self) {
        self.running = false;
        self.frame_task = None;
        self.refresh_task = None;
        self.retry_task = None;
    }

    fn accept_observation(&mut self, observation: WeatherObservation) {
        self.fetch_in_flight = false;
        self.backoff.reset();
        self.retry_task = None;
        self.last_error = None;
        if let Some(city) = &observation.details.city_name
            && let Some(location) = &mut self.location
            && location.name != *city
        {
            log::debug!("location {} is {city}", location.name);
            location.name.clone_from(city);
        }
        self.observation = observation;
        if self.mode == WeatherMode::Auto {
            let resolved = self.resolver.resolve(&self.observation);
            self.apply_resolved(resolved);
        }
    }

    fn reject_fetch(&mut self, err: String, tx: &mpsc::Sender<AppEvent>) {
        self.fetch_in_flight = false;
        log::warn!("weather update failed: {err}");
        self.last_error = Some(err);
        self.observation = WeatherObservation::placeholder(&self.city_name(), Utc::now());
        if self.mode == WeatherMode::Auto {
            let resolved = self.resolver.resolve(&self.observation);
            self.apply_resolved(resolved);
            let delay = self.backoff.next_delay();
            log::debug!(
                "retrying weather fetch in {}s (failure {})",
                delay.as_secs(),
                self.backoff.failures()
            );
            self.retry_task = Some(schedule_retry(tx.clone(), delay));
        }
    }

    fn city_name(&self) -> String {
        self.location
            .as_ref()
            .map_or_else(|| Location::default().name, |location| location.name.clone())
    }
}
