use crate::{
    domain::visual::{GradientStop, ParticleSpec, ParticleType, Rgb, VisualState},
    ui::{
        background::{paint_aurora, paint_flash, paint_gradient, paint_pulse, pulse_glow},
        particles::Particle,
        raster::Surface,
    },
};

const RAIN_COLOR: Rgb = Rgb::new(200, 220, 255);
const FOG_COLOR: Rgb = Rgb::new(200, 200, 220);
const HAZE_COLOR: Rgb = Rgb::new(196, 200, 214);
const HAZE_ALPHA: f32 = 0.12;
const RAIN_STREAK_PER_SIZE: f32 = 10.0;
const RAIN_TRAIL_SECS: f32 = 0.02;

/// Quality knobs taken from the active performance tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderQuality {
    pub dither: bool,
    /// Haze veil and lightning flash. The pulse glow is painted regardless.
    pub effects: bool,
    /// Zero disables the aurora.
    pub aurora_ribbons: usize,
}

impl Default for RenderQuality {
    fn default() -> Self {
        Self {
            dither: true,
            effects: true,
            aurora_ribbons: 3,
        }
    }
}

/// Per-frame inputs that are not part of the visual state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameContext {
    /// Animation clock in seconds, already scaled by the state's animation speed.
    pub clock: f32,
    /// Storm flash level, 0..=1.
    pub flash: f32,
    /// Unscaled seconds of animation, drives the pulse glow.
    pub pulse: f32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RasterRenderer {
    quality: RenderQuality,
}

impl RasterRenderer {
    pub fn new(quality: RenderQuality) -> Self {
        Self { quality }
    }

    pub fn quality(&self) -> RenderQuality {
        self.quality
    }

    pub fn set_quality(&mut self, quality: RenderQuality) {
        self.quality = quality;
    }

    /// Repaints the whole surface: gradient first, then every particle at its
    /// simulated position.
    pub fn paint(
        &self,
        surface: &mut Surface,
        snapshot: &[Particle],
        spec: &ParticleSpec,
        gradient_stops: &[GradientStop],
    ) {
        paint_gradient(surface, gradient_stops, self.quality.dither);
        paint_particles(surface, snapshot, spec.kind);
    }

    /// Full frame for a visual state, including overlay, aurora and the
    /// pulse/blur extras the tier allows.
    pub fn paint_scene(
        &self,
        surface: &mut Surface,
        snapshot: &[Particle],
        state: &VisualState,
        frame: FrameContext,
    ) {
        paint_gradient(surface, &state.gradient, self.quality.dither);
        if let Some(overlay) = state.overlay {
            surface.blend_all(overlay.color, overlay.alpha);
        }
        if let Some(aurora) = &state.aurora
            && self.quality.aurora_ribbons > 0
        {
            paint_aurora(surface, aurora, self.quality.aurora_ribbons, frame.clock);
        }
        paint_particles(surface, snapshot, state.particles.kind);
        if state.blur_effect && self.quality.effects {
            surface.blend_all(HAZE_COLOR, HAZE_ALPHA);
        }
        if state.pulse_effect {
            let (opacity, scale) = pulse_glow(frame.pulse);
            paint_pulse(surface, opacity, scale);
            if self.quality.effects {
                paint_flash(surface, frame.flash);
            }
        }
    }
}

fn paint_particles(surface: &mut Surface, snapshot: &[Particle], kind: ParticleType) {
    for p in snapshot {
        if p.opacity <= 0.0 || p.size <= 0.0 {
            continue;
        }
        match kind {
            ParticleType::Rain => paint_rain(surface, p),
            ParticleType::Snow => paint_snow(surface, p),
            ParticleType::Dust => paint_dust(surface, p),
            ParticleType::Fog => paint_fog(surface, p),
            ParticleType::Stars => paint_star(surface, p),
        }
    }
}

fn paint_rain(surface: &mut Surface, p: &Particle) {
    let tail = (
        p.x - p.vx * RAIN_TRAIL_SECS,
        p.y - p.size * RAIN_STREAK_PER_SIZE,
    );
    surface.stroke_line((p.x, p.y), tail, p.size * 0.5, RAIN_COLOR, p.opacity);
}

fn paint_snow(surface: &mut Surface, p: &Particle) {
    surface.fill_disc(p.x, p.y, p.size * 1.5, Rgb::WHITE, p.opacity * 0.3);
    surface.fill_disc(p.x, p.y, p.size, Rgb::WHITE, p.opacity);
}

fn paint_dust(surface: &mut Surface, p: &Particle) {
    let opacity = p.opacity;
    surface.fill_radial(p.x, p.y, p.size, Rgb::WHITE, |t| opacity * (1.0 - t * t));
}

fn paint_fog(surface: &mut Surface, p: &Particle) {
    let opacity = p.opacity;
    surface.fill_radial(p.x, p.y, p.size, FOG_COLOR, |t| opacity * (1.0 - t));
}

fn paint_star(surface: &mut Surface, p: &Particle) {
    let glow = p.opacity * 0.5;
    surface.fill_radial(p.x, p.y, p.size * 3.0, Rgb::WHITE, |t| glow * (1.0 - t));
    surface.fill_disc(p.x, p.y, p.size, Rgb::WHITE, p.opacity);
}
