use std::f32::consts::TAU;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::domain::visual::{ParticleSpec, ParticleType, ValueRange};

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub opacity: f32,
    pub base_opacity: f32,
    /// `ParticleSpec::speed` jittered by 0.5..1.5.
    pub speed: f32,
    pub phase: f32,
    pub twinkle_phase: f32,
    pub age: f32,
}

/// Owns the particle pool for the active visual state.
///
/// The pool is rebuilt by [`ParticleEngine::reset`] and only mutated by
/// [`ParticleEngine::advance`]; particles leaving the surface wrap around
/// instead of being freed, so the pool size is fixed between resets.
#[derive(Debug)]
pub struct ParticleEngine {
    spec: ParticleSpec,
    width: f32,
    height: f32,
    multiplier: f32,
    particles: Vec<Particle>,
    rng: StdRng,
}

const FOG_PULSE_RATE: f32 = 0.5;
const TWINKLE_RATE: f32 = 2.0;
const SNOW_SWAY_RATE: f32 = 2.0;
const SNOW_SWAY_PX: f32 = 20.0;
const DRIFT_BOB_PX: f32 = 10.0;
// Absorbs binary representation error in the tier multipliers (0.6, 0.3).
const COUNT_EPSILON: f64 = 1e-6;

impl Default for ParticleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleEngine {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            spec: ParticleSpec {
                kind: ParticleType::Stars,
                count: 0,
                speed: 0.0,
                size: ValueRange::new(0.0, 0.0),
                opacity: ValueRange::new(0.0, 0.0),
                angle: None,
                sway: false,
                twinkle: false,
            },
            width: 0.0,
            height: 0.0,
            multiplier: 1.0,
            particles: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Drops the current pool and builds `floor(count * performance_multiplier)`
    /// particles for `spec` on a `width` x `height` surface.
    pub fn reset(&mut self, spec: &ParticleSpec, width: f32, height: f32, performance_multiplier: f32) {
        self.spec = spec.sanitized();
        self.width = sanitize_extent(width);
        self.height = sanitize_extent(height);
        self.multiplier = sanitize_multiplier(performance_multiplier);

        let count = scaled_count(self.spec.count, self.multiplier);
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = spawn_particle(&mut self.rng, &self.spec, self.width, self.height);
            self.particles.push(particle);
        }
    }

    pub fn advance(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let bounds = (self.width, self.height);
        for particle in &mut self.particles {
            step_particle(particle, &self.spec, dt);
            wrap_particle(particle, bounds, &mut self.rng);
        }
    }

    pub fn snapshot(&self) -> &[Particle] {
        &self.particles
    }

    /// Adopts new surface bounds, clamping positions into them without rescaling.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = sanitize_extent(width);
        self.height = sanitize_extent(height);
        for p in &mut self.particles {
            p.x = p.x.clamp(-p.size, self.width + p.size);
            p.y = p.y.clamp(-p.size, self.height + p.size);
        }
    }

    /// Teardown: drops the pool.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn spec(&self) -> &ParticleSpec {
        &self.spec
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled_count(count: i32, multiplier: f32) -> usize {
    let scaled = f64::from(count.max(0)) * f64::from(multiplier);
    (scaled + COUNT_EPSILON).floor().max(0.0) as usize
}

fn sanitize_extent(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

fn sanitize_multiplier(value: f32) -> f32 {
    if value.is_nan() { 1.0 } else { value.clamp(0.0, 1.0) }
}

fn uniform(rng: &mut StdRng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

fn sample(rng: &mut StdRng, range: ValueRange) -> f32 {
    uniform(rng, range.min, range.max)
}

fn spawn_particle(rng: &mut StdRng, spec: &ParticleSpec, width: f32, height: f32) -> Particle {
    let size = sample(rng, spec.size);
    let base_opacity = sample(rng, spec.opacity);
    let speed = spec.speed * uniform(rng, 0.5, 1.5);
    let phase = uniform(rng, 0.0, TAU);
    let twinkle_phase = uniform(rng, 0.0, TAU);

    let (vx, vy) = match spec.kind {
        ParticleType::Rain => (spec.angle_deg().to_radians().sin() * speed * 30.0, speed * 100.0),
        ParticleType::Snow => (phase.sin() * speed * 5.0, speed * 20.0),
        ParticleType::Dust | ParticleType::Fog => (
            speed * uniform(rng, -10.0, 10.0),
            speed * uniform(rng, -5.0, 5.0),
        ),
        ParticleType::Stars => (0.0, 0.0),
    };

    let mut particle = Particle {
        x: uniform(rng, 0.0, width),
        y: uniform(rng, 0.0, height),
        vx,
        vy,
        size,
        opacity: base_opacity,
        base_opacity,
        speed,
        phase,
        twinkle_phase,
        age: 0.0,
    };
    modulate_opacity(&mut particle, spec);
    particle
}

fn step_particle(p: &mut Particle, spec: &ParticleSpec, dt: f32) {
    p.age += dt;

    match spec.kind {
        ParticleType::Rain => {
            p.x += p.vx * dt;
            p.y += p.vy * dt;
        }
        ParticleType::Snow => {
            if spec.sway {
                p.x += (p.age * SNOW_SWAY_RATE + p.phase).sin() * SNOW_SWAY_PX * dt;
            }
            p.y += p.vy * dt;
        }
        ParticleType::Dust | ParticleType::Fog => {
            p.x += p.vx * dt;
            p.y += p.vy * dt + (p.age + p.phase).sin() * DRIFT_BOB_PX * dt;
        }
        ParticleType::Stars => {
            if spec.twinkle {
                p.twinkle_phase += dt * TWINKLE_RATE;
            }
        }
    }

    modulate_opacity(p, spec);
}

fn modulate_opacity(p: &mut Particle, spec: &ParticleSpec) {
    match spec.kind {
        ParticleType::Fog => {
            p.opacity = p.base_opacity * (0.5 + 0.5 * (p.age * FOG_PULSE_RATE).sin());
        }
        ParticleType::Stars if spec.twinkle => {
            p.opacity = p.base_opacity * (0.5 + 0.5 * p.twinkle_phase.sin());
        }
        _ => {}
    }
}

fn wrap_particle(p: &mut Particle, (width, height): (f32, f32), rng: &mut StdRng) {
    if p.y > height + p.size {
        p.y = -p.size;
        p.x = uniform(rng, 0.0, width);
    } else if p.y < -p.size {
        p.y = height + p.size;
    }

    if p.x > width + p.size {
        p.x = -p.size;
    } else if p.x < -p.size {
        p.x = width + p.size;
    }
}
