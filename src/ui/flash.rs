use rand::{Rng, SeedableRng, rngs::StdRng};

const FLASH_CHANCE_PER_TICK: f64 = 0.016;
const FLASH_SECS: f32 = 0.12;

/// Random lightning flash for states with a pulse effect.
#[derive(Debug)]
pub struct StormFlash {
    enabled: bool,
    timer: f32,
    rng: StdRng,
}

impl StormFlash {
    pub fn new(enabled: bool, seed: u64) -> Self {
        Self {
            enabled,
            timer: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `armed` is false when the current state has no pulse or the tier disallows effects.
    pub fn tick(&mut self, dt: f32, armed: bool) {
        if !self.enabled || !armed {
            self.timer = 0.0;
            return;
        }
        if self.timer <= 0.0 && self.rng.random_bool(FLASH_CHANCE_PER_TICK) {
            self.timer = FLASH_SECS;
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.timer = (self.timer - dt).max(0.0);
    }

    /// 1.0 at the strike, fading linearly to 0.
    pub fn level(&self) -> f32 {
        (self.timer / FLASH_SECS).clamp(0.0, 1.0)
    }
}
