use proptest::prelude::*;
use weather_backdrop::{
    domain::visual::{ParticleSpec, ParticleType, ValueRange},
    ui::particles::ParticleEngine,
};

fn spec(kind: ParticleType, count: i32, speed: f32) -> ParticleSpec {
    ParticleSpec {
        kind,
        count,
        speed,
        size: ValueRange::new(1.0, 4.0),
        opacity: ValueRange::new(0.2, 0.8),
        angle: None,
        sway: false,
        twinkle: kind == ParticleType::Stars,
    }
}

fn kind_strategy() -> impl Strategy<Value = ParticleType> {
    prop_oneof![
        Just(ParticleType::Rain),
        Just(ParticleType::Snow),
        Just(ParticleType::Dust),
        Just(ParticleType::Fog),
        Just(ParticleType::Stars),
    ]
}

proptest! {
    #[test]
    fn particles_wrap_within_one_size_of_the_surface(
        kind in kind_strategy(),
        seed in any::<u64>(),
        count in 0i32..120,
        speed in 0.0f32..6.0,
        width in 16.0f32..800.0,
        height in 16.0f32..600.0,
        steps in 1usize..90,
    ) {
        let mut engine = ParticleEngine::with_seed(seed);
        engine.reset(&spec(kind, count, speed), width, height, 1.0);
        for _ in 0..steps {
            engine.advance(1.0 / 30.0);
        }
        for p in engine.snapshot() {
            let margin = p.size + 1e-3;
            prop_assert!(p.x >= -margin && p.x <= width + margin, "x {} out of {}", p.x, width);
            prop_assert!(p.y >= -margin && p.y <= height + margin, "y {} out of {}", p.y, height);
            prop_assert!((0.0..=1.0).contains(&p.opacity));
        }
    }

    #[test]
    fn pool_size_follows_the_multiplier(
        count in 0i32..300,
        multiplier in 0.0f32..1.0,
    ) {
        let mut engine = ParticleEngine::with_seed(3);
        engine.reset(&spec(ParticleType::Snow, count, 1.0), 100.0, 100.0, multiplier);
        let exact = f64::from(count) * f64::from(multiplier);
        let len = engine.len() as f64;
        prop_assert!(engine.len() <= count as usize);
        prop_assert!(len <= exact + 1e-3);
        prop_assert!(len > exact - 1.0);
    }
}
