//! Property-based checks

use crate::common::{build, config, poll, rng, scene};
use particle_template::{
    Environment, Field, ParticleInput, RawField, Sampler, TemplateKind, Vector3,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_range_samples_stay_in_bounds(
        a in -1.0e6f64..1.0e6,
        b in -1.0e6f64..1.0e6,
        seed in any::<u64>(),
    ) {
        let field = Field::scalar("particleLifetime", &RawField::range(a, b)).unwrap();
        let env = Environment::new();
        let mut rng = rng(seed);
        let mut sampler = Sampler::new(&env, &mut rng);
        for _ in 0..16 {
            let value = sampler.scalar(&field).unwrap();
            prop_assert!(value >= a.min(b) && value <= a.max(b));
        }
    }

    #[test]
    fn prop_lifetime_range_respected(min in 1.0f64..5000.0, span in 0.0f64..5000.0, seed in any::<u64>()) {
        let scene = scene();
        let mut rng = rng(seed);
        let json = format!(r#"{{"particleLifetime": [{min}, {max}]}}"#, max = min + span);
        let config = config(&json);
        let mut template = build(TemplateKind::Spraying, &config, &scene, &mut rng);
        let particle = poll(&mut template, &scene, &mut rng).unwrap();
        let lifetime = particle.borrow().lifetime_ms;
        prop_assert!(lifetime >= min && lifetime <= min + span);
    }

    #[test]
    fn prop_facing_rotation_preserves_distance(facing in -720.0f64..720.0, dx in 0.0f64..500.0) {
        let mut scene = scene();
        scene.add_object("turret", particle_template::Anchor::new(0.0, 0.0, facing));
        let mut rng = rng(0);
        let json = format!(r#"{{"source": "turret", "positionSpawning": [{dx}, 0], "particleLifetime": 100}}"#);
        let config = config(&json);
        let mut template = build(TemplateKind::Spraying, &config, &scene, &mut rng);
        let particle = poll(&mut template, &scene, &mut rng).unwrap();
        let position = particle.borrow().position();

        prop_assert!((position.distance_2d(&Vector3::ZERO) - dx).abs() < 1e-6);
        let radians = facing.to_radians();
        prop_assert!((position.x - dx * radians.cos()).abs() < 1e-6);
        prop_assert!((position.y - dx * radians.sin()).abs() < 1e-6);
    }

    #[test]
    fn prop_input_add_is_non_mutating(base in -1.0e9f64..1.0e9, delta in -1.0e9f64..1.0e9) {
        let input = ParticleInput::new(base);
        let added = input.add(delta);
        prop_assert_eq!(input.value(), base);
        prop_assert_eq!(added.value(), base + delta);
    }
}
