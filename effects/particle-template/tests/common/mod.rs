//! Shared helpers for integration tests

use particle_template::{
    Anchor, GenerationContext, GeneratedParticle, Motion, ParticleHandle, ParticleTemplate, Scene,
    TemplateConfig, TemplateKind,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub const TEXTURE: &str = "modules/effects/spark.webp";

/// Route library logs through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Parse a template definition
pub fn config(json: &str) -> TemplateConfig {
    serde_json::from_str(json).expect("Failed to parse template definition")
}

/// Scene with a 100 unit grid and a caster at the origin
pub fn scene() -> Scene {
    let mut scene = Scene::new(100.0);
    scene.add_object("caster", Anchor::new(0.0, 0.0, 0.0));
    scene
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Build a template with the default test texture
pub fn build(
    kind: TemplateKind,
    config: &TemplateConfig,
    scene: &Scene,
    rng: &mut StdRng,
) -> ParticleTemplate {
    let mut ctx = GenerationContext::new(scene, rng);
    ParticleTemplate::build(kind, config, &TEXTURE.into(), &mut ctx)
        .expect("Failed to build template")
}

/// Poll a template once
pub fn poll(template: &mut ParticleTemplate, scene: &Scene, rng: &mut StdRng) -> Option<ParticleHandle> {
    let mut ctx = GenerationContext::new(scene, rng);
    template
        .generate_particles(&mut ctx)
        .expect("Failed to generate particle")
}

/// Travel angle keyframes of a spraying particle as `(start, end)`
pub fn travel_angles(particle: &GeneratedParticle) -> (f64, f64) {
    match &particle.motion {
        Motion::Spraying { angle, .. } => (angle.start.value(), angle.end_or_start()),
        Motion::Graviting { .. } => panic!("Expected spraying motion"),
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
