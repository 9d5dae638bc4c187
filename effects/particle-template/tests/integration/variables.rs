//! Advanced variables shared between fields

use crate::common::{TEXTURE, assert_close, build, config, poll, rng, scene};
use particle_template::{
    Anchor, Environment, GenerationContext, Host, ParticleTemplate, PlaceableRef, Result, Scene,
    TemplateError, TemplateKind, VariableDefinition,
};
use rand::RngCore;

#[test]
fn test_variable_shared_between_fields() {
    let scene = scene();
    let mut rng = rng(40);
    let config = config(
        r#"{
            "particleAngleStart": "spin_deg",
            "particleRotationStart": "spin_deg",
            "particleLifetime": 1000,
            "advanced": {"variables": [{"name": "spin_deg", "value": [0, 360]}]}
        }"#,
    );
    let mut template = build(TemplateKind::Spraying, &config, &scene, &mut rng);

    let mut previous = None;
    for _ in 0..10 {
        let particle = poll(&mut template, &scene, &mut rng).unwrap();
        let particle = particle.borrow();
        let spin = particle.environment.get("spin_deg").and_then(|v| v.as_scalar()).unwrap();
        assert!((0.0..=360.0).contains(&spin));
        assert_eq!(particle.rotation.start.value(), spin);
        assert_eq!(particle.direction(), spin);
        assert_ne!(previous, Some(spin));
        previous = Some(spin);
    }
}

#[test]
fn test_unknown_variable_fails_generation() {
    let scene = scene();
    let mut rng = rng(41);
    let config = config(r#"{"particleLifetime": "duration_ms"}"#);
    let mut template = build(TemplateKind::Spraying, &config, &scene, &mut rng);

    let mut ctx = GenerationContext::new(&scene, &mut rng);
    let result = template.generate_particles(&mut ctx);
    assert!(matches!(
        result,
        Err(TemplateError::UnresolvedVariable {
            field: "particleLifetime",
            ..
        })
    ));
}

#[test]
fn test_vector_variable_as_target() {
    let scene = scene();
    let mut rng = rng(42);
    let config = config(
        r#"{
            "source": "caster",
            "target": "impact_point",
            "particleLifetime": 1000,
            "advanced": {"variables": [{"name": "impact_point", "value": {"x": 0, "y": [100, 200]}}]}
        }"#,
    );
    let mut template = build(TemplateKind::Spraying, &config, &scene, &mut rng);
    let particle = poll(&mut template, &scene, &mut rng).unwrap();

    assert_close(particle.borrow().direction(), 90.0);
}

/// Host with its own variable engine
struct FixedVariables {
    scene: Scene,
    speed: f64,
}

impl Host for FixedVariables {
    fn resolve_placeable(&self, id: &str) -> Option<PlaceableRef> {
        self.scene.resolve_placeable(id)
    }

    fn anchor_position(&self, placeable: &PlaceableRef) -> Option<Anchor> {
        self.scene.anchor_position(placeable)
    }

    fn grid_size(&self) -> f64 {
        self.scene.grid_size()
    }

    fn evaluate_variables(
        &self,
        _definitions: &[VariableDefinition],
        _rng: &mut dyn RngCore,
    ) -> Result<Environment> {
        let mut env = Environment::new();
        env.insert("host_speed", self.speed);
        Ok(env)
    }
}

#[test]
fn test_host_supplies_variables() {
    let host = FixedVariables {
        scene: scene(),
        speed: 321.0,
    };
    let config = config(r#"{"particleVelocityStart": "host_speed", "particleLifetime": 1000}"#);
    let mut rng = rng(43);
    let mut ctx = GenerationContext::new(&host, &mut rng);
    let mut template =
        ParticleTemplate::build(TemplateKind::Spraying, &config, &TEXTURE.into(), &mut ctx)
            .unwrap();
    let particle = template.generate_particles(&mut ctx).unwrap().unwrap();

    match &particle.borrow().motion {
        particle_template::Motion::Spraying { velocity, .. } => {
            assert_eq!(velocity.start.value(), 321.0);
        }
        particle_template::Motion::Graviting { .. } => panic!("Expected spraying motion"),
    }
}
