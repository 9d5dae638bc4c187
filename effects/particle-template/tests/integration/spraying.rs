//! Spraying template geometry

use crate::common::{
    TEXTURE, assert_close, build, config, init_logging, poll, rng, scene, travel_angles,
};
use particle_template::{
    Anchor, GenerationContext, ParticleTemplate, TemplateError, TemplateKind, Vector3,
};
use pretty_assertions::assert_eq;

#[test]
fn test_literal_fields_are_deterministic() {
    init_logging();
    let scene = scene();
    let mut rng = rng(1);
    let config = config(
        r#"{
            "source": "caster",
            "particleVelocityStart": 150,
            "particleVelocityEnd": 50,
            "particleAngleStart": 10,
            "particleSizeStart": [12, 8],
            "particleSizeEnd": [2, 2],
            "particleColorStart": [200, 100, 50],
            "alphaStart": 0.8,
            "alphaEnd": 0,
            "particleLifetime": 900
        }"#,
    );
    let mut template = build(TemplateKind::Spraying, &config, &scene, &mut rng);

    let first = poll(&mut template, &scene, &mut rng).unwrap();
    for _ in 0..20 {
        let next = poll(&mut template, &scene, &mut rng).unwrap();
        let (a, b) = (first.borrow(), next.borrow());
        assert_eq!(a.lifetime_ms, b.lifetime_ms);
        assert_eq!(a.size, b.size);
        assert_eq!(a.color, b.color);
        assert_eq!(a.alpha, b.alpha);
        assert_eq!(travel_angles(&a), travel_angles(&b));
        assert_eq!(a.position(), b.position());
    }
    assert_eq!(first.borrow().renderable.texture().as_str(), TEXTURE);
}

#[test]
fn test_target_at_threshold_keeps_lifetime() {
    let mut scene = scene();
    scene.add_object("goblin", Anchor::new(500.0, 0.0, 0.0));
    let mut rng = rng(2);
    let config = config(
        r#"{"source": "caster", "target": "goblin", "particleLifetime": 1000}"#,
    );
    let mut template = build(TemplateKind::Spraying, &config, &scene, &mut rng);
    let particle = poll(&mut template, &scene, &mut rng).unwrap();
    let particle = particle.borrow();

    assert_eq!(particle.lifetime_ms, 1000.0);
    assert_eq!(particle.direction(), 0.0);
}

#[test]
fn test_long_shot_stretches_lifetime() {
    let mut scene = scene();
    scene.add_object("goblin", Anchor::new(600.0, 0.0, 0.0));
    let mut rng = rng(3);
    let config = config(
        r#"{"source": "caster", "target": "goblin", "particleLifetime": 1000}"#,
    );
    let mut template = build(TemplateKind::Spraying, &config, &scene, &mut rng);
    let particle = poll(&mut template, &scene, &mut rng).unwrap();

    assert_close(particle.borrow().lifetime_ms, 1200.0);
}

#[test]
fn test_spawn_offset_follows_target_bearing() {
    let mut scene = scene();
    scene.add_object("goblin", Anchor::new(0.0, 300.0, 0.0));
    let mut rng = rng(4);
    let config = config(
        r#"{
            "source": "caster",
            "target": "goblin",
            "positionSpawning": [20, 0],
            "particleAngleStart": 5,
            "particleAngleEnd": -5,
            "particleRotationStart": 15,
            "particleLifetime": 1000
        }"#,
    );
    let mut template = build(TemplateKind::Spraying, &config, &scene, &mut rng);
    let particle = poll(&mut template, &scene, &mut rng).unwrap();
    let particle = particle.borrow();

    let position = particle.position();
    assert_close(position.x, 0.0);
    assert_close(position.y, 20.0);

    let (start, end) = travel_angles(&particle);
    assert_close(start, 95.0);
    assert_close(end, 85.0);
    assert_close(particle.rotation.start.value(), 105.0);
    assert_close(particle.renderable.rotation_degrees(), 105.0);
}

#[test]
fn test_source_facing_rotates_spawn_offset() {
    let mut scene = scene();
    scene.add_object("turret", Anchor::new(50.0, 50.0, 90.0));
    let mut rng = rng(5);
    let config = config(
        r#"{"source": "turret", "positionSpawning": [30, 0], "particleLifetime": 1000}"#,
    );
    let mut template = build(TemplateKind::Spraying, &config, &scene, &mut rng);
    let particle = poll(&mut template, &scene, &mut rng).unwrap();
    let particle = particle.borrow();

    let position = particle.position();
    assert_close(position.x, 50.0);
    assert_close(position.y, 80.0);
    assert_close(particle.direction(), 90.0);
}

#[test]
fn test_degenerate_target_uses_facing() {
    let mut scene = scene();
    scene.add_object("turret", Anchor::new(50.0, 50.0, 180.0));
    scene.add_object("ally", Anchor::new(50.0, 50.0, 0.0));
    let mut rng = rng(6);
    let config = config(
        r#"{"source": "turret", "target": "ally", "particleLifetime": 1000}"#,
    );
    let mut template = build(TemplateKind::Spraying, &config, &scene, &mut rng);
    let particle = poll(&mut template, &scene, &mut rng).unwrap();

    assert_close(particle.borrow().direction(), 180.0);
}

#[test]
fn test_missing_target_falls_back_to_facing() {
    init_logging();
    let mut scene = scene();
    scene.add_object("turret", Anchor::new(0.0, 0.0, 270.0));
    let mut rng = rng(7);
    let config = config(
        r#"{"source": "turret", "target": "vanished", "particleLifetime": 1000}"#,
    );
    let mut template = build(TemplateKind::Spraying, &config, &scene, &mut rng);
    let particle = poll(&mut template, &scene, &mut rng).unwrap();

    assert_close(particle.borrow().direction(), 270.0);
}

#[test]
fn test_moving_target_is_tracked_between_calls() {
    let mut scene = scene();
    scene.add_object("goblin", Anchor::new(100.0, 0.0, 0.0));
    let mut rng = rng(8);
    let config = config(
        r#"{"source": "caster", "target": "goblin", "particleLifetime": 1000}"#,
    );
    let mut template = build(TemplateKind::Spraying, &config, &scene, &mut rng);
    let first = poll(&mut template, &scene, &mut rng).unwrap();
    assert_close(first.borrow().direction(), 0.0);

    scene.move_object("goblin", 0.0, -100.0);
    let second = poll(&mut template, &scene, &mut rng).unwrap();
    assert_close(second.borrow().direction(), -90.0);
}

#[test]
fn test_color_conversion_floors_channels() {
    let scene = scene();
    let mut rng = rng(9);

    let orange = config(r#"{"particleColorStart": [255, 128, 0], "particleLifetime": 1000}"#);
    let mut template = build(TemplateKind::Spraying, &orange, &scene, &mut rng);
    let particle = poll(&mut template, &scene, &mut rng).unwrap();
    let tint = particle.borrow().renderable.tint();
    assert_eq!(tint, [1.0, 128.0 / 255.0, 0.0]);
    assert_close(tint[1], 0.501_960_8);

    let black = config(r#"{"particleColorStart": [0, 0, 0], "particleLifetime": 1000}"#);
    let mut template = build(TemplateKind::Spraying, &black, &scene, &mut rng);
    let particle = poll(&mut template, &scene, &mut rng).unwrap();
    assert_eq!(particle.borrow().renderable.tint(), [0.0, 0.0, 0.0]);
    assert_eq!(particle.borrow().color.start.value(), Vector3::ZERO);
}

#[test]
fn test_overflowing_lifetime_range_fails_at_build() {
    init_logging();
    let scene = scene();
    let mut rng = rng(8);
    let config = config(
        r#"{
            "source": "caster",
            "particleLifetime": [-1e308, 1e308]
        }"#,
    );
    let mut ctx = GenerationContext::new(&scene, &mut rng);
    let result = ParticleTemplate::build(TemplateKind::Spraying, &config, &TEXTURE.into(), &mut ctx);
    assert!(matches!(
        result,
        Err(TemplateError::InvalidField {
            field: "particleLifetime",
            ..
        })
    ));
}
