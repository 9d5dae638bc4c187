//! Missile main particle and trail emission

use crate::common::{assert_close, build, config, init_logging, poll, rng, scene, travel_angles};
use particle_template::{Anchor, Motion, OrbitCenter, TemplateKind};

fn missile_scene() -> particle_template::Scene {
    let mut scene = scene();
    scene.add_object("dragon", Anchor::new(1000.0, 0.0, 0.0));
    scene
}

#[test]
fn test_main_particle_arrives_at_target() {
    init_logging();
    let scene = missile_scene();
    let mut rng = rng(10);
    let config = config(
        r#"{
            "source": "caster",
            "target": "dragon",
            "particleVelocityStart": 10,
            "particleVelocityEnd": 30,
            "particleAngleStart": [-60, 60],
            "particleAngleEnd": [-60, 60],
            "particleLifetime": 400
        }"#,
    );
    let mut template = build(TemplateKind::Missile, &config, &scene, &mut rng);
    let main = poll(&mut template, &scene, &mut rng).unwrap();
    let main = main.borrow();

    assert_close(main.lifetime_ms, 50_000.0);
    assert_eq!(travel_angles(&main), (0.0, 0.0));
}

#[test]
fn test_zero_velocity_keeps_sampled_lifetime() {
    let mut scene = scene();
    scene.add_object("dragon", Anchor::new(300.0, 400.0, 0.0));
    let mut rng = rng(11);
    let config = config(
        r#"{
            "source": "caster",
            "target": "dragon",
            "particleVelocityStart": 0,
            "particleLifetime": 1234
        }"#,
    );
    let mut template = build(TemplateKind::Missile, &config, &scene, &mut rng);
    let main = poll(&mut template, &scene, &mut rng).unwrap();
    let main = main.borrow();

    assert_eq!(main.lifetime_ms, 1234.0);
    let bearing = 400.0_f64.atan2(300.0).to_degrees();
    let (start, end) = travel_angles(&main);
    assert_close(start, bearing);
    assert_close(end, bearing);
}

#[test]
fn test_without_trail_only_main_is_emitted() {
    let scene = missile_scene();
    let mut rng = rng(12);
    let config = config(
        r#"{"source": "caster", "target": "dragon", "particleVelocityStart": 100, "particleLifetime": 100}"#,
    );
    let mut template = build(TemplateKind::Missile, &config, &scene, &mut rng);

    let main = poll(&mut template, &scene, &mut rng);
    assert!(main.is_some());
    for _ in 0..5 {
        assert!(poll(&mut template, &scene, &mut rng).is_none());
    }
}

#[test]
fn test_spraying_trail_points_backwards() {
    let scene = missile_scene();
    let mut rng = rng(13);
    let config = config(
        r#"{
            "source": "caster",
            "target": "dragon",
            "particleVelocityStart": 100,
            "particleLifetime": 100,
            "subParticleTemplate": {
                "kind": "Spraying",
                "positionSpawning": [10, 5],
                "particleAngleStart": 0,
                "particleAngleEnd": 20,
                "particleLifetime": 250,
                "texture": "smoke.webp"
            }
        }"#,
    );
    let mut template = build(TemplateKind::Missile, &config, &scene, &mut rng);
    let main = poll(&mut template, &scene, &mut rng).unwrap();

    // Heading 0: backwards is -x, left is +y
    let trail = poll(&mut template, &scene, &mut rng).unwrap();
    let trail = trail.borrow();
    assert_close(trail.position().x, -10.0);
    assert_close(trail.position().y, 5.0);
    let (start, end) = travel_angles(&trail);
    assert_close(start, 180.0);
    assert_close(end, 200.0);
    assert_eq!(trail.renderable.texture().as_str(), "smoke.webp");
    drop(trail);

    // Simulate the integrator moving and turning the missile
    {
        let mut main = main.borrow_mut();
        main.renderable.set_position(200.0, 0.0);
        if let Motion::Spraying {
            heading_degrees, ..
        } = &mut main.motion
        {
            *heading_degrees = 90.0;
        }
    }
    let trail = poll(&mut template, &scene, &mut rng).unwrap();
    let trail = trail.borrow();
    assert_close(trail.position().x, 195.0);
    assert_close(trail.position().y, -10.0);
    assert_close(travel_angles(&trail).0, 270.0);
}

#[test]
fn test_graviting_trail_orbits_missile() {
    let scene = missile_scene();
    let mut rng = rng(14);
    let config = config(
        r#"{
            "source": "caster",
            "target": "dragon",
            "particleVelocityStart": 100,
            "particleLifetime": 100,
            "subParticleTemplate": {
                "kind": "Graviting",
                "particleAngleStart": 30,
                "particleRadiusStart": 8,
                "particleVelocityStart": 360,
                "particleLifetime": 500
            }
        }"#,
    );
    let mut template = build(TemplateKind::Missile, &config, &scene, &mut rng);
    let main = poll(&mut template, &scene, &mut rng).unwrap();
    main.borrow_mut().renderable.set_position(40.0, 0.0);

    let trail = poll(&mut template, &scene, &mut rng).unwrap();
    let trail = trail.borrow();
    match &trail.motion {
        Motion::Graviting {
            center,
            angle_degrees,
            ..
        } => {
            assert_close(*angle_degrees, 210.0);
            assert!(matches!(center, OrbitCenter::Live(_)));
            assert_eq!(center.anchor(&scene), Some(Anchor::new(40.0, 0.0, 0.0)));
        }
        Motion::Spraying { .. } => panic!("Expected graviting motion"),
    }
}

#[test]
fn test_trail_stops_when_main_is_released() {
    let scene = missile_scene();
    let mut rng = rng(15);
    let config = config(
        r#"{
            "source": "caster",
            "target": "dragon",
            "particleVelocityStart": 100,
            "particleLifetime": 100,
            "subParticleTemplate": {"kind": "Spraying", "particleLifetime": 250}
        }"#,
    );
    let mut template = build(TemplateKind::Missile, &config, &scene, &mut rng);
    let main = poll(&mut template, &scene, &mut rng).unwrap();
    assert!(poll(&mut template, &scene, &mut rng).is_some());

    drop(main);
    assert!(poll(&mut template, &scene, &mut rng).is_none());
}
