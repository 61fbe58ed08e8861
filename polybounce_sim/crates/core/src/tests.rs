use super::*;
use crate::geometry::{MAX_CUSTOM_VERTICES, MIN_CUSTOM_VERTICES, OUTLINE_RADIUS};
use crate::physics::{apply_air_drag, bounce_axis, DEFAULT_GRAVITY_ACCELERATION};

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

#[test]
fn outlines_are_closed_with_documented_point_counts() {
    let cases = [
        (Shape::Triangle, 4),
        (Shape::Square, 5),
        (Shape::Circle, 51),
        (Shape::Custom(3), 4),
        (Shape::Custom(7), 8),
        (Shape::Custom(100), 101),
    ];
    for (shape, expected) in cases {
        let points = outline(shape).unwrap();
        assert_eq!(points.len(), expected, "{shape:?}");
        assert_eq!(points.len(), shape.point_count(), "{shape:?}");
        assert_eq!(points.first(), points.last(), "{shape:?} is not closed");
    }
}

#[test]
fn custom_outline_rejects_fewer_than_three_vertices() {
    assert_eq!(outline(Shape::Custom(2)), Err(GeometryError::InvalidVertexCount(2)));
    assert_eq!(outline(Shape::Custom(0)), Err(GeometryError::InvalidVertexCount(0)));
    for n in MIN_CUSTOM_VERTICES..=MAX_CUSTOM_VERTICES {
        assert_eq!(outline(Shape::Custom(n)).unwrap().len(), n as usize + 1);
    }
}

#[test]
fn ring_points_sit_on_the_outline_radius() {
    for point in outline(Shape::Circle).unwrap() {
        let r = (point.x * point.x + point.y * point.y).sqrt();
        assert!(approx(r, OUTLINE_RADIUS, 1e-5));
    }
    let hexagon = outline(Shape::Custom(6)).unwrap();
    assert!(approx(hexagon[0].x, OUTLINE_RADIUS, 1e-6));
    assert!(approx(hexagon[0].y, 0.0, 1e-6));
    assert!(approx(hexagon[3].x, -OUTLINE_RADIUS, 1e-5));
}

#[test]
fn shape_constructor_and_names() {
    assert_eq!(Shape::custom(1), Shape::Custom(3));
    assert_eq!(Shape::custom(500), Shape::Custom(100));
    assert_eq!(Shape::from_name("Circle", 0), Some(Shape::Circle));
    assert_eq!(Shape::from_name("custom", 12), Some(Shape::Custom(12)));
    assert_eq!(Shape::from_name("hexagon", 6), None);
    assert_eq!(Shape::Custom(9).label(), "custom (9-gon)");
}

#[test]
fn shape_deserializes_from_config_json() {
    let shape: Shape = serde_json::from_str(r#""square""#).unwrap();
    assert_eq!(shape, Shape::Square);
    let shape: Shape = serde_json::from_str(r#"{"custom": 8}"#).unwrap();
    assert_eq!(shape, Shape::Custom(8));
}

#[test]
fn viewport_bounds_follow_fov_depth_and_aspect() {
    let square = Viewport::new(1.0).bounds();
    let expected = (22.5f32).to_radians().tan() * 6.0;
    assert!(approx(square.half_height, expected, 1e-5));
    assert!(approx(square.half_width, expected, 1e-5));

    let wide = Viewport::from_size(1600, 800).bounds();
    assert!(approx(wide.half_width, expected * 2.0, 1e-5));
    assert!(approx(wide.half_height, expected, 1e-5));
}

#[test]
fn viewport_survives_degenerate_sizes() {
    let vp = Viewport::from_size(640, 0);
    assert_eq!(vp.aspect, 1.0);
    let mut vp = Viewport::new(f32::NAN);
    assert_eq!(vp.aspect, 1.0);
    vp.set_size(300, 150);
    assert!(approx(vp.aspect, 2.0, 1e-6));
    // minimized surfaces keep the last real aspect
    vp.set_size(0, 0);
    assert!(approx(vp.aspect, 2.0, 1e-6));
    vp.set_size(0, 150);
    vp.set_size(300, 0);
    assert!(approx(vp.aspect, 2.0, 1e-6));
}

#[test]
fn bounds_clamp_subtracts_scale() {
    let bounds = Bounds {
        half_width: 3.0,
        half_height: 2.0,
    };
    let clamped = bounds.clamp(Vec2::new(10.0, -10.0), 0.5);
    assert_eq!(clamped, Vec2::new(2.5, -1.5));
    assert!(bounds.contains(clamped, 0.5));
    // a shape bigger than the view is pinned to the center
    assert_eq!(bounds.limits(2.5), Vec2::new(0.5, 0.0));
    assert_eq!(bounds.clamp(Vec2::new(1.0, 1.0), 2.5), Vec2::new(0.5, 0.0));
}

#[test]
fn rng_streams_are_deterministic_and_independent() {
    let svc = RngService::with_seed(12345);
    let mut a1 = svc.stream("launch");
    let mut a2 = svc.stream("launch");
    let mut b = svc.stream("bounce");
    for _ in 0..10 {
        assert_eq!(a1.next_u64(), a2.next_u64());
    }
    assert_ne!(a1.next_u64(), b.next_u64());

    for _ in 0..1000 {
        let v = b.range_f32(0.02, 0.07);
        assert!((0.02..=0.07).contains(&v));
        let s = b.symmetric(0.0005);
        assert!((-0.0005..=0.0005).contains(&s));
    }
}

#[test]
fn bounce_axis_reflects_with_energy_loss() {
    let mut v = 0.1;
    assert_eq!(bounce_axis(2.7, &mut v, 2.5, 0.75), Some(2.5));
    assert!(approx(v, -0.075, 1e-7));

    let mut v = -0.2;
    assert_eq!(bounce_axis(-3.0, &mut v, 2.5, 0.75), Some(-2.5));
    assert!(approx(v, 0.15, 1e-7));

    let mut v = 0.1;
    assert_eq!(bounce_axis(2.5, &mut v, 2.5, 0.75), None);
    assert_eq!(v, 0.1);
}

#[test]
fn air_drag_is_quadratic_and_sign_preserving() {
    assert_eq!(apply_air_drag(0.0, 0.003, 1.0), 0.0);
    let slowed = apply_air_drag(0.5, 0.003, 1.0);
    assert!(approx(slowed, 0.5 - 0.25 * 0.003, 1e-7));
    let slowed = apply_air_drag(-0.5, 0.003, 1.0);
    assert!(approx(slowed, -0.5 + 0.25 * 0.003, 1e-7));
}

#[test]
fn gravity_controls_follow_toggle_rules() {
    let mut gravity = GravityConfig::default();
    assert_eq!(gravity.percentage(), 100);

    assert!(gravity.toggle_acceleration());
    assert_eq!(gravity.acceleration_rate, DEFAULT_GRAVITY_ACCELERATION);
    gravity.strength = 0.003;
    // stopping acceleration restores the user-selected strength
    assert!(!gravity.toggle_acceleration());
    assert_eq!(gravity.strength, 0.001);

    gravity.toggle_acceleration();
    assert!(!gravity.toggle());
    assert!(!gravity.accelerating);
    // acceleration cannot be switched on while gravity is off
    assert!(!gravity.toggle_acceleration());

    gravity.toggle();
    gravity.toggle_acceleration();
    gravity.set_strength(0.0025);
    assert!(!gravity.accelerating);
    assert_eq!(gravity.base_strength, 0.0025);
    assert_eq!(gravity.percentage(), 250);
    gravity.set_strength(1.0);
    assert_eq!(gravity.strength, gravity.max_strength);
}

#[test]
fn accelerating_gravity_is_capped() {
    let mut engine = PhysicsEngine::default();
    engine.gravity.toggle_acceleration();
    engine.gravity.acceleration_rate = 0.001;
    let mut rng = RngService::with_seed(1).stream("launch");
    engine.start(&mut rng);
    let mut transform = Transform::default();
    let bounds = Viewport::new(1.0).bounds();

    let report = engine.step(&mut transform, bounds, 1.0, 1.0, &mut rng);
    assert!(approx(report.gravity_strength.unwrap(), 0.002, 1e-7));
    for _ in 0..10 {
        engine.step(&mut transform, bounds, 1.0, 1.0, &mut rng);
    }
    assert_eq!(engine.gravity.strength, engine.gravity.max_strength);
}

#[test]
fn launch_velocity_ranges_depend_on_gravity() {
    for seed in 0..50 {
        let mut rng = RngService::with_seed(seed).stream("launch");
        let mut engine = PhysicsEngine::default();
        assert!(engine.start(&mut rng));
        assert!(!engine.start(&mut rng));
        let v = engine.motion.velocity;
        assert!((-0.02..=0.02).contains(&v.x));
        assert!((0.02..=0.07).contains(&v.y));

        let mut engine = PhysicsEngine::default();
        engine.gravity.toggle();
        engine.start(&mut rng);
        let v = engine.motion.velocity;
        assert!((-0.02..=0.02).contains(&v.y));
    }
}

#[test]
fn stop_zeroes_velocity() {
    let mut rng = RngService::with_seed(9).stream("launch");
    let mut engine = PhysicsEngine::default();
    assert!(!engine.stop());
    engine.start(&mut rng);
    assert!(engine.stop());
    assert_eq!(engine.motion, MotionState::default());
}

#[test]
fn drag_while_idle_only_moves() {
    let bounds = Viewport::new(1.0).bounds();
    let mut transform = Transform::default();
    let mut motion = MotionState::default();
    let mut drag = DragState::default();

    drag.press(Vec2::new(0.2, 0.1), transform.position);
    assert_eq!(drag.grab_offset, Vec2::new(0.2, 0.1));
    let impulse = drag.drag_to(Vec2::new(0.7, 0.1), &mut transform, &mut motion, bounds, 0.4);
    assert_eq!(impulse, None);
    assert!(approx(transform.position.x, 0.5, 1e-6));
    assert_eq!(motion.velocity, Vec2::ZERO);

    drag.release();
    let impulse = drag.drag_to(Vec2::new(5.0, 5.0), &mut transform, &mut motion, bounds, 0.4);
    assert_eq!(impulse, None);
    assert!(approx(transform.position.x, 0.5, 1e-6));
}

#[test]
fn drag_while_bouncing_adds_a_throw_impulse() {
    let bounds = Viewport::new(1.0).bounds();
    let mut transform = Transform::default();
    let mut motion = MotionState {
        velocity: Vec2::new(0.01, -0.02),
        is_auto_motion: true,
    };
    let mut drag = DragState::default();
    drag.press(Vec2::ZERO, transform.position);
    drag.drag_to(
        Vec2::new(0.1, 0.0),
        &mut transform,
        &mut motion,
        bounds,
        PointerKind::Mouse.drag_factor(),
    );
    assert!(approx(motion.velocity.x, 0.01 + 0.04, 1e-6));
    assert!(approx(motion.velocity.y, -0.02, 1e-7));
    assert!(approx(transform.position.x, 0.1, 1e-6));
}

#[test]
fn drag_target_is_clamped_before_the_impulse() {
    let bounds = Bounds {
        half_width: 2.0,
        half_height: 2.0,
    };
    let mut transform = Transform {
        position: Vec2::new(0.5, 0.0),
        ..Transform::default()
    };
    let mut motion = MotionState {
        velocity: Vec2::ZERO,
        is_auto_motion: true,
    };
    let mut drag = DragState::default();
    drag.press(Vec2::new(0.5, 0.0), transform.position);
    drag.drag_to(Vec2::new(9.0, 0.0), &mut transform, &mut motion, bounds, 0.45);
    assert_eq!(transform.position.x, 1.0);
    assert!(approx(motion.velocity.x, 0.5 * 0.45, 1e-6));
}

#[test]
fn command_queue_drains_in_order() {
    let mut queue = CommandQueue::new();
    queue.push(Command::StartBounce);
    queue.extend([Command::ToggleGravity, Command::StopBounce]);
    assert_eq!(queue.len(), 3);
    assert_eq!(
        queue.drain(),
        vec![Command::StartBounce, Command::ToggleGravity, Command::StopBounce]
    );
    assert!(queue.is_empty());
}

#[test]
fn commands_wait_for_the_next_rendered_tick() {
    let mut sim = Simulation::new(SimSettings::default()).unwrap();
    sim.submit(Command::SetShape(Shape::Square));
    sim.submit(Command::SetFrameRate(FrameRate::Capped(30)));
    // frame rate is configuration and applies at once
    assert_eq!(sim.frame_rate(), FrameRate::Capped(30));
    assert_eq!(sim.pending_commands(), 1);
    assert_eq!(sim.shape(), Shape::Triangle);

    // too early for a 30 fps frame: skipped, nothing applied
    assert!(sim.advance(10.0).is_none());
    assert_eq!(sim.shape(), Shape::Triangle);

    let frame = sim.advance(40.0).unwrap();
    assert_eq!(sim.shape(), Shape::Square);
    assert!(frame.outline_changed);
    assert_eq!(sim.outline().len(), 5);
    assert_eq!(sim.pending_commands(), 0);
}

#[test]
fn custom_vertex_changes_regenerate_only_the_custom_shape() {
    let mut sim = Simulation::new(SimSettings::default()).unwrap();
    sim.apply(Command::SetCustomVertices(250));
    assert_eq!(sim.custom_vertices(), 100);
    assert_eq!(sim.shape(), Shape::Triangle);

    sim.apply(Command::SetShape(Shape::Custom(sim.custom_vertices())));
    assert_eq!(sim.outline().len(), 101);
    sim.apply(Command::SetCustomVertices(1));
    assert_eq!(sim.shape(), Shape::Custom(3));
    assert_eq!(sim.outline().len(), 4);
}

#[test]
fn drag_impulse_lands_before_physics_in_the_same_tick() {
    let mut sim = Simulation::new(SimSettings::default()).unwrap();
    sim.advance(20.0).unwrap();
    sim.submit(Command::StartBounce);
    sim.advance(40.0).unwrap();
    assert!(sim.is_bouncing());

    let start = sim.transform().position;
    let v0 = sim.motion().velocity.x;
    sim.submit(Command::PointerPressed { world: start });
    sim.submit(Command::PointerMoved {
        world: start + Vec2::new(0.5, 0.0),
        kind: PointerKind::Mouse,
    });
    sim.advance(60.0).unwrap();

    let v1 = sim.motion().velocity.x;
    assert!(v1 > v0 + 0.19, "impulse missing: {v0} -> {v1}");
    // the physics step of the same tick already carried the thrown velocity
    assert!(sim.transform().position.x > start.x + 0.5 + 0.2);
}

#[test]
fn scale_change_reclamps_the_position() {
    let mut sim = Simulation::new(SimSettings::default()).unwrap();
    sim.set_position(Vec2::new(100.0, 100.0));
    let limit = sim.bounds().limits(1.0);
    assert_eq!(sim.transform().position, limit);

    sim.apply(Command::SetScale(2.0));
    let limit = sim.bounds().limits(2.0);
    assert_eq!(sim.transform().position, limit);

    sim.apply(Command::SetScale(50.0));
    assert_eq!(sim.transform().scale, 3.0);
}

#[test]
fn position_survives_a_minimize_and_restore() {
    let mut sim = Simulation::new(SimSettings::default()).unwrap();
    sim.set_position(Vec2::new(100.0, 0.0));
    let before = sim.transform().position;
    assert_eq!(before.x, sim.bounds().limits(1.0).x);

    sim.submit(Command::Resize { width: 0, height: 0 });
    sim.advance(20.0).unwrap();
    assert_eq!(sim.transform().position, before);

    sim.submit(Command::Resize {
        width: 800,
        height: 600,
    });
    sim.advance(40.0).unwrap();
    assert_eq!(sim.transform().position, before);
}
