use fieldsim::simulation::collision;
use fieldsim::{
    build_scenario, Bounds, DrawCmd, ForceEmitter, FVec2, InteractionMode, Parameters, Particle,
    ParticleKind, RecordingSurface, Rgba, ScenarioConfig, ShapeKind, Simulation, NullSurface,
};
use fieldsim::configuration::config::{parse_color, color_or_random, ParamsConfig, SurfaceConfig};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Parameters with the ambient machinery switched off.
pub fn quiet_params() -> Parameters {
    Parameters {
        count: 0,
        gravity: false,
        mode: InteractionMode::None,
        connection_radius: 0.0,
        speed: 1.0,
        seed: 42,
        ..Parameters::default()
    }
}

/// Empty simulation on a surface of the given size.
pub fn empty_sim(width: f64, height: f64) -> Simulation {
    Simulation::new(Bounds::new(width, height), quiet_params())
}

/// A particle with everything inert except what the test sets.
pub fn particle_at(x: f64, y: f64, vx: f64, vy: f64, radius: f64) -> Particle {
    Particle {
        x: FVec2::new(x, y),
        v: FVec2::new(vx, vy),
        radius,
        base_radius: radius,
        m: 1.0,
        gravity: false,
        color: Rgba::opaque(0.5, 0.5, 0.5),
        highlighted: false,
        kind: ParticleKind::Default,
        link: None,
    }
}

pub fn disc_body(x: f64, y: f64, vx: f64, vy: f64, size: f64, m: f64) -> fieldsim::RigidBody {
    let mut b = fieldsim::RigidBody::new(
        FVec2::new(x, y),
        ShapeKind::Disc,
        size,
        m,
        Rgba::opaque(0.8, 0.8, 0.8),
    );
    b.v = FVec2::new(vx, vy);
    b
}

fn kinetic_energy(m: f64, v: FVec2) -> f64 {
    0.5 * m * v.norm_squared()
}

// ==================================================================================
// Particle invariant tests
// ==================================================================================

#[test]
fn particle_invariants_hold_after_ticks() {
    let params = Parameters {
        count: 150,
        ..quiet_params()
    };
    let mut sim = Simulation::new(Bounds::new(400.0, 300.0), params);
    let mut surface = NullSurface;

    for _ in 0..120 {
        sim.tick(1.0, &mut surface);
    }

    for p in &sim.particles {
        assert!(
            (1.0..=10.0).contains(&p.radius),
            "radius out of band: {}",
            p.radius
        );
        for c in [p.v.x, p.v.y] {
            assert!(
                c == 0.0 || (0.1..=10.0).contains(&c.abs()),
                "velocity component out of band: {}",
                c
            );
        }
        assert!((0.0..=400.0).contains(&p.x.x), "x escaped: {}", p.x.x);
        assert!((0.0..=300.0).contains(&p.x.y), "y escaped: {}", p.x.y);
    }
}

#[test]
fn particle_bounces_off_right_wall_and_returns() {
    let mut sim = empty_sim(100.0, 100.0);
    sim.particles.push(particle_at(10.0, 10.0, 1.0, 0.0, 1.0));
    let mut surface = NullSurface;

    let mut max_x: f64 = 0.0;
    for _ in 0..600 {
        sim.tick(1.0, &mut surface);
        let x = sim.particles[0].x.x;
        assert!((1.0..=99.0).contains(&x), "left the band: {}", x);
        max_x = max_x.max(x);
    }

    assert!(max_x > 98.5, "never reached the right wall, max {}", max_x);
    assert!(
        sim.particles[0].x.x < 95.0,
        "did not come back toward the start, at {}",
        sim.particles[0].x.x
    );
}

#[test]
fn gravity_particle_rests_on_floor() {
    let mut sim = empty_sim(100.0, 100.0);
    let mut p = particle_at(50.0, 80.0, 2.0, 3.0, 5.0);
    p.gravity = true;
    sim.particles.push(p);
    let mut surface = NullSurface;

    for _ in 0..200 {
        sim.tick(1.0, &mut surface);
    }

    let p = &sim.particles[0];
    assert!(
        (p.x.y - 95.0).abs() < 1e-9,
        "not resting on the floor: {}",
        p.x.y
    );
    // Gravity re-adds a small vy each tick before the clamp; resting
    // means it never accumulates past a single tick's worth.
    assert!(p.v.y.abs() <= 0.2 + 1e-9, "still falling: {}", p.v.y);
}

// ==================================================================================
// Link tests
// ==================================================================================

#[test]
fn linking_is_symmetric_and_exclusive() {
    let params = Parameters {
        count: 10,
        ..quiet_params()
    };
    let mut sim = Simulation::new(Bounds::new(400.0, 300.0), params);

    sim.link_particles(2, 5);
    assert_eq!(sim.particles[2].link, Some(5));
    assert_eq!(sim.particles[5].link, Some(2));

    // Relinking 2 severs the old pair on both sides.
    sim.link_particles(2, 7);
    assert_eq!(sim.particles[2].link, Some(7));
    assert_eq!(sim.particles[7].link, Some(2));
    assert_eq!(sim.particles[5].link, None);

    // Symmetry holds globally.
    for (i, p) in sim.particles.iter().enumerate() {
        if let Some(j) = p.link {
            assert_eq!(sim.particles[j].link, Some(i), "asymmetric link {} -> {}", i, j);
        }
    }

    // Self-links are refused.
    sim.link_particles(3, 3);
    assert_eq!(sim.particles[3].link, None);
}

#[test]
fn overstretched_link_pulls_back() {
    let mut sim = empty_sim(400.0, 300.0);
    sim.particles.push(particle_at(50.0, 150.0, 0.0, 0.0, 2.0));
    sim.particles.push(particle_at(200.0, 150.0, 0.0, 0.0, 2.0));
    sim.link_particles(0, 1);
    let mut surface = NullSurface;

    let before = (sim.particles[0].x - sim.particles[1].x).norm();
    sim.tick(1.0, &mut surface);
    let after = (sim.particles[0].x - sim.particles[1].x).norm();

    assert!(after < before, "link did not pull: {} -> {}", before, after);
}

// ==================================================================================
// Collision tests
// ==================================================================================

#[test]
fn particle_body_collision_never_gains_energy() {
    let mut p = particle_at(50.0, 50.0, 3.0, 0.0, 5.0);
    let mut b = disc_body(60.0, 50.0, -2.0, 0.0, 10.0, 4.0);

    let before = kinetic_energy(p.m, p.v) + kinetic_energy(b.m, b.v);
    collision::particle_body(&mut p, &mut b);
    let after = kinetic_energy(p.m, p.v) + kinetic_energy(b.m, b.v);

    assert!(
        after <= before + 1e-9,
        "energy grew: {} -> {}",
        before,
        after
    );
}

#[test]
fn body_body_collision_never_gains_energy() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut a = disc_body(40.0, 50.0, 4.0, 1.0, 10.0, 2.0);
    let mut b = disc_body(55.0, 50.0, -3.0, 0.0, 10.0, 5.0);

    let before = kinetic_energy(a.m, a.v) + kinetic_energy(b.m, b.v);
    collision::body_body(&mut a, &mut b, &mut rng);
    let after = kinetic_energy(a.m, a.v) + kinetic_energy(b.m, b.v);

    assert!(
        after <= before + 1e-9,
        "energy grew: {} -> {}",
        before,
        after
    );
}

#[test]
fn head_on_equal_mass_bodies_rebound_at_restitution() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut a = disc_body(40.0, 50.0, 5.0, 0.0, 10.0, 1.0);
    let mut b = disc_body(55.0, 50.0, -5.0, 0.0, 10.0, 1.0);

    collision::body_body(&mut a, &mut b, &mut rng);

    // e = 0.8: each 5 -> 4, directions reversed, momentum conserved.
    assert!((a.v.x + 4.0).abs() < 1e-9, "a.vx = {}", a.v.x);
    assert!((b.v.x - 4.0).abs() < 1e-9, "b.vx = {}", b.v.x);
    assert!(
        (a.v.x * a.m + b.v.x * b.m).abs() < 1e-9,
        "momentum not conserved"
    );
}

#[test]
fn overlapping_pair_separates() {
    let mut p = particle_at(50.0, 50.0, 0.0, 0.0, 5.0);
    let mut b = disc_body(58.0, 50.0, 0.0, 0.0, 10.0, 4.0);

    let before = (b.x - p.x).norm();
    collision::particle_body(&mut p, &mut b);
    let after = (b.x - p.x).norm();

    assert!(after > before, "pair kept sinking: {} -> {}", before, after);
}

#[test]
fn coincident_centers_are_skipped() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut a = disc_body(50.0, 50.0, 1.0, 0.0, 10.0, 1.0);
    let mut b = disc_body(50.0, 50.0, -1.0, 0.0, 10.0, 1.0);

    collision::body_body(&mut a, &mut b, &mut rng);

    // Degenerate geometry: the pair is left alone for this tick.
    assert_eq!(a.v.x, 1.0);
    assert_eq!(b.v.x, -1.0);
}

// ==================================================================================
// Drag state machine tests
// ==================================================================================

#[test]
fn dragged_body_stays_pinned_through_ticks() {
    let mut sim = empty_sim(400.0, 300.0);
    sim.spawn_body(
        ShapeKind::Disc,
        20.0,
        4.0,
        Rgba::WHITE,
        Some(FVec2::new(100.0, 100.0)),
    );
    sim.set_pointer(Some(FVec2::new(100.0, 100.0)));
    sim.pointer_down();
    assert!(sim.bodies[0].drag.is_dragging());

    let mut surface = NullSurface;
    for _ in 0..30 {
        sim.tick(1.0, &mut surface);
        assert_eq!(sim.bodies[0].v, FVec2::zeros(), "velocity not pinned");
        assert_eq!(sim.bodies[0].angular_v, 0.0, "spin not pinned");
    }

    sim.pointer_up();
    assert!(!sim.bodies[0].drag.is_dragging());
}

#[test]
fn released_body_gets_throw_velocity() {
    let mut sim = empty_sim(400.0, 300.0);
    sim.spawn_body(
        ShapeKind::Disc,
        20.0,
        4.0,
        Rgba::WHITE,
        Some(FVec2::new(100.0, 100.0)),
    );
    sim.set_pointer(Some(FVec2::new(100.0, 100.0)));
    sim.pointer_down();

    // Drag to a new spot; the drag update happens inside the tick.
    sim.set_pointer(Some(FVec2::new(140.0, 120.0)));
    let mut surface = NullSurface;
    sim.tick(1.0, &mut surface);
    assert_eq!(sim.bodies[0].x, FVec2::new(140.0, 120.0));

    sim.pointer_up();
    // Half the net displacement.
    assert!((sim.bodies[0].v.x - 20.0).abs() < 1e-9, "vx = {}", sim.bodies[0].v.x);
    assert!((sim.bodies[0].v.y - 10.0).abs() < 1e-9, "vy = {}", sim.bodies[0].v.y);
}

#[test]
fn hit_test_prefers_bodies_over_emitters() {
    let mut sim = empty_sim(400.0, 300.0);
    sim.spawn_emitter(
        InteractionMode::Attract,
        5.0,
        100.0,
        false,
        Rgba::WHITE,
        Some(FVec2::new(105.0, 100.0)),
    );
    sim.spawn_body(
        ShapeKind::Disc,
        20.0,
        4.0,
        Rgba::WHITE,
        Some(FVec2::new(100.0, 100.0)),
    );

    // Inside both pick areas.
    sim.set_pointer(Some(FVec2::new(108.0, 100.0)));
    sim.pointer_down();

    assert!(sim.bodies[0].drag.is_dragging());
    assert!(!sim.emitters[0].drag.is_dragging());

    // One drag at a time: a second press changes nothing.
    sim.pointer_down();
    assert!(!sim.emitters[0].drag.is_dragging());
}

#[test]
fn pointer_up_without_drag_is_harmless() {
    let mut sim = empty_sim(400.0, 300.0);
    sim.pointer_up();
    sim.set_pointer(None);
    sim.pointer_up();
}

// ==================================================================================
// Emitter / interaction mode tests
// ==================================================================================

#[test]
fn attract_emitter_pulls_particle_toward_it() {
    let mut rng = StdRng::seed_from_u64(1);
    let emitter = ForceEmitter::new(
        FVec2::new(150.0, 100.0),
        InteractionMode::Attract,
        5.0,
        100.0,
        false,
        Rgba::WHITE,
    );
    let mut p = particle_at(100.0, 100.0, 0.0, 0.0, 3.0);

    emitter.affect(&mut p, 0.0, &mut rng);

    // The emitter sits at +x; the particle must accelerate toward it.
    assert!(p.v.x > 0.0, "not pulled toward the emitter: {}", p.v.x);
    assert_eq!(p.v.y, 0.0);
    assert!(p.highlighted, "affected particle must be highlighted");
}

#[test]
fn out_of_range_particle_is_untouched() {
    let mut rng = StdRng::seed_from_u64(1);
    let emitter = ForceEmitter::new(
        FVec2::new(150.0, 100.0),
        InteractionMode::Explode,
        5.0,
        30.0,
        false,
        Rgba::WHITE,
    );
    let mut p = particle_at(100.0, 100.0, 0.0, 0.0, 3.0);

    emitter.affect(&mut p, 0.0, &mut rng);

    assert_eq!(p.v, FVec2::zeros());
    assert!(!p.highlighted);
}

#[test]
fn swirl_velocity_is_tangent() {
    let mut rng = StdRng::seed_from_u64(1);
    let emitter = ForceEmitter::new(
        FVec2::new(100.0, 100.0),
        InteractionMode::Swirl,
        5.0,
        100.0,
        false,
        Rgba::WHITE,
    );
    let mut p = particle_at(140.0, 100.0, 0.0, 0.0, 3.0);

    emitter.affect(&mut p, 0.0, &mut rng);

    let radial = p.x - FVec2::new(100.0, 100.0);
    assert!(p.v.norm() > 0.0, "swirl left the particle stationary");
    assert!(
        p.v.dot(&radial).abs() < 1e-9,
        "swirl velocity not perpendicular to the radius"
    );
}

#[test]
fn merge_and_split_respect_radius_caps() {
    let mut rng = StdRng::seed_from_u64(1);
    let merger = ForceEmitter::new(
        FVec2::new(100.0, 100.0),
        InteractionMode::Merge,
        5.0,
        100.0,
        false,
        Rgba::WHITE,
    );
    let mut p = particle_at(120.0, 100.0, 2.0, 0.0, 5.0);
    for _ in 0..500 {
        merger.affect(&mut p, 0.0, &mut rng);
    }
    assert!(p.radius <= 20.0, "merge overgrew: {}", p.radius);
    assert!(p.radius > 19.0, "merge never approached its cap: {}", p.radius);

    let splitter = ForceEmitter::new(
        FVec2::new(100.0, 100.0),
        InteractionMode::Split,
        5.0,
        100.0,
        false,
        Rgba::WHITE,
    );
    for _ in 0..500 {
        splitter.affect(&mut p, 0.0, &mut rng);
    }
    assert!(p.radius >= 1.0, "split under-shrank: {}", p.radius);

    // Blending kept every channel in range.
    for c in [p.color.r, p.color.g, p.color.b, p.color.a] {
        assert!((0.0..=1.0).contains(&c), "channel out of range: {}", c);
    }
}

#[test]
fn pulse_keeps_radius_in_band() {
    let mut rng = StdRng::seed_from_u64(1);
    let pulser = ForceEmitter::new(
        FVec2::new(100.0, 100.0),
        InteractionMode::Pulse,
        20.0,
        100.0,
        false,
        Rgba::WHITE,
    );
    let mut p = particle_at(110.0, 100.0, 0.0, 0.0, 5.0);

    for i in 0..400 {
        pulser.affect(&mut p, i as f64, &mut rng);
        assert!(
            (1.0..=10.0).contains(&p.radius),
            "pulse pushed radius out of band: {}",
            p.radius
        );
    }
}

// ==================================================================================
// Clear / lifecycle tests
// ==================================================================================

#[test]
fn clear_all_is_idempotent() {
    let params = Parameters {
        count: 20,
        ..quiet_params()
    };
    let mut sim = Simulation::new(Bounds::new(400.0, 300.0), params);
    sim.spawn_body(ShapeKind::Square, 20.0, 4.0, Rgba::WHITE, None);
    sim.spawn_emitter(InteractionMode::Repel, 5.0, 100.0, false, Rgba::WHITE, None);
    sim.link_particles(0, 1);

    sim.clear_all();
    let t1 = sim.telemetry();
    sim.clear_all();
    let t2 = sim.telemetry();

    for t in [t1, t2] {
        assert_eq!(t.particles, 0);
        assert_eq!(t.bodies, 0);
        assert_eq!(t.emitters, 0);
    }

    // A tick on the empty world is fine.
    let mut surface = NullSurface;
    sim.tick(1.0, &mut surface);
}

#[test]
fn rebuild_severs_links() {
    let params = Parameters {
        count: 10,
        ..quiet_params()
    };
    let mut sim = Simulation::new(Bounds::new(400.0, 300.0), params);
    sim.link_particles(0, 9);

    sim.set_particle_count(5);

    assert_eq!(sim.particles.len(), 5);
    for p in &sim.particles {
        assert_eq!(p.link, None, "stale link survived the rebuild");
    }
}

// ==================================================================================
// Configuration boundary tests
// ==================================================================================

fn raw_params(count: usize) -> ParamsConfig {
    ParamsConfig {
        count,
        kind: ParticleKind::Default,
        mass: 1.0,
        gravity: false,
        mode: InteractionMode::None,
        strength: 5.0,
        radius: 100.0,
        connection_radius: 80.0,
        speed: 1.0,
        seed: 42,
    }
}

#[test]
fn sanitize_clamps_every_numeric() {
    let cfg = ParamsConfig {
        mass: -5.0,
        strength: 1000.0,
        radius: 1.0,
        connection_radius: -10.0,
        speed: 0.0,
        ..raw_params(0)
    };
    let p = cfg.sanitize();

    assert_eq!(p.count, 1);
    assert_eq!(p.mass, 0.1);
    assert_eq!(p.strength, 20.0);
    assert_eq!(p.radius, 10.0);
    assert_eq!(p.connection_radius, 0.0);
    assert_eq!(p.speed, 0.05);
}

#[test]
fn color_parsing_and_fallback() {
    let c = parse_color("#ff8000").expect("hex should parse");
    assert!((c.r - 1.0).abs() < 1e-3);
    assert!((c.g - 0.5).abs() < 2e-2);
    assert!((c.b - 0.0).abs() < 1e-3);

    let c2 = parse_color("rgb(255, 128, 0)").expect("rgb() should parse");
    assert_eq!(c, c2);

    assert_eq!(parse_color("not-a-color"), None);
    assert_eq!(parse_color("#12345"), None);
    assert_eq!(parse_color("rgb(1, 2)"), None);

    let mut rng = StdRng::seed_from_u64(1);
    let fallback = color_or_random(Some("hsl(bogus)"), &mut rng);
    for c in [fallback.r, fallback.g, fallback.b] {
        assert!((0.0..=1.0).contains(&c));
    }
    assert_eq!(fallback.a, 1.0);
}

#[test]
fn degenerate_surface_is_fatal_at_build() {
    let cfg = ScenarioConfig {
        surface: SurfaceConfig {
            width: 0.0,
            height: 720.0,
        },
        parameters: raw_params(10),
        bodies: Vec::new(),
        emitters: Vec::new(),
        spawn: Default::default(),
    };
    assert!(build_scenario(cfg).is_err());
}

#[test]
fn scenario_yaml_round_trip() {
    let yaml = r#"
surface:
  width: 640.0
  height: 480.0
parameters:
  count: 50
  kind: "plasma"
  mass: 1.0
  gravity: true
  mode: "swirl"
  strength: 5.0
  radius: 100.0
  connection_radius: 60.0
  speed: 1.0
emitters:
  - x: 320.0
    y: 240.0
    mode: "gravitate"
    strength: 4.0
    radius: 120.0
"#;
    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).expect("yaml should deserialize");
    let sim = build_scenario(cfg).expect("scenario should build");

    assert_eq!(sim.particles.len(), 50);
    assert_eq!(sim.emitters.len(), 1);
    assert_eq!(sim.emitters[0].mode, InteractionMode::Gravitate);
    assert!(sim.particles.iter().all(|p| p.gravity));
}

// ==================================================================================
// Rendering / connection graph tests
// ==================================================================================

#[test]
fn connection_lines_fade_with_distance() {
    let mut sim = empty_sim(400.0, 300.0);
    sim.set_connection_radius(80.0);
    sim.particles.push(particle_at(50.0, 50.0, 0.0, 0.0, 2.0));
    sim.particles.push(particle_at(90.0, 50.0, 0.0, 0.0, 2.0));

    let mut surface = RecordingSurface::new();
    sim.tick(1.0, &mut surface);

    // Distance 40 at radius 80 -> alpha 0.5, drawn at width 1.
    let line = surface
        .lines()
        .find_map(|c| match c {
            DrawCmd::Line { color, width, .. } if *width == 1.0 => Some(*color),
            _ => None,
        })
        .expect("expected a connection line");
    assert!((line.a - 0.5).abs() < 1e-6, "alpha = {}", line.a);
}

#[test]
fn explicit_links_are_drawn_regardless_of_distance() {
    let mut sim = empty_sim(400.0, 300.0);
    sim.set_connection_radius(0.0); // no proximity lines, only the link
    sim.particles.push(particle_at(20.0, 50.0, 0.0, 0.0, 2.0));
    sim.particles.push(particle_at(380.0, 250.0, 0.0, 0.0, 2.0));
    sim.link_particles(0, 1);

    let mut surface = RecordingSurface::new();
    sim.tick(1.0, &mut surface);

    let link_lines = surface
        .lines()
        .filter(|c| matches!(c, DrawCmd::Line { width, .. } if *width == 2.0))
        .count();
    assert_eq!(link_lines, 1, "expected exactly one highlighted link line");
}

#[test]
fn every_entity_is_drawn() {
    let params = Parameters {
        count: 3,
        ..quiet_params()
    };
    let mut sim = Simulation::new(Bounds::new(400.0, 300.0), params);
    sim.spawn_body(ShapeKind::Triangle, 20.0, 4.0, Rgba::WHITE, None);
    sim.spawn_emitter(InteractionMode::None, 5.0, 100.0, false, Rgba::WHITE, None);

    let mut surface = RecordingSurface::new();
    sim.tick(1.0, &mut surface);

    let discs = surface.discs().count();
    // 3 particles + 2 emitter discs (field + core).
    assert_eq!(discs, 5, "disc draw count was {}", discs);
    let polys = surface
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCmd::Polygon { .. }))
        .count();
    assert_eq!(polys, 1, "triangle body should draw one polygon");
    assert!(
        matches!(surface.commands.first(), Some(DrawCmd::Clear(_))),
        "tick must clear the surface first"
    );
}

// ==================================================================================
// Determinism tests
// ==================================================================================

#[test]
fn seeded_runs_are_reproducible() {
    let params = Parameters {
        count: 50,
        mode: InteractionMode::Scatter,
        ..quiet_params()
    };
    let mut a = Simulation::new(Bounds::new(400.0, 300.0), params.clone());
    let mut b = Simulation::new(Bounds::new(400.0, 300.0), params);
    let mut surface = NullSurface;

    for _ in 0..50 {
        a.tick(1.0, &mut surface);
        b.tick(1.0, &mut surface);
    }

    for (p, q) in a.particles.iter().zip(b.particles.iter()) {
        assert_eq!(p.x, q.x, "positions diverged");
        assert_eq!(p.v, q.v, "velocities diverged");
    }
}
