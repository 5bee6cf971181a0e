//! Headless throughput benches, printed as plain tables.
//!
//! Run with `fieldsim --bench`. Everything ticks against a
//! [`NullSurface`] so only simulation cost is measured.

use std::time::Instant;

use crate::simulation::engine::Simulation;
use crate::simulation::modes::InteractionMode;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Bounds, FVec2, ShapeKind};
use crate::simulation::color::Rgba;
use crate::visualization::surface::NullSurface;

const TICKS: usize = 60;

/// Tick cost over a particle-count ladder.
pub fn bench_tick() {
    let ns = [250, 500, 1000, 2000, 4000];

    for n in ns {
        let params = Parameters {
            count: n,
            connection_radius: 0.0, // isolate integration cost
            ..Parameters::default()
        };
        let mut sim = Simulation::new(Bounds::new(1280.0, 720.0), params);
        let mut surface = NullSurface;

        // Warm up
        for _ in 0..5 {
            sim.tick(1.0, &mut surface);
        }

        let t0 = Instant::now();
        for _ in 0..TICKS {
            sim.tick(1.0, &mut surface);
        }
        let per_tick = t0.elapsed().as_secs_f64() / TICKS as f64 * 1000.0;

        println!("N = {n:5}, tick = {per_tick:8.4} ms");
    }
}

/// Tick cost with rigid bodies and an emitter in play, so the pairwise
/// collision and force paths are exercised too.
pub fn bench_collision_pairs() {
    let body_counts = [4, 8, 16, 32];

    for bodies in body_counts {
        let params = Parameters {
            count: 500,
            connection_radius: 0.0,
            ..Parameters::default()
        };
        let mut sim = Simulation::new(Bounds::new(1280.0, 720.0), params);
        for i in 0..bodies {
            let x = 100.0 + (i as f64 * 37.0) % 1080.0;
            let y = 100.0 + (i as f64 * 53.0) % 520.0;
            sim.spawn_body(
                ShapeKind::Disc,
                20.0,
                4.0,
                Rgba::WHITE,
                Some(FVec2::new(x, y)),
            );
        }
        sim.spawn_emitter(
            InteractionMode::Swirl,
            6.0,
            200.0,
            false,
            Rgba::WHITE,
            None,
        );
        let mut surface = NullSurface;

        for _ in 0..5 {
            sim.tick(1.0, &mut surface);
        }

        let t0 = Instant::now();
        for _ in 0..TICKS {
            sim.tick(1.0, &mut surface);
        }
        let per_tick = t0.elapsed().as_secs_f64() / TICKS as f64 * 1000.0;

        println!("bodies = {bodies:3}, tick = {per_tick:8.4} ms");
    }
}
