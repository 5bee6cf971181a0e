//! Build a fully-initialized simulation from configuration.
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime
//! [`Simulation`]: sanitized parameters, the spawned particle field, and
//! the initial bodies and emitters with their colors resolved. The only
//! fatal condition is a degenerate drawing surface — that is a
//! construction-time configuration error, reported once, never per tick.

use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::{color_or_random, ScenarioConfig};
use crate::simulation::engine::Simulation;
use crate::simulation::states::{Bounds, FVec2};

pub fn build_scenario(cfg: ScenarioConfig) -> Result<Simulation> {
    if cfg.surface.width <= 0.0 || cfg.surface.height <= 0.0 {
        bail!(
            "drawing surface must have positive dimensions, got {}x{}",
            cfg.surface.width,
            cfg.surface.height
        );
    }
    let bounds = Bounds::new(cfg.surface.width, cfg.surface.height);
    let parameters = cfg.parameters.sanitize();

    // Boundary RNG for resolving spawn colors; seeded like the engine's
    // own RNG so a scenario is reproducible end to end.
    let mut rng = StdRng::seed_from_u64(parameters.seed);

    let mut sim = Simulation::new(bounds, parameters);

    for bc in &cfg.bodies {
        let color = color_or_random(bc.color.as_deref(), &mut rng);
        sim.spawn_body(
            bc.shape,
            bc.size,
            bc.mass,
            color,
            Some(FVec2::new(bc.x, bc.y)),
        );
    }

    for ec in &cfg.emitters {
        let color = color_or_random(ec.color.as_deref(), &mut rng);
        sim.spawn_emitter(
            ec.mode,
            ec.strength,
            ec.radius,
            ec.physics,
            color,
            Some(FVec2::new(ec.x, ec.y)),
        );
    }

    Ok(sim)
}
