//! Global runtime parameters for the simulation.
//!
//! `Parameters` holds the live values fed in through the configuration
//! surface: particle field settings, the ambient pointer interaction,
//! connection graph radius, speed scalar and the RNG seed.

use crate::simulation::modes::InteractionMode;
use crate::simulation::particle::ParticleKind;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub count: usize, // particle count
    pub kind: ParticleKind, // particle visual type
    pub mass: f64, // particle mass
    pub gravity: bool, // particles fall and rest on the floor
    pub mode: InteractionMode, // ambient pointer-driven mode
    pub strength: f64, // interaction strength
    pub radius: f64, // interaction radius around the pointer / emitter
    pub connection_radius: f64, // connection graph radius
    pub speed: f64, // simulation speed scalar
    pub seed: u64, // deterministic seed to make runs reproducable
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            count: 200,
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
}
