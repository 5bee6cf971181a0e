//! Interaction modes: the shared force vocabulary.
//!
//! One closed enum covers every force effect a source (the ambient
//! pointer or a placed emitter) can apply to a particle, and a single
//! dispatch function evaluates it. Adding a mode means adding a variant
//! here and a match arm in [`apply`]; the compiler checks exhaustiveness.

use rand::rngs::StdRng;
use rand::Rng;

use crate::simulation::color::Rgba;
use crate::simulation::particle::{Particle, RADIUS_MAX, RADIUS_MIN};
use crate::simulation::states::FVec2;

/// Largest radius the Merge mode may grow a particle to. Above the
/// ordinary [`RADIUS_MAX`] on purpose: merged blobs are allowed to be fat.
pub const MERGE_RADIUS_MAX: f64 = 20.0;

/// Separations below this skip direction-dependent effects for the tick.
const MIN_DIST: f64 = 1e-6;

/// Force effect applied by a pointer or emitter to nearby particles.
#[derive(serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    #[default]
    None,
    Pulse,
    Explode,
    Attract,
    Repel,
    Swirl,
    Scatter,
    Gravitate,
    Merge,
    Split,
    Connect,
}

/// Apply `mode` from a source at `source` to `p`.
///
/// `force` is the proximity falloff in [0, 1] computed by the caller as
/// `(radius - distance) / radius`; `strength` is the configured scalar.
/// `t` drives time-based effects (Pulse), `rng` the stochastic ones.
pub fn apply(
    mode: InteractionMode,
    p: &mut Particle,
    source: FVec2,
    force: f64,
    strength: f64,
    t: f64,
    rng: &mut StdRng,
) {
    // d points from the source to the particle.
    let d = p.x - source;
    let dist = d.norm();

    match mode {
        InteractionMode::None => {}

        // Radius oscillates around the spawn radius, amplitude grows
        // with strength. Stays inside the ordinary radius band.
        InteractionMode::Pulse => {
            let wave = (t * 0.2).sin() * 0.3 * strength * force;
            p.radius = (p.base_radius + wave).clamp(RADIUS_MIN, RADIUS_MAX);
        }

        // Push straight away from the source.
        InteractionMode::Explode => {
            p.v += d * (0.05 * force * strength);
        }

        // Gentle pull toward the source.
        InteractionMode::Attract => {
            p.v -= d * (0.01 * force * strength);
        }

        InteractionMode::Repel => {
            p.v += d * (0.02 * force * strength);
        }

        // Velocity is replaced by the unit tangent, giving orbit-like
        // motion around the source.
        InteractionMode::Swirl => {
            if dist > MIN_DIST {
                let tangent = FVec2::new(-d.y, d.x) / dist;
                p.v = tangent * (0.1 * strength * force);
            }
        }

        InteractionMode::Scatter => {
            let jitter = FVec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            p.v += jitter * (0.5 * force * strength);
        }

        // Like Attract but five times harder.
        InteractionMode::Gravitate => {
            p.v -= d * (0.05 * force * strength);
        }

        // Grow, slow down, whiten.
        InteractionMode::Merge => {
            p.radius = (p.radius * 1.02).min(MERGE_RADIUS_MAX);
            p.v *= 0.9;
            p.color = p.color.blend(Rgba::WHITE, 0.04);
        }

        // Shrink (never below the floor), speed up, redden.
        InteractionMode::Split => {
            if p.radius > 2.0 {
                p.radius = (p.radius * 0.98).max(RADIUS_MIN);
            }
            p.v *= 1.1;
            p.color = p.color.blend(Rgba::RED, 0.04);
        }

        // No force at all; only marks link candidates for the renderer.
        InteractionMode::Connect => {
            p.highlighted = true;
        }
    }
}
