//! Impulse-based pairwise collision resolution.
//!
//! Both pair kinds share the same scheme: an impulse along the collision
//! normal computed from the combined inverse masses and the restitution
//! coefficient, applied equal-and-opposite, followed by a positional
//! separation proportional to the other body's mass share so overlapping
//! pairs do not sink into each other. Dragged entities act as immovable
//! (zero inverse mass): they push, they are never pushed.
//!
//! Pair iteration lives in the orchestrator and follows insertion order;
//! resolution is order-dependent when more than two overlap in one tick,
//! so that order is part of the observable behavior.

use rand::rngs::StdRng;
use rand::Rng;

use crate::simulation::particle::Particle;
use crate::simulation::rigid_body::RigidBody;

pub const PARTICLE_BODY_RESTITUTION: f64 = 0.5;
pub const BODY_BODY_RESTITUTION: f64 = 0.8;

/// Extra post-impulse damping to bleed energy out of particle hits.
const PARTICLE_DAMPING: f64 = 0.85;
const BODY_DAMPING: f64 = 0.95;

/// Scale of the random angular kick injected by body-body impacts.
const ANGULAR_KICK: f64 = 0.01;

/// Coincident centers: skip the pair for this tick.
const MIN_SEPARATION: f64 = 1e-6;

/// Resolve one particle against one rigid body.
pub fn particle_body(p: &mut Particle, b: &mut RigidBody) {
    let delta = b.x - p.x;
    let dist = delta.norm();
    let min_dist = p.radius + b.size;
    if dist >= min_dist || dist < MIN_SEPARATION {
        return;
    }

    let n = delta / dist; // collision normal, particle -> body
    let inv_mp = 1.0 / p.m;
    let inv_mb = if b.drag.is_dragging() { 0.0 } else { 1.0 / b.m };

    // Relative velocity along the normal; positive means approaching.
    let vrel = (p.v - b.v).dot(&n);
    if vrel > 0.0 {
        let j = (1.0 + PARTICLE_BODY_RESTITUTION) * vrel / (inv_mp + inv_mb);
        p.v -= n * (j * inv_mp);
        b.v += n * (j * inv_mb);

        p.v *= PARTICLE_DAMPING;
        b.v *= BODY_DAMPING;
    }

    // Separate along the normal, each moving by the other's mass share.
    let overlap = min_dist - dist;
    let total = p.m + b.m;
    p.x -= n * (overlap * (b.m / total));
    if !b.drag.is_dragging() {
        b.x += n * (overlap * (p.m / total));
    }
}

/// Resolve one rigid body pair. Same impulse scheme at higher
/// restitution, plus a small random angular kick scaled by the relative
/// speed so collisions never look dead.
pub fn body_body(a: &mut RigidBody, b: &mut RigidBody, rng: &mut StdRng) {
    let delta = b.x - a.x;
    let dist = delta.norm();
    let min_dist = a.size + b.size;
    if dist >= min_dist || dist < MIN_SEPARATION {
        return;
    }

    let n = delta / dist;
    let inv_ma = if a.drag.is_dragging() { 0.0 } else { 1.0 / a.m };
    let inv_mb = if b.drag.is_dragging() { 0.0 } else { 1.0 / b.m };
    let inv_sum = inv_ma + inv_mb;
    if inv_sum <= 0.0 {
        // Both grabbed; nothing to resolve.
        return;
    }

    let vrel = (a.v - b.v).dot(&n);
    if vrel > 0.0 {
        let j = (1.0 + BODY_BODY_RESTITUTION) * vrel / inv_sum;
        a.v -= n * (j * inv_ma);
        b.v += n * (j * inv_mb);

        let kick = (a.v - b.v).norm() * ANGULAR_KICK;
        if kick > 0.0 {
            if !a.drag.is_dragging() {
                a.angular_v += rng.gen_range(-kick..kick);
            }
            if !b.drag.is_dragging() {
                b.angular_v += rng.gen_range(-kick..kick);
            }
        }
    }

    let overlap = min_dist - dist;
    let total = a.m + b.m;
    if !a.drag.is_dragging() {
        a.x -= n * (overlap * (b.m / total));
    }
    if !b.drag.is_dragging() {
        b.x += n * (overlap * (a.m / total));
    }
}
