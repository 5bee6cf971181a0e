//! Point-mass particles and their self-integration.
//!
//! A particle advances its own motion each tick given the ambient
//! parameters: boundary reflection (with gravity-dependent floor
//! resting), gravity, damping, the pointer-driven interaction mode and
//! the soft link constraint. All numeric results are clamped so no NaN
//! or out-of-band state is observable from the outside.

use rand::rngs::StdRng;
use rand::Rng;

use crate::simulation::color::Rgba;
use crate::simulation::modes::{self, InteractionMode};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Bounds, FVec2};
use crate::visualization::surface::DrawSurface;

pub const RADIUS_MIN: f64 = 1.0;
pub const RADIUS_MAX: f64 = 10.0;

/// Nonzero velocity components stay within this band, per axis.
pub const SPEED_MIN: f64 = 0.1;
pub const SPEED_MAX: f64 = 10.0;

const GRAVITY_ACCEL: f64 = 0.2;
const DAMPING: f64 = 0.99;
const FLOOR_FRICTION: f64 = 0.9;

/// Linked particles further apart than this get pulled back together.
pub const LINK_MAX_DIST: f64 = 50.0;
const LINK_PULL: f64 = 0.05;

/// Cosmetic particle type: picks the spawn palette and a speed factor.
#[derive(serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    Plasma,
    Electric,
    Organic,
    Cosmic,
    Quantum,
    Magnetic,
    #[default]
    Default,
}

impl ParticleKind {
    /// Initial-speed multiplier applied at spawn.
    pub fn speed_factor(&self) -> f64 {
        match self {
            ParticleKind::Plasma => 1.6,
            ParticleKind::Electric => 2.0,
            ParticleKind::Organic => 0.7,
            ParticleKind::Cosmic => 1.2,
            ParticleKind::Quantum => 1.8,
            ParticleKind::Magnetic => 1.0,
            ParticleKind::Default => 1.0,
        }
    }

    /// Spawn color: a hue band per kind, jittered per particle.
    pub fn spawn_color(&self, rng: &mut StdRng) -> Rgba {
        let hue = match self {
            ParticleKind::Plasma => rng.gen_range(0.0..40.0),
            ParticleKind::Electric => rng.gen_range(45.0..70.0),
            ParticleKind::Organic => rng.gen_range(90.0..150.0),
            ParticleKind::Cosmic => rng.gen_range(260.0..300.0),
            ParticleKind::Quantum => rng.gen_range(170.0..200.0),
            ParticleKind::Magnetic => rng.gen_range(210.0..245.0),
            ParticleKind::Default => return Rgba::random_hue(rng),
        };
        Rgba::from_hue(hue)
    }
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: FVec2, // position
    pub v: FVec2, // velocity
    pub radius: f64,
    pub base_radius: f64, // spawn radius, anchor for Pulse oscillation
    pub m: f64, // mass
    pub gravity: bool,
    pub color: Rgba,
    pub highlighted: bool, // drawn white this tick
    pub kind: ParticleKind,
    pub link: Option<usize>, // index of the symmetric link partner
}

impl Particle {
    /// Spawn one particle somewhere on the surface with kind-flavored
    /// velocity and color. Radius and mass are already sane here; the
    /// configuration boundary clamps before we ever get called.
    pub fn spawn(bounds: &Bounds, params: &Parameters, rng: &mut StdRng) -> Self {
        let radius = rng.gen_range(RADIUS_MIN..4.0);
        let factor = params.kind.speed_factor();
        Self {
            x: FVec2::new(
                rng.gen_range(radius..(bounds.width - radius).max(radius + 1.0)),
                rng.gen_range(radius..(bounds.height - radius).max(radius + 1.0)),
            ),
            v: FVec2::new(
                rng.gen_range(-1.0..1.0) * factor,
                rng.gen_range(-1.0..1.0) * factor,
            ),
            radius,
            base_radius: radius,
            m: params.mass,
            gravity: params.gravity,
            color: params.kind.spawn_color(rng),
            highlighted: false,
            kind: params.kind,
            link: None,
        }
    }

    /// Advance this particle by one tick.
    ///
    /// `speed` is the combined scale `params.speed * dt_scale` computed by
    /// the orchestrator; `link_anchor` is the current position of the link
    /// partner, if any; `pointer` enables the ambient interaction mode.
    pub fn update(
        &mut self,
        bounds: &Bounds,
        params: &Parameters,
        pointer: Option<FVec2>,
        link_anchor: Option<FVec2>,
        t: f64,
        rng: &mut StdRng,
        speed: f64,
    ) {
        self.x += self.v * speed;

        // Horizontal edges always reflect.
        if self.x.x < self.radius || self.x.x > bounds.width - self.radius {
            self.v.x = -self.v.x;
        }

        // Vertical edges reflect too, except the floor under gravity:
        // there the particle comes to rest and slides with friction.
        if self.x.y < self.radius {
            self.v.y = -self.v.y;
        } else if self.x.y > bounds.height - self.radius {
            if self.gravity {
                self.v.y = 0.0;
                self.v.x *= FLOOR_FRICTION;
            } else {
                self.v.y = -self.v.y;
            }
        }

        if self.gravity {
            self.v.y += GRAVITY_ACCEL * self.m * speed;
        }

        self.v *= DAMPING;

        // Ambient pointer-driven mode, falling off linearly with distance.
        if let Some(pointer) = pointer {
            if params.mode != InteractionMode::None {
                let dist = (self.x - pointer).norm();
                if dist < params.radius && params.radius > 0.0 {
                    let force = (params.radius - dist) / params.radius;
                    modes::apply(params.mode, self, pointer, force, params.strength, t, rng);
                }
            }
        }

        // Soft link constraint: overstretched links pull the particle a
        // fraction of the way back toward the allowed separation.
        if let Some(anchor) = link_anchor {
            let d = self.x - anchor;
            let dist = d.norm();
            if dist > LINK_MAX_DIST {
                self.x -= d * ((dist - LINK_MAX_DIST) / dist * LINK_PULL);
            }
        }

        self.v.x = clamp_speed(self.v.x);
        self.v.y = clamp_speed(self.v.y);
        self.x = bounds.clamp_point(self.x, self.radius);
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        let color = if self.highlighted { Rgba::WHITE } else { self.color };
        surface.fill_disc(self.x, self.radius, color);
    }
}

/// Clamp one velocity component to the [SPEED_MIN, SPEED_MAX] magnitude
/// band. Exactly-zero components stay zero (a resting particle rests).
fn clamp_speed(c: f64) -> f64 {
    if c == 0.0 {
        0.0
    } else {
        c.signum() * c.abs().clamp(SPEED_MIN, SPEED_MAX)
    }
}
