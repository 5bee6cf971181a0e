//! User-placed force emitters.
//!
//! An emitter is a disc that applies its interaction mode to every
//! particle inside its effect radius, with linear falloff. With physics
//! enabled it falls and bounces exactly like a rigid body; otherwise it
//! sits where it was placed until dragged.

use rand::rngs::StdRng;

use crate::simulation::color::Rgba;
use crate::simulation::modes::{self, InteractionMode};
use crate::simulation::particle::Particle;
use crate::simulation::rigid_body::WALL_RESTITUTION;
use crate::simulation::states::{Bounds, DragState, FVec2};
use crate::visualization::surface::DrawSurface;

const GRAVITY_ACCEL: f64 = 0.2;
const FLOOR_FRICTION: f64 = 0.95;
const MAX_SPEED: f64 = 20.0;
const THROW_FACTOR: f64 = 0.5;

/// Alpha for the translucent field disc behind the core.
const FIELD_ALPHA: f32 = 0.08;

#[derive(Debug, Clone)]
pub struct ForceEmitter {
    pub x: FVec2, // position
    pub v: FVec2, // velocity (only used with physics on)
    pub radius: f64, // visual / grabbable disc size
    pub effect_radius: f64, // how far the force reaches
    pub mode: InteractionMode,
    pub strength: f64,
    pub physics: bool, // falls and bounces like a body
    pub color: Rgba,
    pub drag: DragState,
}

impl ForceEmitter {
    pub fn new(
        x: FVec2,
        mode: InteractionMode,
        strength: f64,
        effect_radius: f64,
        physics: bool,
        color: Rgba,
    ) -> Self {
        Self {
            x,
            v: FVec2::zeros(),
            radius: 12.0,
            effect_radius,
            mode,
            strength,
            physics,
            color,
            drag: DragState::Free,
        }
    }

    /// Apply this emitter's mode to one particle, if it is in range.
    /// Affected particles are highlighted for the frame.
    pub fn affect(&self, p: &mut Particle, t: f64, rng: &mut StdRng) {
        if self.effect_radius <= 0.0 {
            return;
        }
        let dist = (p.x - self.x).norm();
        if dist < self.effect_radius {
            let force = (self.effect_radius - dist) / self.effect_radius;
            modes::apply(self.mode, p, self.x, force, self.strength, t, rng);
            p.highlighted = true;
        }
    }

    /// Advance by one tick. Static emitters only get re-clamped; physical
    /// ones move like a rigid body (no rotation).
    pub fn update(&mut self, bounds: &Bounds, speed: f64) {
        if self.drag.is_dragging() {
            return;
        }
        if !self.physics {
            self.x = bounds.clamp_point(self.x, self.radius);
            return;
        }

        self.v.y += GRAVITY_ACCEL * speed;
        self.x += self.v * speed;

        if self.x.x < self.radius {
            self.x.x = self.radius;
            self.v.x = -self.v.x * WALL_RESTITUTION;
        } else if self.x.x > bounds.width - self.radius {
            self.x.x = bounds.width - self.radius;
            self.v.x = -self.v.x * WALL_RESTITUTION;
        }
        if self.x.y < self.radius {
            self.x.y = self.radius;
            self.v.y = -self.v.y * WALL_RESTITUTION;
        } else if self.x.y > bounds.height - self.radius {
            self.x.y = bounds.height - self.radius;
            self.v.y = -self.v.y * WALL_RESTITUTION;
            self.v.x *= FLOOR_FRICTION;
        }

        self.v.x = self.v.x.clamp(-MAX_SPEED, MAX_SPEED);
        self.v.y = self.v.y.clamp(-MAX_SPEED, MAX_SPEED);
    }

    pub fn start_drag(&mut self, pointer: FVec2) {
        self.v = FVec2::zeros();
        self.drag = DragState::Dragging {
            offset: self.x - pointer,
            start: self.x,
        };
    }

    pub fn drag_to(&mut self, pointer: FVec2, bounds: &Bounds) {
        if let DragState::Dragging { offset, .. } = self.drag {
            self.x = bounds.clamp_point(pointer + offset, self.radius);
        }
    }

    pub fn stop_drag(&mut self) {
        if let DragState::Dragging { start, .. } = self.drag {
            // Only physical emitters keep the throw momentum.
            self.v = if self.physics {
                (self.x - start) * THROW_FACTOR
            } else {
                FVec2::zeros()
            };
            self.drag = DragState::Free;
        }
    }

    pub fn contains(&self, p: FVec2, slop: f64) -> bool {
        (self.x - p).norm() < self.radius + slop
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        surface.fill_disc(self.x, self.effect_radius, self.color.with_alpha(FIELD_ALPHA));
        surface.fill_disc(self.x, self.radius, self.color);
    }
}
