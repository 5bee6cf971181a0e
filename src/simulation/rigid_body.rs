//! Spawnable rigid shapes with simple Newtonian motion.
//!
//! A body falls, spins, loses energy on wall and floor contact, and can
//! be grabbed by the pointer. While dragged its physics is suspended and
//! its velocities are pinned to zero; releasing it throws it with half
//! the net drag displacement.

use crate::simulation::color::Rgba;
use crate::simulation::states::{Bounds, DragState, FVec2, ShapeKind};
use crate::visualization::surface::DrawSurface;

const GRAVITY_ACCEL: f64 = 0.2;
pub const WALL_RESTITUTION: f64 = 0.8;
const FLOOR_FRICTION: f64 = 0.95;
const MAX_SPEED: f64 = 20.0;
const THROW_FACTOR: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct RigidBody {
    pub x: FVec2, // position
    pub v: FVec2, // velocity
    pub rotation: f64, // radians
    pub angular_v: f64, // radians per tick
    pub shape: ShapeKind,
    pub size: f64, // radius / half-extent
    pub m: f64, // mass
    pub color: Rgba,
    pub drag: DragState,
}

impl RigidBody {
    pub fn new(x: FVec2, shape: ShapeKind, size: f64, m: f64, color: Rgba) -> Self {
        Self {
            x,
            v: FVec2::zeros(),
            rotation: 0.0,
            angular_v: 0.0,
            shape,
            size,
            m,
            color,
            drag: DragState::Free,
        }
    }

    /// Advance by one tick. Skipped entirely while dragged.
    pub fn update(&mut self, bounds: &Bounds, speed: f64) {
        if self.drag.is_dragging() {
            return;
        }

        self.v.y += GRAVITY_ACCEL * self.m * speed;
        self.x += self.v * speed;
        self.rotation += self.angular_v * speed;

        // Side walls and ceiling: energy-losing reflection.
        if self.x.x < self.size {
            self.x.x = self.size;
            self.v.x = -self.v.x * WALL_RESTITUTION;
        } else if self.x.x > bounds.width - self.size {
            self.x.x = bounds.width - self.size;
            self.v.x = -self.v.x * WALL_RESTITUTION;
        }
        if self.x.y < self.size {
            self.x.y = self.size;
            self.v.y = -self.v.y * WALL_RESTITUTION;
        } else if self.x.y > bounds.height - self.size {
            // Floor contact also bleeds horizontal and angular motion.
            self.x.y = bounds.height - self.size;
            self.v.y = -self.v.y * WALL_RESTITUTION;
            self.v.x *= FLOOR_FRICTION;
            self.angular_v *= FLOOR_FRICTION;
        }

        self.v.x = self.v.x.clamp(-MAX_SPEED, MAX_SPEED);
        self.v.y = self.v.y.clamp(-MAX_SPEED, MAX_SPEED);
    }

    /// Grab: pin all motion and remember the grab geometry.
    pub fn start_drag(&mut self, pointer: FVec2) {
        self.v = FVec2::zeros();
        self.angular_v = 0.0;
        self.drag = DragState::Dragging {
            offset: self.x - pointer,
            start: self.x,
        };
    }

    /// Follow the pointer while dragged, staying inside the surface.
    pub fn drag_to(&mut self, pointer: FVec2, bounds: &Bounds) {
        if let DragState::Dragging { offset, .. } = self.drag {
            self.x = bounds.clamp_point(pointer + offset, self.size);
        }
    }

    /// Release: velocity becomes half the net displacement of the drag,
    /// which gives the throw feel.
    pub fn stop_drag(&mut self) {
        if let DragState::Dragging { start, .. } = self.drag {
            self.v = (self.x - start) * THROW_FACTOR;
            self.v.x = self.v.x.clamp(-MAX_SPEED, MAX_SPEED);
            self.v.y = self.v.y.clamp(-MAX_SPEED, MAX_SPEED);
            self.drag = DragState::Free;
        }
    }

    /// Pointer hit test with a little slop so small bodies stay grabbable.
    pub fn contains(&self, p: FVec2, slop: f64) -> bool {
        (self.x - p).norm() < self.size + slop
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        match self.shape {
            ShapeKind::Disc => {
                surface.fill_disc(self.x, self.size, self.color);
                // Spin indicator so disc rotation is visible at all.
                let tip = self.x
                    + FVec2::new(self.rotation.cos(), self.rotation.sin()) * self.size;
                surface.stroke_line(self.x, tip, Rgba::WHITE.with_alpha(0.7), 1.0);
            }
            ShapeKind::Square => {
                let pts = self.corner_points(&[0.25, 0.75, 1.25, 1.75], self.size * std::f64::consts::SQRT_2);
                surface.fill_polygon(&pts, self.color);
            }
            ShapeKind::Triangle => {
                let pts = self.corner_points(&[0.0, 2.0 / 3.0, 4.0 / 3.0], self.size);
                surface.fill_polygon(&pts, self.color);
            }
        }
    }

    /// Corner positions at the given turns (in units of pi) around the
    /// center, rotated by the current orientation.
    fn corner_points(&self, turns: &[f64], reach: f64) -> Vec<FVec2> {
        turns
            .iter()
            .map(|t| {
                let a = self.rotation + t * std::f64::consts::PI;
                self.x + FVec2::new(a.cos(), a.sin()) * reach
            })
            .collect()
    }
}
