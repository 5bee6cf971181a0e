//! Core shared state types for the particle field engine.
//!
//! Defines the vector alias used everywhere (`FVec2`), the surface
//! bounds every entity is confined to, the drag state machine shared by
//! rigid bodies and force emitters, and the spawnable shape kinds.

use nalgebra::Vector2;

use crate::visualization::surface::Rect;

pub type FVec2 = Vector2<f64>;

/// Dimensions of the drawing surface, in surface coordinates
/// (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub width: f64,  // surface width
    pub height: f64, // surface height
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The full surface as a rectangle, for clear/background draws.
    pub fn rect(&self) -> Rect {
        Rect {
            x: 0.0,
            y: 0.0,
            width: self.width,
            height: self.height,
        }
    }

    /// Clamp a point so a disc of radius `margin` around it stays inside.
    pub fn clamp_point(&self, p: FVec2, margin: f64) -> FVec2 {
        FVec2::new(
            p.x.clamp(margin, (self.width - margin).max(margin)),
            p.y.clamp(margin, (self.height - margin).max(margin)),
        )
    }

    pub fn center(&self) -> FVec2 {
        FVec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Pointer-drag state for draggable entities (rigid bodies, emitters).
///
/// `offset` is entity-minus-pointer at grab time so the entity does not
/// snap to the cursor; `start` is the grab position, used to compute the
/// release ("throw") velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Free,
    Dragging { offset: FVec2, start: FVec2 },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

/// Shape of a spawnable rigid body.
/// Appears as `shape: "disc"`, `"square"` or `"triangle"` in scenario files.
#[derive(serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Disc,
    Square,
    Triangle,
}
