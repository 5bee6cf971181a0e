//! The drawing surface boundary.
//!
//! The engine renders through [`DrawSurface`] and needs nothing else
//! from a frontend: clear a region, fill discs/rects/polygons, stroke
//! lines. The Bevy viewer implements it over gizmos; tests and benches
//! use [`RecordingSurface`] and [`NullSurface`].

use crate::simulation::color::Rgba;
use crate::simulation::states::FVec2;

/// Axis-aligned region in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub trait DrawSurface {
    fn clear(&mut self, region: Rect);
    fn fill_disc(&mut self, center: FVec2, radius: f64, color: Rgba);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    fn fill_polygon(&mut self, points: &[FVec2], color: Rgba);
    fn stroke_line(&mut self, from: FVec2, to: FVec2, color: Rgba, width: f64);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear(Rect),
    Disc { center: FVec2, radius: f64, color: Rgba },
    Rect { rect: Rect, color: Rgba },
    Polygon { points: Vec<FVec2>, color: Rgba },
    Line { from: FVec2, to: FVec2, color: Rgba, width: f64 },
}

/// Surface that logs every call; what tests assert against.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCmd>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCmd> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::Line { .. }))
    }

    pub fn discs(&self) -> impl Iterator<Item = &DrawCmd> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::Disc { .. }))
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, region: Rect) {
        self.commands.push(DrawCmd::Clear(region));
    }

    fn fill_disc(&mut self, center: FVec2, radius: f64, color: Rgba) {
        self.commands.push(DrawCmd::Disc { center, radius, color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCmd::Rect { rect, color });
    }

    fn fill_polygon(&mut self, points: &[FVec2], color: Rgba) {
        self.commands.push(DrawCmd::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_line(&mut self, from: FVec2, to: FVec2, color: Rgba, width: f64) {
        self.commands.push(DrawCmd::Line { from, to, color, width });
    }
}

/// Surface that discards everything; for headless ticking.
#[derive(Debug, Default)]
pub struct NullSurface;

impl DrawSurface for NullSurface {
    fn clear(&mut self, _region: Rect) {}
    fn fill_disc(&mut self, _center: FVec2, _radius: f64, _color: Rgba) {}
    fn fill_rect(&mut self, _rect: Rect, _color: Rgba) {}
    fn fill_polygon(&mut self, _points: &[FVec2], _color: Rgba) {}
    fn stroke_line(&mut self, _from: FVec2, _to: FVec2, _color: Rgba, _width: f64) {}
}
