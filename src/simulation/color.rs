//! The single internal color type.
//!
//! Everything in the engine works on `Rgba` with channels in [0, 1];
//! string color formats exist only at the configuration boundary
//! (see `configuration::config`).

use rand::rngs::StdRng;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const RED: Rgba = Rgba { r: 1.0, g: 0.2, b: 0.2, a: 1.0 };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linear per-channel interpolation toward `other` by `ratio` in [0, 1].
    pub fn blend(self, other: Rgba, ratio: f32) -> Self {
        let t = ratio.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Fully saturated color from a hue angle in degrees.
    pub fn from_hue(hue: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let x = 1.0 - (h.rem_euclid(2.0) - 1.0).abs();
        let (r, g, b) = match h as u32 {
            0 => (1.0, x, 0.0),
            1 => (x, 1.0, 0.0),
            2 => (0.0, 1.0, x),
            3 => (0.0, x, 1.0),
            4 => (x, 0.0, 1.0),
            _ => (1.0, 0.0, x),
        };
        Self { r, g, b, a: 1.0 }
    }

    /// Freshly generated random hue; the fallback for malformed
    /// color input and the default for untyped particles.
    pub fn random_hue(rng: &mut StdRng) -> Self {
        Self::from_hue(rng.gen_range(0.0..360.0))
    }
}
