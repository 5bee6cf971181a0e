//! Configuration types for loading playground scenarios from YAML.
//!
//! This module is the configuration boundary of the engine: a thin,
//! `serde`-deserializable scenario description plus the sanitizers that
//! clamp every numeric into its legal band and the color parser with its
//! random-hue fallback. Past this boundary the core never validates —
//! bad input is corrected here, not propagated as a fault.
//!
//! # YAML format
//! An example scenario matching these types:
//!
//! ```yaml
//! surface:
//!   width: 1280.0
//!   height: 720.0
//!
//! parameters:
//!   count: 300              # particle count
//!   kind: "cosmic"          # plasma/electric/organic/cosmic/quantum/magnetic/default
//!   mass: 1.0
//!   gravity: false
//!   mode: "attract"         # ambient pointer mode, "none" to disable
//!   strength: 5.0
//!   radius: 120.0           # interaction radius
//!   connection_radius: 80.0
//!   speed: 1.0
//!   seed: 42
//!
//! bodies:
//!   - x: 400.0
//!     y: 200.0
//!     shape: "square"
//!     size: 30.0
//!     mass: 4.0
//!     color: "#e0a030"
//!
//! emitters:
//!   - x: 800.0
//!     y: 400.0
//!     mode: "swirl"
//!     strength: 6.0
//!     radius: 150.0         # effect radius
//!     physics: false
//! ```

use rand::rngs::StdRng;
use serde::Deserialize;

use crate::simulation::color::Rgba;
use crate::simulation::modes::InteractionMode;
use crate::simulation::params::Parameters;
use crate::simulation::particle::ParticleKind;
use crate::simulation::states::ShapeKind;

/// Drawing surface dimensions. Non-positive values are a fatal
/// construction error, checked by the scenario builder.
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct SurfaceConfig {
    pub width: f64,
    pub height: f64,
}

/// Global simulation parameters as they appear in a scenario file.
#[derive(Deserialize, Debug, Clone)]
pub struct ParamsConfig {
    pub count: usize,             // particle count
    #[serde(default)]
    pub kind: ParticleKind,       // particle visual type
    pub mass: f64,                // particle mass
    pub gravity: bool,            // particles fall and rest on the floor
    #[serde(default)]
    pub mode: InteractionMode,    // ambient pointer mode
    pub strength: f64,            // interaction strength
    pub radius: f64,              // interaction radius
    pub connection_radius: f64,   // connection graph radius
    pub speed: f64,               // simulation speed scalar
    #[serde(default = "default_seed")]
    pub seed: u64,                // deterministic seed
}

fn default_seed() -> u64 {
    42
}

impl ParamsConfig {
    /// Clamp every numeric into its legal band. The same bands the
    /// engine's runtime setters enforce.
    pub fn sanitize(&self) -> Parameters {
        Parameters {
            count: self.count.clamp(1, 5000),
            kind: self.kind,
            mass: self.mass.clamp(0.1, 10.0),
            gravity: self.gravity,
            mode: self.mode,
            strength: self.strength.clamp(0.0, 20.0),
            radius: self.radius.clamp(10.0, 500.0),
            connection_radius: self.connection_radius.clamp(0.0, 300.0),
            speed: self.speed.clamp(0.05, 5.0),
            seed: self.seed,
        }
    }
}

/// Initial state for one rigid body.
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub shape: ShapeKind,
    pub size: f64,
    pub mass: f64,
    pub color: Option<String>, // parsed with random-hue fallback
}

/// Initial state for one force emitter.
#[derive(Deserialize, Debug, Clone)]
pub struct EmitterConfig {
    pub x: f64,
    pub y: f64,
    pub mode: InteractionMode,
    pub strength: f64,
    pub radius: f64, // effect radius
    #[serde(default)]
    pub physics: bool,
    pub color: Option<String>,
}

/// Defaults used when the viewer spawns entities at the pointer.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SpawnDefaults {
    pub body_shape: ShapeKind,
    pub body_size: f64,
    pub body_mass: f64,
    pub emitter_mode: InteractionMode,
    pub emitter_strength: f64,
    pub emitter_radius: f64,
    pub emitter_physics: bool,
}

impl Default for SpawnDefaults {
    fn default() -> Self {
        Self {
            body_shape: ShapeKind::Disc,
            body_size: 25.0,
            body_mass: 4.0,
            emitter_mode: InteractionMode::Attract,
            emitter_strength: 5.0,
            emitter_radius: 150.0,
            emitter_physics: false,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub surface: SurfaceConfig,
    pub parameters: ParamsConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub emitters: Vec<EmitterConfig>,
    #[serde(default)]
    pub spawn: SpawnDefaults,
}

// ========================================================================
// Color parsing — only exists at this boundary
// ========================================================================

/// Parse `#rrggbb` or `rgb(r, g, b)`. `None` on anything else.
pub fn parse_color(s: &str) -> Option<Rgba> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Rgba::opaque(
                r as f32 / 255.0,
                g as f32 / 255.0,
                b as f32 / 255.0,
            ));
        }
        return None;
    }
    if let Some(body) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
        let mut channels = body.split(',').map(|c| c.trim().parse::<u8>());
        let r = channels.next()?.ok()?;
        let g = channels.next()?.ok()?;
        let b = channels.next()?.ok()?;
        if channels.next().is_some() {
            return None;
        }
        return Some(Rgba::opaque(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
        ));
    }
    None
}

/// Malformed or missing color input falls back to a freshly generated
/// random hue rather than failing.
pub fn color_or_random(s: Option<&str>, rng: &mut StdRng) -> Rgba {
    s.and_then(parse_color)
        .unwrap_or_else(|| Rgba::random_hue(rng))
}
