pub mod simulation;
pub mod configuration;
pub mod telemetry;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Bounds, DragState, FVec2, ShapeKind};
pub use simulation::color::Rgba;
pub use simulation::particle::{Particle, ParticleKind};
pub use simulation::rigid_body::RigidBody;
pub use simulation::emitter::ForceEmitter;
pub use simulation::modes::InteractionMode;
pub use simulation::params::Parameters;
pub use simulation::engine::{DragTarget, Simulation};
pub use simulation::scenario::build_scenario;

pub use configuration::config::{
    color_or_random, parse_color, BodyConfig, EmitterConfig, ParamsConfig, ScenarioConfig,
    SpawnDefaults, SurfaceConfig,
};

pub use telemetry::stats::{Telemetry, TickMeter};

pub use visualization::surface::{DrawCmd, DrawSurface, NullSurface, Rect, RecordingSurface};
pub use visualization::viewer::run_viewer;

pub use benchmark::benchmark::{bench_collision_pairs, bench_tick};
