pub mod states;
pub mod color;
pub mod params;
pub mod particle;
pub mod rigid_body;
pub mod emitter;
pub mod modes;
pub mod collision;
pub mod engine;
pub mod scenario;
