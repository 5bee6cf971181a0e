//! The simulation orchestrator.
//!
//! `Simulation` owns every entity collection, the pointer-drag state
//! machine and the global parameters, and runs one deterministic
//! update-then-render pass per [`Simulation::tick`] call:
//!
//! 1. drag update for the grabbed entity
//! 2. particle x body collisions
//! 3. body x body collisions (i < j, insertion order)
//! 4. emitter forces on particles
//! 5. integration of particles, emitters, bodies
//! 6. connection graph lines
//! 7. entity draws
//!
//! The host loop supplies `dt_scale` each call; motion scales with
//! `params.speed * dt_scale` and never assumes a fixed tick duration.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::simulation::collision;
use crate::simulation::color::Rgba;
use crate::simulation::emitter::ForceEmitter;
use crate::simulation::modes::InteractionMode;
use crate::simulation::params::Parameters;
use crate::simulation::particle::{Particle, ParticleKind};
use crate::simulation::rigid_body::RigidBody;
use crate::simulation::states::{Bounds, FVec2, ShapeKind};
use crate::telemetry::stats::{Telemetry, TickMeter};
use crate::visualization::surface::DrawSurface;

/// Extra pick distance so small entities are still grabbable.
const PICK_SLOP: f64 = 5.0;

const BACKGROUND: Rgba = Rgba { r: 0.04, g: 0.04, b: 0.07, a: 1.0 };
const CONNECTION_COLOR: Rgba = Rgba { r: 0.55, g: 0.65, b: 0.9, a: 1.0 };
const LINK_COLOR: Rgba = Rgba { r: 1.0, g: 0.85, b: 0.3, a: 0.9 };

/// What the pointer currently drags. Never a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Body(usize),
    Emitter(usize),
}

pub struct Simulation {
    pub particles: Vec<Particle>,
    pub bodies: Vec<RigidBody>,
    pub emitters: Vec<ForceEmitter>,
    pub params: Parameters,
    pub bounds: Bounds,
    pointer: Option<FVec2>,
    drag: Option<DragTarget>,
    t: f64, // simulation clock, in scaled ticks
    rng: StdRng,
    meter: TickMeter,
}

impl Simulation {
    /// Build an empty-field simulation and spawn the initial particle
    /// field from the parameters. Inputs are assumed sane; the
    /// configuration boundary has already clamped them.
    pub fn new(bounds: Bounds, params: Parameters) -> Self {
        let mut sim = Self {
            particles: Vec::new(),
            bodies: Vec::new(),
            emitters: Vec::new(),
            rng: StdRng::seed_from_u64(params.seed),
            params,
            bounds,
            pointer: None,
            drag: None,
            t: 0.0,
            meter: TickMeter::new(),
        };
        sim.rebuild_particles();
        sim
    }

    // ====================================================================
    // Configuration surface
    // ====================================================================

    /// Replace the whole particle field. Links do not survive: every
    /// particle is dropped, so no index can dangle.
    pub fn rebuild_particles(&mut self) {
        let Self { particles, bounds, params, rng, .. } = self;
        *particles = (0..params.count)
            .map(|_| Particle::spawn(bounds, params, rng))
            .collect();
    }

    pub fn set_particle_count(&mut self, count: usize) {
        self.params.count = count.clamp(1, 5000);
        self.rebuild_particles();
    }

    pub fn set_particle_kind(&mut self, kind: ParticleKind) {
        self.params.kind = kind;
        self.rebuild_particles();
    }

    /// Mass applies to the live field as well as future spawns.
    pub fn set_particle_mass(&mut self, mass: f64) {
        self.params.mass = mass.clamp(0.1, 10.0);
        for p in &mut self.particles {
            p.m = self.params.mass;
        }
    }

    pub fn set_gravity(&mut self, enabled: bool) {
        self.params.gravity = enabled;
        for p in &mut self.particles {
            p.gravity = enabled;
        }
    }

    pub fn set_interaction_mode(&mut self, mode: InteractionMode) {
        self.params.mode = mode;
    }

    pub fn set_interaction_strength(&mut self, strength: f64) {
        self.params.strength = strength.clamp(0.0, 20.0);
    }

    pub fn set_interaction_radius(&mut self, radius: f64) {
        self.params.radius = radius.clamp(10.0, 500.0);
    }

    pub fn set_connection_radius(&mut self, radius: f64) {
        self.params.connection_radius = radius.clamp(0.0, 300.0);
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.params.speed = speed.clamp(0.05, 5.0);
    }

    /// Spawn a rigid body, at `at` or at the surface center.
    pub fn spawn_body(
        &mut self,
        shape: ShapeKind,
        size: f64,
        mass: f64,
        color: Rgba,
        at: Option<FVec2>,
    ) {
        let size = size.clamp(5.0, 100.0);
        let mass = mass.clamp(0.1, 50.0);
        let x = self
            .bounds
            .clamp_point(at.unwrap_or_else(|| self.bounds.center()), size);
        self.bodies.push(RigidBody::new(x, shape, size, mass, color));
    }

    /// Spawn a force emitter, at `at` or at the surface center.
    pub fn spawn_emitter(
        &mut self,
        mode: InteractionMode,
        strength: f64,
        effect_radius: f64,
        physics: bool,
        color: Rgba,
        at: Option<FVec2>,
    ) {
        let strength = strength.clamp(0.0, 20.0);
        let effect_radius = effect_radius.clamp(10.0, 500.0);
        let mut e = ForceEmitter::new(
            self.bounds.center(),
            mode,
            strength,
            effect_radius,
            physics,
            color,
        );
        if let Some(at) = at {
            e.x = self.bounds.clamp_point(at, e.radius);
        }
        self.emitters.push(e);
    }

    // ====================================================================
    // Input surface
    // ====================================================================

    pub fn set_pointer(&mut self, pointer: Option<FVec2>) {
        self.pointer = pointer;
    }

    pub fn pointer(&self) -> Option<FVec2> {
        self.pointer
    }

    /// Pointer-down: try to grab something. Bodies are checked before
    /// emitters, first match in insertion order wins. In Connect mode a
    /// press on empty space links the two nearest particles instead.
    pub fn pointer_down(&mut self) {
        let Some(pointer) = self.pointer else {
            return;
        };
        if self.drag.is_some() {
            // No reentrancy: one drag at a time.
            return;
        }

        for (i, b) in self.bodies.iter_mut().enumerate() {
            if b.contains(pointer, PICK_SLOP) {
                b.start_drag(pointer);
                self.drag = Some(DragTarget::Body(i));
                return;
            }
        }
        for (i, e) in self.emitters.iter_mut().enumerate() {
            if e.contains(pointer, PICK_SLOP) {
                e.start_drag(pointer);
                self.drag = Some(DragTarget::Emitter(i));
                return;
            }
        }

        if self.params.mode == InteractionMode::Connect {
            self.link_nearest_pair(pointer);
        }
    }

    /// Pointer-up always returns to idle, even if the pointer already
    /// left the surface.
    pub fn pointer_up(&mut self) {
        match self.drag.take() {
            Some(DragTarget::Body(i)) => {
                if let Some(b) = self.bodies.get_mut(i) {
                    b.stop_drag();
                }
            }
            Some(DragTarget::Emitter(i)) => {
                if let Some(e) = self.emitters.get_mut(i) {
                    e.stop_drag();
                }
            }
            None => {}
        }
    }

    /// Drop every entity. Links die with their particles, so clearing
    /// twice is the same as clearing once.
    pub fn clear_all(&mut self) {
        self.particles.clear();
        self.bodies.clear();
        self.emitters.clear();
        self.drag = None;
    }

    // ====================================================================
    // Links
    // ====================================================================

    /// Create a symmetric link between two particles. Existing links of
    /// either side are severed first so every particle has at most one
    /// partner and symmetry holds by construction.
    pub fn link_particles(&mut self, a: usize, b: usize) {
        if a == b || a >= self.particles.len() || b >= self.particles.len() {
            return;
        }
        self.unlink_particle(a);
        self.unlink_particle(b);
        self.particles[a].link = Some(b);
        self.particles[b].link = Some(a);
    }

    pub fn unlink_particle(&mut self, i: usize) {
        if let Some(j) = self.particles.get(i).and_then(|p| p.link) {
            self.particles[i].link = None;
            if let Some(q) = self.particles.get_mut(j) {
                q.link = None;
            }
        }
    }

    /// Link the two particles nearest to `pointer`, both within the
    /// interaction radius.
    fn link_nearest_pair(&mut self, pointer: FVec2) {
        let mut near: Vec<(f64, usize)> = self
            .particles
            .iter()
            .enumerate()
            .filter_map(|(i, p)| {
                let d = (p.x - pointer).norm();
                (d < self.params.radius).then_some((d, i))
            })
            .collect();
        if near.len() < 2 {
            return;
        }
        near.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.link_particles(near[0].1, near[1].1);
    }

    // ====================================================================
    // Telemetry surface
    // ====================================================================

    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            particles: self.particles.len(),
            bodies: self.bodies.len(),
            emitters: self.emitters.len(),
            ticks_per_sec: self.meter.rate(),
            params: self.params.clone(),
        }
    }

    // ====================================================================
    // The tick
    // ====================================================================

    /// One full update-and-render pass. `dt_scale` is the host's frame
    /// time expressed in nominal ticks (1.0 = one display refresh).
    pub fn tick(&mut self, dt_scale: f64, surface: &mut dyn DrawSurface) {
        self.meter.tick();
        let dt = dt_scale.max(0.0);
        self.t += dt;
        let speed = self.params.speed * dt;

        surface.clear(self.bounds.rect());
        surface.fill_rect(self.bounds.rect(), BACKGROUND);

        for p in &mut self.particles {
            p.highlighted = false;
        }

        // 1. The grabbed entity follows the pointer.
        if let (Some(pointer), Some(target)) = (self.pointer, self.drag) {
            match target {
                DragTarget::Body(i) => {
                    if let Some(b) = self.bodies.get_mut(i) {
                        b.drag_to(pointer, &self.bounds);
                    }
                }
                DragTarget::Emitter(i) => {
                    if let Some(e) = self.emitters.get_mut(i) {
                        e.drag_to(pointer, &self.bounds);
                    }
                }
            }
        }

        // Split the borrow once; everything below works on the pieces.
        let Self {
            particles,
            bodies,
            emitters,
            params,
            bounds,
            pointer,
            rng,
            t,
            ..
        } = self;

        // 2. Particle x body pairs, insertion order.
        for p in particles.iter_mut() {
            for b in bodies.iter_mut() {
                collision::particle_body(p, b);
            }
        }

        // 3. Body pairs, i < j, no double counting.
        for i in 0..bodies.len() {
            let (head, tail) = bodies.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                collision::body_body(a, b, rng);
            }
        }

        // 4. Emitter forces.
        for e in emitters.iter() {
            for p in particles.iter_mut() {
                e.affect(p, *t, rng);
            }
        }

        // 5. Integration: particles, then emitters, then bodies.
        // Link anchors are captured first so the pull sees this tick's
        // partner positions consistently.
        let anchors: Vec<Option<FVec2>> = particles
            .iter()
            .map(|p| p.link.and_then(|j| particles.get(j).map(|q| q.x)))
            .collect();
        for (p, anchor) in particles.iter_mut().zip(anchors) {
            p.update(bounds, params, *pointer, anchor, *t, rng, speed);
        }
        for e in emitters.iter_mut() {
            e.update(bounds, speed);
        }
        for b in bodies.iter_mut() {
            b.update(bounds, speed);
        }

        // 6. Connection graph: proximity lines fade linearly with
        // distance; explicit links are always drawn, highlighted.
        let conn = params.connection_radius;
        if conn > 0.0 {
            for i in 0..particles.len() {
                for j in (i + 1)..particles.len() {
                    let d = (particles[i].x - particles[j].x).norm();
                    if d < conn {
                        let alpha = (1.0 - d / conn) as f32;
                        surface.stroke_line(
                            particles[i].x,
                            particles[j].x,
                            CONNECTION_COLOR.with_alpha(alpha),
                            1.0,
                        );
                    }
                }
            }
        }
        for (i, p) in particles.iter().enumerate() {
            if let Some(j) = p.link {
                // Each link once, from the lower index.
                if j > i {
                    if let Some(q) = particles.get(j) {
                        surface.stroke_line(p.x, q.x, LINK_COLOR, 2.0);
                    }
                }
            }
        }

        // 7. Entities: field discs under everything, particles on top.
        for e in emitters.iter() {
            e.draw(surface);
        }
        for b in bodies.iter() {
            b.draw(surface);
        }
        for p in particles.iter() {
            p.draw(surface);
        }
    }
}
