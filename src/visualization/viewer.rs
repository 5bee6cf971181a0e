//! Bevy 2D viewer: the host loop and input adapter.
//!
//! One Update system feeds pointer/keyboard input into the simulation,
//! the next advances it exactly once per frame and renders through a
//! gizmo-backed [`DrawSurface`]. The engine knows nothing about Bevy;
//! this module owns the whole mapping, including the coordinate flip
//! between surface space (y down) and Bevy world space (y up).

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::configuration::config::SpawnDefaults;
use crate::simulation::color::Rgba;
use crate::simulation::engine::Simulation;
use crate::simulation::states::{Bounds, FVec2};
use crate::visualization::surface::{DrawSurface, Rect};

#[derive(Resource)]
struct SimState {
    sim: Simulation,
    spawn: SpawnDefaults,
}

pub fn run_viewer(sim: Simulation, spawn: SpawnDefaults) {
    println!(
        "run_viewer: starting Bevy 2D viewer with {} particles",
        sim.particles.len()
    );
    let resolution = (sim.bounds.width as f32, sim.bounds.height as f32);

    App::new()
        .insert_resource(SimState { sim, spawn })
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "fieldsim".into(),
                resolution: resolution.into(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_systems(Startup, setup_camera)
        .add_systems(Update, (input_system, tick_system).chain())
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}

/// Pump pointer and keyboard state into the simulation.
/// C clears, B spawns a body at the pointer, E spawns an emitter.
fn input_system(
    mut state: ResMut<SimState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let SimState { sim, spawn } = &mut *state;

    // Cursor position is already top-left / y-down, same as the surface.
    sim.set_pointer(
        window
            .cursor_position()
            .map(|p| FVec2::new(p.x as f64, p.y as f64)),
    );

    if buttons.just_pressed(MouseButton::Left) {
        sim.pointer_down();
    }
    if buttons.just_released(MouseButton::Left) {
        sim.pointer_up();
    }

    if keys.just_pressed(KeyCode::KeyC) {
        sim.clear_all();
    }
    if keys.just_pressed(KeyCode::KeyB) {
        let at = sim.pointer();
        sim.spawn_body(
            spawn.body_shape,
            spawn.body_size,
            spawn.body_mass,
            Rgba::from_hue(35.0),
            at,
        );
    }
    if keys.just_pressed(KeyCode::KeyE) {
        let at = sim.pointer();
        sim.spawn_emitter(
            spawn.emitter_mode,
            spawn.emitter_strength,
            spawn.emitter_radius,
            spawn.emitter_physics,
            Rgba::from_hue(190.0),
            at,
        );
    }
}

/// Advance the simulation once per frame and refresh the title with
/// telemetry about once a second.
fn tick_system(
    mut state: ResMut<SimState>,
    mut gizmos: Gizmos,
    time: Res<Time>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut title_timer: Local<f32>,
) {
    // Frame time expressed in nominal 60 Hz ticks.
    let dt_scale = time.delta_seconds_f64() * 60.0;

    let bounds = state.sim.bounds;
    let mut surface = GizmoSurface {
        gizmos: &mut gizmos,
        bounds,
    };
    state.sim.tick(dt_scale, &mut surface);

    *title_timer += time.delta_seconds();
    if *title_timer >= 1.0 {
        *title_timer = 0.0;
        if let Ok(mut window) = windows.get_single_mut() {
            let t = state.sim.telemetry();
            window.title = format!(
                "fieldsim — {} particles, {} bodies, {} emitters, {:.0} ticks/s",
                t.particles, t.bodies, t.emitters, t.ticks_per_sec
            );
        }
    }
}

/// [`DrawSurface`] over Bevy gizmos. Gizmo shapes are outlines, which is
/// plenty for this frontend; the fill semantics live in the trait for
/// surfaces that can honor them.
struct GizmoSurface<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
    bounds: Bounds,
}

impl GizmoSurface<'_, '_, '_> {
    /// Surface coords (top-left, y down) to Bevy world (centered, y up).
    fn to_world(&self, p: FVec2) -> Vec2 {
        Vec2::new(
            (p.x - self.bounds.width * 0.5) as f32,
            (self.bounds.height * 0.5 - p.y) as f32,
        )
    }
}

fn to_bevy_color(c: Rgba) -> Color {
    Color::srgba(c.r, c.g, c.b, c.a)
}

impl DrawSurface for GizmoSurface<'_, '_, '_> {
    fn clear(&mut self, _region: Rect) {
        // Bevy clears the frame itself.
    }

    fn fill_disc(&mut self, center: FVec2, radius: f64, color: Rgba) {
        self.gizmos
            .circle_2d(self.to_world(center), radius as f32, to_bevy_color(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let center = FVec2::new(rect.x + rect.width * 0.5, rect.y + rect.height * 0.5);
        self.gizmos.rect_2d(
            self.to_world(center),
            0.0,
            Vec2::new(rect.width as f32, rect.height as f32),
            to_bevy_color(color),
        );
    }

    fn fill_polygon(&mut self, points: &[FVec2], color: Rgba) {
        if points.is_empty() {
            return;
        }
        let mut strip: Vec<Vec2> = points.iter().map(|p| self.to_world(*p)).collect();
        strip.push(strip[0]); // close the outline
        self.gizmos.linestrip_2d(strip, to_bevy_color(color));
    }

    fn stroke_line(&mut self, from: FVec2, to: FVec2, color: Rgba, _width: f64) {
        self.gizmos
            .line_2d(self.to_world(from), self.to_world(to), to_bevy_color(color));
    }
}
