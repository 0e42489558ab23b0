use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::{PrimaryWindow, WindowResized};

use crate::simulation::colormap::Rgb;
use crate::simulation::engine::{BodyKind, EngineState, PointerButton, RenderPoint};

/// Component tagging a drawable slot. One slot exists per body; slots
/// without a visible render point this frame are hidden
#[derive(Component)]
struct RenderSlot(pub usize);

/// World units dollied per wheel notch
const DOLLY_STEP: f64 = 25.0;

/// A press-release with less total motion than this counts as a click
const CLICK_SLOP: f64 = 4.0;

/// Screen length of the orientation triad, matching its corner anchor
const TRIAD_LEN: f32 = 42.0;

/// Convenience entrypoint: hand the engine to Bevy and run the viewer
pub fn run_galaxy(engine: EngineState) {
    println!(
        "run_galaxy: starting viewer with {} particles and {} attractors",
        engine.system.particles.len(),
        engine.system.attractors.len()
    );

    App::new()
        .insert_resource(engine)
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_slots)
        .add_systems(
            Update,
            (
                pointer_input_system,
                resize_system,
                physics_step_system,
                sync_render_system,
                axes_overlay_system,
            )
                .chain(),
        )
        .run();
}

/// Startup system: spawn the 2D camera and one circle slot per body
fn setup_slots(
    mut commands: Commands,
    engine: Res<EngineState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2dBundle::default());

    // Unit circle shared by every slot; per-point radius comes from the
    // transform scale
    let circle = Mesh2dHandle(meshes.add(Circle::new(1.0)));

    let total = engine.system.particles.len() + engine.system.attractors.len();
    for i in 0..total {
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: circle.clone(),
                material: materials.add(ColorMaterial::from(Color::WHITE)),
                transform: Transform::from_xyz(0.0, 0.0, 0.0),
                visibility: Visibility::Hidden,
                ..Default::default()
            },
            RenderSlot(i),
        ));
    }
}

/// Per-frame physics: one engine step (the engine drops the tick itself if
/// the previous one is somehow still in flight)
fn physics_step_system(mut engine: ResMut<EngineState>) {
    engine.step();
}

/// Pointer wiring: left drag rotates, middle drag pans, wheel dollies,
/// a motionless left click selects a chase target
fn pointer_input_system(
    mut engine: ResMut<EngineState>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut drag_total: Local<f64>,
) {
    if buttons.just_pressed(MouseButton::Left) {
        *drag_total = 0.0;
    }

    let mut dx = 0.0;
    let mut dy = 0.0;
    for ev in motion.read() {
        dx += ev.delta.x as f64;
        dy += ev.delta.y as f64;
    }

    if dx != 0.0 || dy != 0.0 {
        if buttons.pressed(MouseButton::Left) {
            engine.on_pointer_drag(dx, dy, PointerButton::Primary);
            *drag_total += dx.abs() + dy.abs();
        } else if buttons.pressed(MouseButton::Middle) {
            engine.on_pointer_drag(dx, dy, PointerButton::Middle);
        }
    }

    if buttons.just_released(MouseButton::Left) && *drag_total < CLICK_SLOP {
        if let Ok(window) = windows.get_single() {
            if let Some(cursor) = window.cursor_position() {
                engine.on_select_point(cursor.x as f64, cursor.y as f64);
            }
        }
    }

    for ev in wheel.read() {
        let notches = match ev.unit {
            MouseScrollUnit::Line => ev.y as f64,
            MouseScrollUnit::Pixel => ev.y as f64 / 20.0,
        };
        engine.on_wheel(notches * DOLLY_STEP);
    }
}

/// Keep the engine's display geometry in sync with the window
fn resize_system(mut engine: ResMut<EngineState>, mut events: EventReader<WindowResized>) {
    for ev in events.read() {
        engine.on_resize(ev.width as f64, ev.height as f64);
    }
}

/// Push this frame's projected points into the slot entities
fn sync_render_system(
    engine: Res<EngineState>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(
        &RenderSlot,
        &mut Transform,
        &mut Visibility,
        &Handle<ColorMaterial>,
    )>,
) {
    let points: Vec<RenderPoint> = engine.project().collect();
    let display = &engine.display;

    for (RenderSlot(i), mut transform, mut visibility, mat_handle) in &mut query {
        match points.get(*i) {
            Some(pt) => {
                *visibility = Visibility::Visible;
                // Engine screen space is origin top-left, y down; Bevy 2D
                // is origin center, y up
                transform.translation = Vec3::new(
                    (pt.x - display.offset_x) as f32,
                    (display.offset_y - pt.y) as f32,
                    z_order(pt),
                );
                transform.scale = Vec3::splat(pt.radius as f32);

                if let Some(mat) = materials.get_mut(mat_handle) {
                    mat.color = color_of(&engine, pt);
                }
            }
            None => {
                *visibility = Visibility::Hidden;
            }
        }
    }
}

/// Attractors draw over particles; within a kind, nearer bodies draw over
/// farther ones
fn z_order(pt: &RenderPoint) -> f32 {
    let base = match pt.kind {
        BodyKind::Particle => 0.0,
        BodyKind::Attractor => 10.0,
    };
    base - (pt.depth * 1e-4) as f32
}

fn color_of(engine: &EngineState, pt: &RenderPoint) -> Color {
    match pt.kind {
        // Attractors stay red regardless of palette
        BodyKind::Attractor => Color::srgb(1.0, 0.0, 0.0),
        BodyKind::Particle => {
            let Rgb { r, g, b } = engine.colormap.color(pt.color_index);
            Color::srgb_u8(r, g, b)
        }
    }
}

/// Orientation triad in the top-left corner: screen-space images of the
/// world X (red), Y (green) and Z (blue) axes under the current view
fn axes_overlay_system(engine: Res<EngineState>, mut gizmos: Gizmos) {
    let d = &engine.display;
    let anchor = Vec2::new(
        TRIAD_LEN - d.width as f32 / 2.0,
        d.height as f32 / 2.0 - TRIAD_LEN,
    );

    let triad = engine.camera.axis_triad();
    let colors = [
        Color::srgb(1.0, 0.0, 0.0),
        Color::srgb(0.0, 1.0, 0.0),
        Color::srgb(0.0, 0.0, 1.0),
    ];

    for (k, &(ax, ay)) in triad.iter().enumerate() {
        // Flip y for Bevy's y-up 2D space
        let end = anchor + Vec2::new(TRIAD_LEN * ax as f32, -TRIAD_LEN * ay as f32);
        gizmos.line_2d(anchor, end, colors[k]);
    }
}
