use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;
use bevy::window::{PrimaryWindow, WindowResolution};

use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec2;

#[derive(Component)]
struct BodyIndex(pub usize);

/// Domain-space → screen-space scaling factor for positions and radii
const SCALE: f32 = 2.0;

pub fn run_2d(scenario: Scenario) {
    println!("run_2d: starting Bevy 2D viewer with {} bodies", scenario.system.bodies.len());

    let window_width = scenario.parameters.width as f32 * SCALE;
    let window_height = scenario.parameters.height as f32 * SCALE;

    App::new()
        .insert_resource(scenario)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                resolution: WindowResolution::new(window_width, window_height),
                title: "ballpit".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_systems(Startup, setup_bodies_system)
        // Pointer runs first so a grabbed body is pinned before integration
        .add_systems(Update, (pointer_system, physics_step_system, sync_transforms_system).chain())
        .run();
}

fn setup_bodies_system(mut commands: Commands, scenario: Res<Scenario>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    for (i, body) in scenario.system.bodies.iter().enumerate() {
        let radius_screen = body.radius as f32 * SCALE;
        let [r, g, b] = body.colour;

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(radius_screen))),
                material: materials.add(ColorMaterial::from(Color::srgb(r, g, b))),
                transform: Transform::from_translation(to_screen(body.pos, &scenario)),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

/// Mouse interaction: press grabs the body under the cursor, dragging moves
/// it, release lets the implied velocity throw it
fn pointer_system(
    mut scenario: ResMut<Scenario>,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    // Window cursor coordinates are y-down from the top-left corner, the
    // same convention as the simulation domain
    let point = NVec2::new(f64::from(cursor.x / SCALE), f64::from(cursor.y / SCALE));

    if buttons.just_pressed(MouseButton::Left) {
        scenario.try_grab(point);
    }
    if buttons.just_released(MouseButton::Left) {
        scenario.release_held();
    }

    scenario.set_held_target(point);
}

fn physics_step_system(mut scenario: ResMut<Scenario>) {
    // One fixed tick per rendered frame
    let dt = scenario.parameters.dt;
    scenario.step(dt);
}

fn sync_transforms_system(scenario: Res<Scenario>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(b) = scenario.system.bodies.get(*i) {
            transform.translation = to_screen(b.pos, &scenario);
        }
    }
}

/// Simulation coordinates are y-down with the origin at the domain's
/// top-left; Bevy world space is y-up with the origin at the window centre
fn to_screen(pos: NVec2, scenario: &Scenario) -> Vec3 {
    let w = scenario.parameters.width;
    let h = scenario.parameters.height;
    Vec3::new(
        (pos.x - w / 2.0) as f32 * SCALE,
        (h / 2.0 - pos.y) as f32 * SCALE,
        0.0,
    )
}
