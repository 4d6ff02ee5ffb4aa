//! Demo scene for the first-person controller.
//!
//! Drops a player onto a ground plane with a few boxes and a ramp to walk over.
//! WASD to move, mouse to look, Space to jump, Q toggles the debug overlay.

use avian3d::prelude::*;
use bevy::prelude::*;

use fps_walker::{
    FpsWalkerPlugin, launch_params::LaunchParams, physics::GameLayer, spawn_fps_player,
};

/// Side length of the square ground plane (m).
const GROUND_SIZE: f32 = 100.0;

/// Obstacle boxes as (centre, size).
const OBSTACLES: &[(Vec3, Vec3)] = &[
    (Vec3::new(4.0, 0.5, -6.0), Vec3::new(2.0, 1.0, 2.0)),
    (Vec3::new(-5.0, 0.25, -4.0), Vec3::new(3.0, 0.5, 3.0)),
    (Vec3::new(0.0, 1.5, -14.0), Vec3::new(6.0, 3.0, 1.0)),
];

/// Spawn the ground, obstacles, ramp, light, and player.
fn setup_scene(
    mut commands: Commands,
    params: Res<LaunchParams>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ground_material = materials.add(Color::srgb(0.35, 0.45, 0.3));
    let prop_material = materials.add(Color::srgb(0.7, 0.6, 0.5));

    commands.spawn((
        Name::new("Ground"),
        RigidBody::Static,
        Collider::cuboid(GROUND_SIZE, 1.0, GROUND_SIZE),
        CollisionLayers::new([GameLayer::Ground], LayerMask::ALL),
        Mesh3d(meshes.add(Cuboid::new(GROUND_SIZE, 1.0, GROUND_SIZE))),
        MeshMaterial3d(ground_material),
        Transform::from_xyz(0.0, -0.5, 0.0),
    ));

    for &(center, size) in OBSTACLES {
        commands.spawn((
            Name::new("Obstacle"),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(prop_material.clone()),
            Transform::from_translation(center),
        ));
    }

    // A 20 degree ramp up to the wall.
    let ramp_size = Vec3::new(3.0, 0.2, 8.0);
    commands.spawn((
        Name::new("Ramp"),
        RigidBody::Static,
        Collider::cuboid(ramp_size.x, ramp_size.y, ramp_size.z),
        Mesh3d(meshes.add(Cuboid::from_size(ramp_size))),
        MeshMaterial3d(prop_material),
        Transform::from_xyz(8.0, 1.2, -10.0)
            .with_rotation(Quat::from_rotation_x(20f32.to_radians())),
    ));

    // A trigger volume that must not count as ground.
    commands.spawn((
        Name::new("Trigger"),
        Sensor,
        Collider::cuboid(2.0, 2.0, 2.0),
        Transform::from_xyz(-4.0, 1.0, 4.0),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let player = spawn_fps_player(
        &mut commands,
        Vec3::new(0.0, params.spawn_height, 0.0),
        params.controller.clone(),
        params.ground_check.clone(),
    );

    tracing::info!("Scene setup complete (player {player}) - use WASD to move, mouse to look");
}

fn main() {
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    let params = match fps_walker::launch_params::parse() {
        Ok(params) => params,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(2);
        }
    };
    tracing::debug!("Launch parameters: {params:?}");

    let window = Window {
        title: "fps-walker".to_string(),
        resolution: (1280, 720).into(),
        position: WindowPosition::Centered(MonitorSelection::Primary),
        ..Default::default()
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(window),
            ..Default::default()
        }))
        .insert_resource(params)
        .add_plugins(FpsWalkerPlugin)
        .add_systems(Startup, setup_scene)
        .run();
}
