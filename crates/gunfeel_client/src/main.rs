use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use gunfeel_simulation::physics::{agent_capsule, capsule_center};
use gunfeel_simulation::{
    log_error, log_info, spawn_player, DeterministicRng, GameConfig, MoverBackend, SimulationPlugin,
};

mod input;
mod rendering;

use input::{LocalPlayer, PlayerInputPlugin};
use rendering::RenderingPlugin;

/// Тюнинги по умолчанию (можно переопределить первым аргументом)
const DEFAULT_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/gunfeel.ron");

/// Точка появления игрока (ноги)
const SPAWN_POINT: Vec3 = Vec3::new(0.0, 1.0, 6.0);

/// Загруженный GameConfig (читается в Startup)
#[derive(Resource)]
pub struct LoadedConfig(pub GameConfig);

fn main() {
    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "GUNFEEL - Locomotion Sandbox".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Rapier мир (коллизии для move_shape)
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        // Simulation (locomotion + weapon animator через Rapier)
        .add_plugins(SimulationPlugin {
            backend: MoverBackend::Rapier,
        })
        // Устройства ввода → PlayerController
        .add_plugins(PlayerInputPlugin)
        // Уровень + визуалы оружия
        .add_plugins(RenderingPlugin)
        .insert_resource(LoadedConfig(load_config()))
        .add_systems(Startup, spawn_local_player)
        .run();
}

fn load_config() -> GameConfig {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    match GameConfig::load(&path) {
        Ok(config) => config,
        Err(err) => {
            log_error(&format!("Using built-in tuning, {} unusable: {}", path, err));
            GameConfig::default()
        }
    }
}

/// Spawn игрока: locomotion entity set + камера + kinematic тело в Rapier
fn spawn_local_player(
    mut commands: Commands,
    config: Res<LoadedConfig>,
    mut rng: ResMut<DeterministicRng>,
) {
    let config = &config.0;
    let seed = rng.next_weapon_seed();
    let entities = spawn_player(&mut commands, config, SPAWN_POINT, 0.0, seed);

    // Тело двигает Locomotion (через Transform), Rapier только видит его для других
    commands
        .entity(entities.player)
        .insert((LocalPlayer, RigidBody::KinematicPositionBased))
        .with_children(|body| {
            body.spawn((
                agent_capsule(&config.agent),
                Transform::from_translation(capsule_center(&config.agent)),
            ));
        });

    commands.entity(entities.view).insert((
        Camera3d::default(),
        Visibility::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 70.0_f32.to_radians(),
            near: 0.01,
            ..default()
        }),
    ));

    log_info(&format!("Local player ready (camera {:?})", entities.view));
}
