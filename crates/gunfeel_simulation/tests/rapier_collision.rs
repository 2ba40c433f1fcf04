//! Интеграционные тесты Rapier backend'а (move_shape капсулы против коллайдеров)

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use bevy_rapier3d::prelude::*;
use gunfeel_simulation::physics::{agent_capsule, capsule_center};
use gunfeel_simulation::{
    spawn_player_in_world, DeterministicRng, GameConfig, Locomotion, MoverBackend, PlayerController,
    PlayerEntities, SimulationPlugin,
};

/// Headless app с настоящим Rapier миром: пол (верх на y = 0) + стена перед агентом
fn setup(spawn: Vec3) -> (App, PlayerEntities) {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TransformPlugin, RapierPhysicsPlugin::<NoUserData>::default()))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .insert_resource(DeterministicRng::new(5))
        .add_plugins(SimulationPlugin {
            backend: MoverBackend::Rapier,
        });

    app.world_mut().spawn((Collider::cuboid(20.0, 0.5, 20.0), Transform::from_xyz(0.0, -0.5, 0.0)));
    // Передняя грань стены на z = -2.5
    app.world_mut().spawn((Collider::cuboid(5.0, 2.0, 0.5), Transform::from_xyz(0.0, 2.0, -3.0)));

    let config = GameConfig::default();
    let entities = spawn_player_in_world(app.world_mut(), &config, spawn, 0.0);

    // Тело агента как в client: kinematic body + собственная капсула
    app.world_mut()
        .entity_mut(entities.player)
        .insert(RigidBody::KinematicPositionBased)
        .with_children(|body| {
            body.spawn((
                agent_capsule(&config.agent),
                Transform::from_translation(capsule_center(&config.agent)),
            ));
        });

    // Первые кадры: коллайдеры попадают в broad phase
    app.update();
    app.update();
    (app, entities)
}

fn locomotion(app: &App, player: Entity) -> &Locomotion {
    app.world().get::<Locomotion>(player).expect("player has Locomotion")
}

#[test]
fn test_capsule_falls_onto_floor_and_stops() {
    let (mut app, entities) = setup(Vec3::new(0.0, 1.0, 5.0));

    for _ in 0..120 {
        app.update();
    }

    let state = *locomotion(&app, entities.player).state();
    assert!(state.grounded, "state = {:?}", state);
    assert!(state.position.y.abs() < 0.1, "position = {:?}", state.position);
}

#[test]
fn test_wall_blocks_forward_motion() {
    let (mut app, entities) = setup(Vec3::new(0.0, 0.0, 0.0));

    for _ in 0..120 {
        if let Some(mut controller) = app.world_mut().get_mut::<PlayerController>(entities.player) {
            controller.input_mut().movement = Vec2::new(0.0, 1.0);
        }
        app.update();
    }

    let state = *locomotion(&app, entities.player).state();
    // Агент дошёл до стены, но не прошёл сквозь неё (радиус 0.3)
    assert!(state.position.z < -1.5, "position = {:?}", state.position);
    assert!(state.position.z > -2.3, "position = {:?}", state.position);
    assert!(state.grounded);
}
