//! Интеграционные тесты LocomotionPlugin (headless, GroundPlane)

use bevy::prelude::*;
use gunfeel_simulation::{
    create_headless_app, spawn_player_in_world, GameConfig, HeldWeapon, Locomotion, PlayerController,
    PlayerEntities,
};

fn setup() -> (App, PlayerEntities) {
    let mut app = create_headless_app(7);
    let entities = spawn_player_in_world(app.world_mut(), &GameConfig::default(), Vec3::ZERO, 0.0);
    // Первый update: dt = 0, агент "встаёт" на пол
    app.update();
    (app, entities)
}

fn with_input(app: &mut App, player: Entity, apply: impl FnOnce(&mut PlayerController)) {
    if let Some(mut controller) = app.world_mut().get_mut::<PlayerController>(player) {
        apply(&mut controller);
    }
}

fn locomotion(app: &App, player: Entity) -> &Locomotion {
    app.world().get::<Locomotion>(player).expect("player has Locomotion")
}

#[test]
fn test_spawned_agent_lands_on_plane() {
    let (mut app, entities) = setup();
    app.update();

    let state = *locomotion(&app, entities.player).state();
    assert!(state.grounded);
    assert_eq!(state.position.y, 0.0);
}

#[test]
fn test_running_forward_moves_along_negative_z() {
    let (mut app, entities) = setup();

    for _ in 0..60 {
        with_input(&mut app, entities.player, |controller| {
            controller.input_mut().movement = Vec2::new(0.0, 1.0);
        });
        app.update();
    }

    let state = *locomotion(&app, entities.player).state();
    assert!(state.position.z < -5.0, "position = {:?}", state.position);
    assert!(state.position.x.abs() < 1e-3);
    assert!(state.horizontal_speed() > 14.0);

    // Transform тела синхронизирован
    let transform = app.world().get::<Transform>(entities.player).unwrap();
    assert_eq!(transform.translation, state.position);
}

#[test]
fn test_jump_leaves_ground_and_lands() {
    let (mut app, entities) = setup();
    app.update();

    let mut max_height: f32 = 0.0;
    for frame in 0..90 {
        with_input(&mut app, entities.player, |controller| {
            controller.input_mut().jump = frame == 0;
        });
        app.update();
        max_height = max_height.max(locomotion(&app, entities.player).state().position.y);
    }

    // Апекс ≈ jump_speed² / (2 * gravity) = 0.625
    assert!(max_height > 0.5, "max height = {}", max_height);
    assert!(max_height < 0.7, "max height = {}", max_height);

    let state = *locomotion(&app, entities.player).state();
    assert!(state.grounded);
    assert_eq!(state.position.y, 0.0);
}

#[test]
fn test_look_input_turns_body_and_view() {
    let (mut app, entities) = setup();

    with_input(&mut app, entities.player, |controller| {
        controller.input_mut().look_delta = Vec2::new(1.0, 10.0);
    });
    app.update();

    let state = *locomotion(&app, entities.player).state();
    assert!((state.yaw() - 90.0).abs() < 1e-4);
    assert!((state.pitch() - 9.0).abs() < 1e-4);

    // look_delta потреблён: следующий кадр без поворота
    app.update();
    assert!((locomotion(&app, entities.player).state().yaw() - 90.0).abs() < 1e-4);

    let body = *app.world().get::<Transform>(entities.player).unwrap();
    assert!(body.rotation.abs_diff_eq(state.facing(), 1e-6), "body = {:?}", body.rotation);

    let view = *app.world().get::<Transform>(entities.view).unwrap();
    let controller = app.world().get::<PlayerController>(entities.player).unwrap();
    assert_eq!(view, controller.view());
    assert!((view.translation.y - 1.44).abs() < 1e-4);
}

#[test]
fn test_weapon_entity_follows_animator() {
    let (mut app, entities) = setup();

    for _ in 0..30 {
        with_input(&mut app, entities.player, |controller| {
            controller.input_mut().movement = Vec2::new(1.0, 0.0);
        });
        app.update();
    }

    let controller = app.world().get::<PlayerController>(entities.player).unwrap();
    let weapon_transform = *app.world().get::<Transform>(entities.weapon).unwrap();
    assert_eq!(weapon_transform, controller.weapon_pose());
    assert_ne!(weapon_transform, controller.weapon().rest_pose());

    let held = app.world().get::<HeldWeapon>(entities.weapon).unwrap();
    assert_eq!(held.owner, entities.player);
    assert_eq!(held.model, GameConfig::default().weapon.model);
}
