//! Spawn helper для player-агента (тело + view anchor + оружие + части)

use bevy::prelude::*;

use super::components::{HeldWeapon, PlayerView, WeaponPart};
use super::controller::{AgentController, PlayerController};
use super::input::InputState;
use crate::config::GameConfig;
use crate::movement::Locomotion;

/// Entity, созданные spawn_player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerEntities {
    pub player: Entity,
    pub view: Entity,
    pub weapon: Entity,
}

/// Создать player entity set
///
/// - `yaw`: стартовый поворот (градусы, + вправо), pitch всегда 0
/// - `seed`: seed noise слоя оружия (обычно из DeterministicRng)
pub fn spawn_player(
    commands: &mut Commands,
    config: &GameConfig,
    position: Vec3,
    yaw: f32,
    seed: u32,
) -> PlayerEntities {
    let locomotion = Locomotion::new(config.agent, position, yaw);
    let controller: PlayerController =
        AgentController::new(InputState::default(), config.controls, config.shared_weapon(), seed);

    let view = commands
        .spawn((Name::new("PlayerView"), Transform::default()))
        .id();

    let weapon_rest = controller.weapon().rest_pose();
    let part_rests: Vec<(String, Transform)> = controller
        .weapon()
        .parts()
        .iter()
        .map(|part| (part.name().to_string(), part.rest_pose()))
        .collect();

    let player = commands
        .spawn((
            Name::new("Player"),
            Transform::from_translation(position).with_rotation(locomotion.state().facing()),
            locomotion,
            controller,
            PlayerView { camera: view },
        ))
        .id();

    let weapon = commands
        .spawn((
            Name::new(config.weapon.model.clone()),
            HeldWeapon {
                owner: player,
                model: config.weapon.model.clone(),
            },
            weapon_rest,
            ChildOf(view),
        ))
        .id();

    for (index, (name, rest)) in part_rests.into_iter().enumerate() {
        commands.spawn((
            Name::new(name.clone()),
            WeaponPart {
                owner: player,
                index,
                name,
            },
            rest,
            ChildOf(weapon),
        ));
    }

    crate::logger::log_info(&format!(
        "Player spawned at {:?} (yaw {:.1}°, weapon `{}`, noise seed {})",
        position, yaw, config.weapon.model, seed
    ));

    PlayerEntities { player, view, weapon }
}
