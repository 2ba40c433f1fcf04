//! ECS компоненты вокруг PlayerController
//!
//! Иерархия entity:
//! - player (Locomotion + PlayerController + PlayerView), Transform = ноги
//! - view anchor (камера в client), Transform = controller.view()
//!   - weapon (HeldWeapon, child view anchor), Transform = controller.weapon_pose()
//!     - parts (WeaponPart, child weapon)

use bevy::prelude::*;

/// Ссылка player → view anchor entity
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PlayerView {
    pub camera: Entity,
}

/// Визуальное оружие в руках агента
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct HeldWeapon {
    pub owner: Entity,
    /// Asset path модели (client грузит меш)
    pub model: String,
}

/// Анимируемая часть оружия (index в WeaponAnimator::parts)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct WeaponPart {
    pub owner: Entity,
    pub index: usize,
    pub name: String,
}
