//! LocomotionState — состояние тела агента (владеет Locomotion)
//!
//! Конвенция осей (Bevy, right-handed):
//! - forward = -Z, right = +X, up = +Y
//! - rotation.x = pitch (градусы, + смотрим вверх), clamp [-90, 90]
//! - rotation.y = yaw (градусы, + поворот вправо), wrap [0, 360)

use bevy::prelude::*;

/// Pitch лимит (градусы)
pub const PITCH_LIMIT: f32 = 90.0;

/// Состояние локомоции. Мутирует только Locomotion::update (раз в кадр).
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct LocomotionState {
    /// Позиция ног агента (world space), пишется move primitive'ом
    pub position: Vec3,
    /// Velocity (world space, m/s)
    pub velocity: Vec3,
    /// x = pitch, y = yaw (градусы)
    pub rotation: Vec2,
    /// Результат ПРЕДЫДУЩЕГО move (выбирает режим следующего кадра)
    pub grounded: bool,
    /// Jump debounce таймер (секунды)
    pub jump_timer: f32,
}

impl LocomotionState {
    pub fn pitch(&self) -> f32 {
        self.rotation.x
    }

    pub fn yaw(&self) -> f32 {
        self.rotation.y
    }

    /// Ориентация тела (только yaw, pitch влияет лишь на камеру)
    pub fn facing(&self) -> Quat {
        facing_from_yaw(self.yaw())
    }

    /// Ориентация взгляда: yaw тела, затем pitch
    pub fn view_rotation(&self) -> Quat {
        self.facing() * Quat::from_rotation_x(self.pitch().to_radians())
    }

    /// Velocity в пространстве тела (x = вправо, z = назад)
    pub fn relative_velocity(&self) -> Vec3 {
        self.facing().inverse() * self.velocity
    }

    pub fn horizontal_speed(&self) -> f32 {
        Vec2::new(self.velocity.x, self.velocity.z).length()
    }
}

/// Yaw (градусы, по часовой сверху) → кватернион вокруг +Y
pub fn facing_from_yaw(yaw_degrees: f32) -> Quat {
    Quat::from_rotation_y(-yaw_degrees.to_radians())
}

/// Локальный input (x = strafe вправо, y = вперёд) → world XZ направление
///
/// Возвращает Vec2(world.x, world.z), длина сохраняется.
pub fn rotate_to_world(yaw_degrees: f32, local: Vec2) -> Vec2 {
    let world = facing_from_yaw(yaw_degrees) * Vec3::new(local.x, 0.0, -local.y);
    Vec2::new(world.x, world.z)
}
