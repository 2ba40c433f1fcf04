//! Capability интерфейсы вокруг Locomotion
//!
//! - LocomotionAgent: источник input + pre/post hooks (игрок, бот, скрипт теста)
//! - CollisionMover: collision-aware move primitive (физический движок)
//!
//! Locomotion зависит только от этих trait'ов, никогда от конкретного агента.

use bevy::prelude::*;

use super::{AgentConfig, LocomotionState};

/// Агент, которым двигает Locomotion
///
/// Все методы имеют нейтральный default (нет input, пустые hooks).
pub trait LocomotionAgent {
    /// Относительный поворот ЗА КАДР (градусы): x = pitch, y = yaw
    fn rotation_input(&mut self, _dt: f32) -> Vec2 {
        Vec2::ZERO
    }

    /// Желаемое направление в world XZ (x, z). Длина может быть > 1.
    ///
    /// Вызывается после обновления rotation, можно использовать текущий yaw.
    fn movement_input(&mut self, _state: &LocomotionState) -> Vec2 {
        Vec2::ZERO
    }

    /// Запрос прыжка. Спрашивается ТОЛЬКО на земле и когда debounce истёк.
    fn jump_requested(&mut self) -> bool {
        false
    }

    /// До rotation/movement update (state ещё прошлого кадра)
    fn pre_update(&mut self, _state: &LocomotionState) {}

    /// После move (state уже обновлён: позиция, velocity, grounded)
    fn post_update(&mut self, _state: &LocomotionState, _config: &AgentConfig, _dt: f32) {}
}

/// Пассивный агент (без input)
impl LocomotionAgent for () {}

/// Collision-aware move primitive
///
/// Контракт:
/// - двигает collision volume на displacement, разрешая пенетрации
/// - единственный, кто меняет world позицию агента
/// - возвращает grounded для результирующей позиции
pub trait CollisionMover {
    fn move_by(&mut self, displacement: Vec3) -> bool;

    /// Позиция ног агента после последнего move
    fn position(&self) -> Vec3;
}
