//! Input source — абстракция над устройствами ввода
//!
//! Core никогда не опрашивает клавиатуру/мышь напрямую: client (или тест)
//! пишет snapshot в InputState каждый кадр.

use bevy::prelude::*;

/// Источник per-frame input для AgentController
///
/// # Coordinate System
/// - `movement`: x = strafe вправо, y = вперёд (каждая ось в [-1, 1])
/// - `look_delta`: x = pitch вверх, y = yaw вправо (сырые единицы устройства за кадр)
pub trait InputSource {
    fn movement(&self) -> Vec2;

    fn look_delta(&self) -> Vec2;

    /// Level: прыжок держится
    fn jump_held(&self) -> bool;

    /// Edge: курок нажат в этом кадре
    fn fire_pressed(&self) -> bool;

    /// Level: курок зажат (для автоматического огня на стороне потребителя)
    fn fire_held(&self) -> bool;
}

/// Snapshot ввода за кадр
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct InputState {
    pub movement: Vec2,
    pub look_delta: Vec2,
    pub jump: bool,
    pub fire_pressed: bool,
    pub fire_held: bool,
}

impl InputState {
    /// Сбросить per-frame дельты (edge trigger и look) после потребления
    pub fn clear_frame(&mut self) {
        self.look_delta = Vec2::ZERO;
        self.fire_pressed = false;
    }
}

impl InputSource for InputState {
    fn movement(&self) -> Vec2 {
        self.movement
    }

    fn look_delta(&self) -> Vec2 {
        self.look_delta
    }

    fn jump_held(&self) -> bool {
        self.jump
    }

    fn fire_pressed(&self) -> bool {
        self.fire_pressed
    }

    fn fire_held(&self) -> bool {
        self.fire_held
    }
}
