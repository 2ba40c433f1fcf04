//! AgentController — связывает input, Locomotion и оружие одного агента
//!
//! Порядок внутри кадра (вызывается из Locomotion::update):
//! 1. rotation_input: look delta * sensitivity (запоминается для aim sway)
//! 2. movement_input: локальный input → world по текущему yaw
//! 3. jump_requested: level сигнал прыжка
//! 4. post_update: view anchor, cooldown, fire (edge), animate оружия

use std::sync::Arc;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::input::{InputSource, InputState};
use crate::config::{require_non_negative, ConfigError};
use crate::movement::{rotate_to_world, AgentConfig, LocomotionAgent, LocomotionState};
use crate::weapon::{WeaponAnimator, WeaponDefinition};

/// Тюнинги управления и камеры
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Множитель look delta (градусы на единицу устройства)
    pub look_sensitivity: f32,
    /// Множитель look delta для aim sway оружия (отдельно от поворота тела)
    pub aim_sensitivity: f32,
    /// Высота view anchor в долях AgentConfig::height
    pub view_height_factor: f32,
    /// Отвод view anchor назад в долях AgentConfig::radius (parallax при повороте)
    pub view_pull_back_factor: f32,
    /// Точка крепления оружия в пространстве view anchor
    pub weapon_mount: Vec3,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            look_sensitivity: 9.0,
            aim_sensitivity: 3.0,
            view_height_factor: 0.8,
            view_pull_back_factor: 0.5,
            weapon_mount: Vec3::new(0.15, 0.0, 0.0),
        }
    }
}

impl ControlConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("controls.look_sensitivity", self.look_sensitivity)?;
        require_non_negative("controls.aim_sensitivity", self.aim_sensitivity)?;
        require_non_negative("controls.view_height_factor", self.view_height_factor)?;
        require_non_negative("controls.view_pull_back_factor", self.view_pull_back_factor)
    }

    pub fn weapon_mount_transform(&self) -> Transform {
        Transform::from_translation(self.weapon_mount)
    }
}

/// Player-like агент: один input source, одно активное оружие
#[derive(Component, Debug, Clone)]
pub struct AgentController<I: InputSource + Send + Sync + 'static> {
    pub controls: ControlConfig,
    input: I,
    weapon: WeaponAnimator,
    view: Transform,
    last_rotation_input: Vec2,
    last_look_delta: Vec2,
}

/// Controller игрока (input пишет client)
pub type PlayerController = AgentController<InputState>;

impl<I: InputSource + Send + Sync + 'static> AgentController<I> {
    /// Оружие создаётся сразу, rest pose = weapon_mount + offsets definition
    pub fn new(input: I, controls: ControlConfig, weapon: Arc<WeaponDefinition>, seed: u32) -> Self {
        let weapon = weapon.instantiate_seeded(controls.weapon_mount_transform(), seed);
        Self {
            controls,
            input,
            weapon,
            view: Transform::IDENTITY,
            last_rotation_input: Vec2::ZERO,
            last_look_delta: Vec2::ZERO,
        }
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// View anchor (world space), обновляется в post_update
    pub fn view(&self) -> Transform {
        self.view
    }

    pub fn weapon(&self) -> &WeaponAnimator {
        &self.weapon
    }

    /// Поза оружия в пространстве view anchor
    pub fn weapon_pose(&self) -> Transform {
        self.weapon.pose()
    }

    /// Поворот, применённый в последнем кадре (градусы)
    pub fn last_rotation_input(&self) -> Vec2 {
        self.last_rotation_input
    }

    /// Скорость поворота для aim sway: look delta * aim_sensitivity в секунду
    pub fn aim_rate(&self, dt: f32) -> Vec2 {
        if dt > 0.0 {
            self.last_look_delta * self.controls.aim_sensitivity / dt
        } else {
            Vec2::ZERO
        }
    }

    fn place_view(&mut self, state: &LocomotionState, config: &AgentConfig) {
        let local_offset = Vec3::new(
            0.0,
            config.height * self.controls.view_height_factor,
            config.radius * self.controls.view_pull_back_factor,
        );

        // Yaw уже в ориентации тела, камере добавляем только pitch
        self.view = Transform {
            translation: state.position + state.facing() * local_offset,
            rotation: state.view_rotation(),
            scale: Vec3::ONE,
        };
    }
}

impl<I: InputSource + Send + Sync + 'static> LocomotionAgent for AgentController<I> {
    fn rotation_input(&mut self, _dt: f32) -> Vec2 {
        self.last_look_delta = self.input.look_delta();
        self.last_rotation_input = self.last_look_delta * self.controls.look_sensitivity;
        self.last_rotation_input
    }

    fn movement_input(&mut self, state: &LocomotionState) -> Vec2 {
        rotate_to_world(state.yaw(), self.input.movement())
    }

    fn jump_requested(&mut self) -> bool {
        self.input.jump_held()
    }

    fn post_update(&mut self, state: &LocomotionState, config: &AgentConfig, dt: f32) {
        self.place_view(state, config);

        self.weapon.tick(dt);
        if self.input.fire_pressed() {
            self.weapon.fire();
        }

        self.weapon.animate(
            state.relative_velocity(),
            config.max_speed,
            self.aim_rate(dt),
            state.grounded,
            dt,
        );
    }
}
