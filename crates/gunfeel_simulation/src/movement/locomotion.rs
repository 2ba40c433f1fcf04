//! Locomotion model — velocity integration с grounded/airborne режимами
//!
//! Кадр:
//! 1. pre_update hook
//! 2. rotation (pitch clamp, yaw wrap)
//! 3. режим по grounded ПРЕДЫДУЩЕГО кадра (ground / air)
//! 4. move primitive(velocity * dt) → grounded для следующего кадра
//! 5. post_update hook
//!
//! One-frame lag grounded флага намеренный: решение о режиме всегда
//! принимается по результату прошлого move.

use bevy::prelude::*;

use super::hooks::{CollisionMover, LocomotionAgent};
use super::state::PITCH_LIMIT;
use super::{AgentConfig, LocomotionState};
use crate::animation::{clamp_to_unit_circle, lerp, wrap_degrees};
use crate::logger::{is_enabled, LogLevel};

/// Jump debounce окно (секунды)
pub const JUMP_DEBOUNCE: f32 = 0.1;

/// Вертикальная скорость на земле (m/s), прижимает к спускам
pub const GROUND_STICK_VELOCITY: f32 = -3.0;

/// Скорость подтягивания к GROUND_STICK_VELOCITY (1/s)
pub const GROUND_STICK_RATE: f32 = 20.0;

/// Гравитация в воздухе (m/s²)
pub const GRAVITY: f32 = 20.0;

/// Locomotion компонент: config + state одного агента
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Locomotion {
    pub config: AgentConfig,
    state: LocomotionState,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self::new(AgentConfig::default(), Vec3::ZERO, 0.0)
    }
}

impl Locomotion {
    /// Стартовый yaw берётся от spawn transform, pitch = 0
    pub fn new(config: AgentConfig, position: Vec3, yaw: f32) -> Self {
        Self {
            config,
            state: LocomotionState {
                position,
                rotation: Vec2::new(0.0, wrap_degrees(yaw)),
                ..default()
            },
        }
    }

    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    /// Выставить grounded вручную (spawn на земле без первого move)
    pub fn with_grounded(mut self, grounded: bool) -> Self {
        self.state.grounded = grounded;
        self
    }

    /// Стартовая velocity (spawn с падением, knockback)
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.state.velocity = velocity;
        self
    }

    /// Один тик симуляции
    pub fn update(&mut self, agent: &mut impl LocomotionAgent, mover: &mut impl CollisionMover, dt: f32) {
        agent.pre_update(&self.state);

        // ROTATION
        let rotation_delta = agent.rotation_input(dt);
        self.apply_rotation(rotation_delta);

        // MOVEMENT
        let desired = agent.movement_input(&self.state);
        if self.state.grounded {
            self.ground_update(agent, desired, dt);
        } else {
            self.air_update(desired, dt);
        }

        let was_grounded = self.state.grounded;
        self.state.grounded = mover.move_by(self.state.velocity * dt);
        self.state.position = mover.position();

        if was_grounded != self.state.grounded && is_enabled(LogLevel::Debug) {
            crate::logger::log(&format!(
                "Locomotion: {} at {:?} (vy = {:.2})",
                if self.state.grounded { "landed" } else { "left ground" },
                self.state.position,
                self.state.velocity.y
            ));
        }

        agent.post_update(&self.state, &self.config, dt);
    }

    fn apply_rotation(&mut self, delta: Vec2) {
        let rotation = &mut self.state.rotation;
        rotation.x = (rotation.x + delta.x).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        rotation.y = wrap_degrees(rotation.y + delta.y);
    }

    fn ground_update(&mut self, agent: &mut impl LocomotionAgent, desired: Vec2, dt: f32) {
        self.state.jump_timer -= dt;

        // Почти мгновенный отклик на земле
        self.blend_horizontal(desired, self.config.ground_input_rate, dt);

        // jump_requested спрашиваем только когда debounce истёк
        if self.state.jump_timer <= 0.0 && agent.jump_requested() {
            let velocity = &mut self.state.velocity;
            if velocity.y <= 0.0 {
                velocity.y = self.config.jump_speed;
            } else {
                // Bunny-hop: прыжок в уже восходящую скорость
                velocity.y += self.config.jump_speed;
            }
            self.state.jump_timer = JUMP_DEBOUNCE;

            if is_enabled(LogLevel::Debug) {
                crate::logger::log(&format!("Locomotion: jump (vy = {:.2})", velocity.y));
            }
        } else {
            self.state.velocity.y = lerp(self.state.velocity.y, GROUND_STICK_VELOCITY, GROUND_STICK_RATE * dt);
        }
    }

    fn air_update(&mut self, desired: Vec2, dt: f32) {
        // Прыжок снова доступен в момент приземления
        self.state.jump_timer = 0.0;
        self.state.velocity.y -= GRAVITY * dt;

        // Сглаженный input для air control
        self.blend_horizontal(desired, self.config.air_input_rate, dt);
    }

    fn blend_horizontal(&mut self, desired: Vec2, rate: f32, dt: f32) {
        let target = clamp_to_unit_circle(desired) * self.config.max_speed;
        let factor = rate * dt;

        self.state.velocity.x = lerp(self.state.velocity.x, target.x, factor);
        self.state.velocity.z = lerp(self.state.velocity.z, target.y, factor);
    }
}
