//! AgentConfig — immutable тюнинги агента (capsule + движение)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{require_non_negative, require_positive, ConfigError};

/// Тюнинги агента. Задаются при создании, не мутируют.
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Радиус капсулы (метры)
    pub radius: f32,
    /// Высота капсулы (метры), pivot в ногах
    pub height: f32,
    /// Максимальная горизонтальная скорость (m/s)
    pub max_speed: f32,
    /// Скорость подтягивания velocity к input на земле (1/s)
    pub ground_input_rate: f32,
    /// Скорость подтягивания velocity к input в воздухе (1/s), медленнее
    pub air_input_rate: f32,
    /// Вертикальная скорость прыжка (m/s)
    pub jump_speed: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            radius: 0.3,
            height: 1.8,
            max_speed: 15.0,
            ground_input_rate: 30.0,
            air_input_rate: 5.0,
            jump_speed: 5.0,
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("agent.radius", self.radius)?;
        require_positive("agent.height", self.height)?;
        if self.height < self.radius * 2.0 {
            return Err(ConfigError::InvalidDimension {
                field: "agent.height (must fit two radii)",
                value: self.height,
            });
        }
        require_positive("agent.max_speed", self.max_speed)?;
        require_non_negative("agent.ground_input_rate", self.ground_input_rate)?;
        require_non_negative("agent.air_input_rate", self.air_input_rate)?;
        require_non_negative("agent.jump_speed", self.jump_speed)
    }
}
