//! Конфигурация агента, управления и оружия (RON)
//!
//! Архитектура:
//! - Тюнинги immutable после загрузки (AgentConfig, ControlConfig, WeaponDefinition)
//! - Один RON документ → GameConfig, валидация сразу при загрузке
//! - Отсутствующие поля берутся из Default
//!
//! Пример:
//! ```ron
//! (
//!     agent: (max_speed: 12.0, jump_speed: 6.0),
//!     weapon: (model: "weapons/rifle.glb", fire_rate: 12.0),
//! )
//! ```

mod error;

pub use error::ConfigError;

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::movement::AgentConfig;
use crate::player::ControlConfig;
use crate::weapon::WeaponDefinition;

/// Полный набор тюнингов для одного player-агента
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub agent: AgentConfig,
    pub controls: ControlConfig,
    pub weapon: WeaponDefinition,
}

impl GameConfig {
    /// Парсинг + валидация
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Чтение файла + парсинг + валидация
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|err| {
            crate::logger::log_error(&format!("Config read failed: {} ({})", path.display(), err));
            err
        })?;

        let config = Self::from_ron_str(&source).map_err(|err| {
            crate::logger::log_error(&format!("Config rejected: {} ({})", path.display(), err));
            err
        })?;

        crate::logger::log_info(&format!(
            "Config loaded: {} (weapon `{}`, {} shots/s)",
            path.display(),
            config.weapon.model,
            config.weapon.fire_rate
        ));

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.agent.validate()?;
        self.controls.validate()?;
        self.weapon.validate()
    }

    /// Shared weapon definition (одна на все инстансы этого типа)
    pub fn shared_weapon(&self) -> Arc<WeaponDefinition> {
        Arc::new(self.weapon.clone())
    }
}

/// Общий helper: конечное и неотрицательное
pub(crate) fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension { field, value })
    }
}

/// Общий helper: конечное и строго положительное
pub(crate) fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension { field, value })
    }
}

#[cfg(test)]
mod config_tests;
