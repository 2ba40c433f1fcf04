//! WeaponDefinition — immutable данные типа оружия
//!
//! Одна definition (через Arc) на все инстансы этого типа.
//! Значения по умолчанию: 10 выстрелов/с, 60° кика.

use std::sync::Arc;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::animator::WeaponAnimator;
use crate::animation::ResponseCurve;
use crate::config::{require_non_negative, ConfigError};

/// Анимируемая часть оружия (затвор, курок)
///
/// На каждый выстрел часть проигрывает `curve(t) * travel` от своей rest позиции.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartDefinition {
    pub name: String,
    /// Rest позиция части относительно корня оружия
    pub offset: Vec3,
    /// Смещение при значении кривой 1.0
    pub travel: Vec3,
    pub curve: Arc<ResponseCurve>,
}

impl Default for PartDefinition {
    fn default() -> Self {
        Self {
            name: "slide".to_string(),
            offset: Vec3::new(0.0, 0.05, 0.0),
            // Затвор уходит назад (+Z) и возвращается
            travel: Vec3::new(0.0, 0.0, 0.04),
            curve: Arc::new(ResponseCurve::linear(&[(0.0, 0.0), (0.03, 1.0), (0.12, 0.0)])),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponDefinition {
    /// Путь к модели (asset path)
    pub model: String,
    /// Смещение вниз/вверх от mount точки (метры)
    pub vertical_offset: f32,
    /// Смещение вперёд от mount точки (метры)
    pub depth_offset: f32,
    /// Стрелять пока зажат курок (решает потребитель, не animator)
    pub automatic: bool,
    /// Выстрелов в секунду
    pub fire_rate: f32,
    pub recoil_curve: Arc<ResponseCurve>,
    /// Кик вверх при значении recoil кривой 1.0 (градусы)
    pub recoil_angles: f32,
    /// Смещение вверх и назад при значении recoil кривой 1.0 (метры)
    pub recoil_movement: f32,
    pub parts: Vec<PartDefinition>,
}

impl Default for WeaponDefinition {
    fn default() -> Self {
        Self {
            model: "weapons/rifle.glb".to_string(),
            vertical_offset: 0.0,
            depth_offset: 0.0,
            automatic: false,
            fire_rate: 10.0,
            // Резкий импульс и плавный спад
            recoil_curve: Arc::new(ResponseCurve::linear(&[(0.0, 0.0), (0.05, 1.0), (0.35, 0.0)])),
            recoil_angles: 60.0,
            recoil_movement: 0.03,
            parts: vec![PartDefinition::default()],
        }
    }
}

impl WeaponDefinition {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fire_rate.is_finite() || self.fire_rate <= 0.0 {
            return Err(ConfigError::NonPositiveFireRate {
                model: self.model.clone(),
                fire_rate: self.fire_rate,
            });
        }
        if self.recoil_curve.is_empty() {
            return Err(ConfigError::EmptyRecoilCurve {
                model: self.model.clone(),
            });
        }
        self.require_finite_curve("recoil", &self.recoil_curve)?;
        for part in &self.parts {
            self.require_finite_curve(&part.name, &part.curve)?;
        }
        require_non_negative("weapon.recoil_movement", self.recoil_movement)?;
        if !self.recoil_angles.is_finite() {
            return Err(ConfigError::InvalidDimension {
                field: "weapon.recoil_angles",
                value: self.recoil_angles,
            });
        }
        Ok(())
    }

    /// Бесконечный time даёт бесконечную duration: события никогда не завершатся
    fn require_finite_curve(&self, curve_name: &str, curve: &ResponseCurve) -> Result<(), ConfigError> {
        match curve.first_non_finite() {
            Some(key) => Err(ConfigError::NonFiniteKeyframe {
                model: self.model.clone(),
                curve: curve_name.to_string(),
                time: key.time,
                value: key.value,
            }),
            None => Ok(()),
        }
    }

    /// Минимальный интервал между выстрелами (секунды)
    pub fn fire_interval(&self) -> f32 {
        1.0 / self.fire_rate
    }

    /// Rest pose оружия: mount + (0, vertical_offset, -depth_offset)
    pub fn rest_pose(&self, mount: Transform) -> Transform {
        let mut rest = mount;
        rest.translation += Vec3::new(0.0, self.vertical_offset, -self.depth_offset);
        rest
    }

    /// Создать runtime инстанс, rest pose фиксируется один раз
    pub fn instantiate(self: Arc<Self>, mount: Transform) -> WeaponAnimator {
        self.instantiate_seeded(mount, 0)
    }

    /// То же, но со своим seed для noise слоя
    pub fn instantiate_seeded(self: Arc<Self>, mount: Transform, seed: u32) -> WeaponAnimator {
        WeaponAnimator::new(self, mount, seed)
    }
}
