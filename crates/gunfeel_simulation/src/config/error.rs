//! Ошибки загрузки конфигурации
//!
//! Real-time core ошибок не возвращает (всё clamp'ится). Валидация тюнингов
//! происходит один раз при загрузке, до создания агентов и оружия.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse RON config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("weapon `{model}`: fire_rate must be positive and finite, got {fire_rate}")]
    NonPositiveFireRate { model: String, fire_rate: f32 },

    #[error("weapon `{model}`: recoil curve has no keyframes")]
    EmptyRecoilCurve { model: String },

    #[error("weapon `{model}`: {curve} curve has non-finite keyframe (time {time}, value {value})")]
    NonFiniteKeyframe {
        model: String,
        curve: String,
        time: f32,
        value: f32,
    },

    #[error("invalid {field}: {value}")]
    InvalidDimension { field: &'static str, value: f32 },
}
