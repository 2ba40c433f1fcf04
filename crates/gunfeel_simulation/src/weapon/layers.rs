//! Procedural layers — чистые функции, каждая даёт WeaponOffset
//!
//! Конвенция WeaponOffset (Bevy, mount space):
//! - translation: +X вправо, +Y вверх, +Z назад (к камере)
//! - rotation (градусы): x = pitch (+ ствол вверх), y = вокруг +Y (+ влево),
//!   z = roll вокруг +Z
//!
//! Состояние фильтров хранит WeaponAnimator, функции только считают offset.

use std::ops::{Add, AddAssign};

use bevy::prelude::*;
use noise::{NoiseFn, Perlin};

/// Нормализация вертикальной скорости (|g| в m/s²)
pub const GRAVITY_REFERENCE: f32 = 9.81;

/// Аддитивная дельта позы оружия
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct WeaponOffset {
    pub translation: Vec3,
    /// Euler углы в градусах
    pub rotation: Vec3,
}

impl WeaponOffset {
    pub const ZERO: Self = Self {
        translation: Vec3::ZERO,
        rotation: Vec3::ZERO,
    };

    pub fn new(translation: Vec3, rotation: Vec3) -> Self {
        Self { translation, rotation }
    }

    pub fn from_rotation(rotation: Vec3) -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation,
        }
    }

    /// Euler (yaw, затем pitch, затем roll) → кватернион
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y.to_radians(),
            self.rotation.x.to_radians(),
            self.rotation.z.to_radians(),
        )
    }

    /// Наложить на rest pose (rest никогда не мутирует)
    pub fn apply_to(&self, rest: Transform) -> Transform {
        Transform {
            translation: rest.translation + self.translation,
            rotation: rest.rotation * self.rotation_quat(),
            scale: rest.scale,
        }
    }
}

impl Add for WeaponOffset {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            translation: self.translation + other.translation,
            rotation: self.rotation + other.rotation,
        }
    }
}

impl AddAssign for WeaponOffset {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::iter::Sum for WeaponOffset {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Разбивка кадра по слоям (для отладки и тестов)
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct LayerOffsets {
    pub sway: WeaponOffset,
    pub lean: WeaponOffset,
    pub aim: WeaponOffset,
    pub recoil: WeaponOffset,
    pub noise: WeaponOffset,
    pub idle: WeaponOffset,
    pub run: WeaponOffset,
}

impl LayerOffsets {
    pub fn iter(&self) -> impl Iterator<Item = WeaponOffset> {
        [self.sway, self.lean, self.aim, self.recoil, self.noise, self.idle, self.run].into_iter()
    }

    pub fn total(&self) -> WeaponOffset {
        self.iter().sum()
    }
}

/// Velocity тела → доли от max speed / gravity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionRatios {
    /// + вправо
    pub sideways: f32,
    /// + вперёд (-Z тела)
    pub forwards: f32,
    /// + вверх
    pub vertical: f32,
}

impl MotionRatios {
    pub fn from_velocity(relative_velocity: Vec3, max_speed: f32) -> Self {
        let (sideways, forwards) = if max_speed > 0.0 {
            (relative_velocity.x / max_speed, -relative_velocity.z / max_speed)
        } else {
            (0.0, 0.0)
        };

        Self {
            sideways,
            forwards,
            vertical: relative_velocity.y / GRAVITY_REFERENCE,
        }
    }

    /// Длина горизонтальной части (скорость бега для run цикла)
    pub fn planar(&self) -> f32 {
        Vec2::new(self.sideways, self.forwards).length()
    }
}

/// 1. Sway: смещение от быстрого фильтра velocity
///
/// Назад уходит только при движении назад, бег вперёд оружие не оттягивает.
pub fn sway(fast: &MotionRatios) -> WeaponOffset {
    WeaponOffset::new(
        Vec3::new(
            fast.sideways * 0.03,
            fast.vertical * 0.07,
            -fast.forwards.min(0.0) * 0.03,
        ),
        Vec3::ZERO,
    )
}

/// 2. Lean: наклон от медленного фильтра velocity
pub fn lean(slow: &MotionRatios) -> WeaponOffset {
    WeaponOffset::from_rotation(Vec3::new(
        -(slow.forwards + slow.vertical * 2.0),
        slow.sideways * 0.5,
        slow.sideways * -7.0,
    ))
}

/// 3. Aim sway: оружие догоняет поворот взгляда
///
/// `aim` — сглаженная скорость поворота, каждая ось уже в [-1, 1].
pub fn aim_sway(aim: Vec2) -> WeaponOffset {
    WeaponOffset::from_rotation(Vec3::new(aim.x * 2.0, aim.y * -2.0, aim.y * -15.0))
}

/// 4. Recoil: кик ствола вверх, смещение вверх и назад
pub fn recoil(total: f32, angles: f32, movement: f32) -> WeaponOffset {
    WeaponOffset::new(
        Vec3::new(0.0, total * movement, total * movement),
        Vec3::new(total * angles, 0.0, 0.0),
    )
}

/// 5. Noise: медленный coherent jitter, прячет повторяемость циклов
pub fn noise(samples: [f32; 5]) -> WeaponOffset {
    let centered = samples.map(|sample| 0.5 - sample);
    WeaponOffset::new(
        Vec3::new(centered[0] * 0.02, centered[1] * 0.025, 0.0),
        Vec3::new(-centered[2] * 2.0, -centered[3] * 2.0, centered[4] * 2.0),
    )
}

/// 6/7. Sine cycle (idle дыхание, шаги бега)
///
/// Вертикаль идёт на двойной частоте, горизонталь на одинарной (восьмёрка).
pub fn sine_cycle(phase: f32, vertical: f32, horizontal: f32, rotation: f32) -> WeaponOffset {
    WeaponOffset::new(
        Vec3::new(phase.sin() * horizontal, (phase * 2.0).sin() * vertical, 0.0),
        Vec3::new(
            -(phase * 2.0 - 0.2).cos() * rotation * 0.5,
            -(phase - 0.2).sin() * rotation,
            0.0,
        ),
    )
}

/// 2D Perlin, отображённый в [0, 1]
#[derive(Clone)]
pub struct CoherentNoise {
    perlin: Perlin,
    seed: u32,
}

impl std::fmt::Debug for CoherentNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoherentNoise").field("seed", &self.seed).finish()
    }
}

impl CoherentNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let value = self.perlin.get([x as f64, y as f64]);
        ((value + 1.0) * 0.5).clamp(0.0, 1.0) as f32
    }

    /// Пять независимых каналов для noise слоя (разнесены по Perlin плоскости)
    pub fn samples(&self, timer: f32) -> [f32; 5] {
        [
            self.sample(1337.0, timer),
            self.sample(timer, 0.0),
            self.sample(86.0, timer),
            self.sample(-9244.0, timer),
            self.sample(800.0, timer),
        ]
    }
}
