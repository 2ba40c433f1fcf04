//! Smoothing helpers (lerp, critically-damped spring, clamps)
//!
//! Все функции чистые: состояние (velocity spring'а) хранит вызывающий.

use bevy::prelude::*;

/// Линейная интерполяция, `t` clamp'ится к [0, 1]
///
/// Используется как exponential smoothing: `lerp(current, target, rate * dt)`.
/// Это НЕ critically damped — при `rate * dt >= 1` значение прыгает в target.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a.lerp(b, t.clamp(0.0, 1.0))
}

/// Critically-damped spring к target (аппроксимация из Game Programming Gems 4)
///
/// `velocity` — внутреннее состояние spring'а, живёт между кадрами.
/// Не перелетает target: при overshoot значение фиксируется в target.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;

    let mut output = target + (change + temp) * decay;

    // Overshoot guard
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }

    output
}

/// `smooth_damp` по каждой оси независимо
pub fn smooth_damp_vec2(current: Vec2, target: Vec2, velocity: &mut Vec2, smooth_time: f32, dt: f32) -> Vec2 {
    Vec2::new(
        smooth_damp(current.x, target.x, &mut velocity.x, smooth_time, dt),
        smooth_damp(current.y, target.y, &mut velocity.y, smooth_time, dt),
    )
}

/// Clamp каждой оси к [-max, max]
#[inline]
pub fn clamp_symmetric(v: Vec2, max: f32) -> Vec2 {
    v.clamp(Vec2::splat(-max), Vec2::splat(max))
}

/// Угол в градусах → [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid для крошечных отрицательных даёт ровно 360.0 (округление)
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Фаза цикла → [0, 2π)
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    let wrapped = phase.rem_euclid(std::f32::consts::TAU);
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Вектор длиннее 1 приводится к единичной длине, короче — без изменений
#[inline]
pub fn clamp_to_unit_circle(v: Vec2) -> Vec2 {
    let magnitude = v.length();
    if magnitude > 1.0 {
        v / magnitude
    } else {
        v
    }
}
