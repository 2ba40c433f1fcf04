//! WeaponAnimator — runtime состояние одного инстанса оружия
//!
//! Каждый кадр поза пересчитывается от rest pose (non-cumulative):
//! pose = rest + sway + lean + aim + recoil + noise + idle + run.
//! Слои читают только входы кадра и собственные фильтры, никогда прошлую позу.

use std::f32::consts::TAU;
use std::sync::Arc;

use bevy::prelude::*;

use super::definition::WeaponDefinition;
use super::layers::{self, CoherentNoise, LayerOffsets, MotionRatios};
use super::parts::PartAnimator;
use super::recoil::{RecoilEvent, RecoilStack};
use crate::animation::{clamp_symmetric, lerp, lerp_vec3, smooth_damp_vec2, wrap_phase};
use crate::logger::{is_enabled, LogLevel};

/// Скорость медленного фильтра velocity (lean, run)
const SLOW_VELOCITY_RATE: f32 = 3.0;
/// Скорость быстрого фильтра velocity (sway)
const FAST_VELOCITY_RATE: f32 = 6.0;
/// Масштаб скорости поворота перед clamp'ом aim sway
const AIM_INPUT_SCALE: f32 = 0.1;
const AIM_SMOOTH_TIME: f32 = 0.4;
const NOISE_SPEED: f32 = 0.3;
const IDLE_SPEED: f32 = 2.0;
/// Полный цикл idle дыхания (секунды)
pub const IDLE_PERIOD: f32 = TAU / IDLE_SPEED;
const RUN_CYCLE_SPEED: f32 = 6.0;
const RUN_BLEND_GROUNDED: f32 = 15.0;
const RUN_BLEND_AIRBORNE: f32 = 5.0;

/// Фильтры и фазы (мутируют каждый animate)
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct AnimatorState {
    pub slow_velocity: Vec3,
    pub fast_velocity: Vec3,
    pub aim: Vec2,
    pub aim_velocity: Vec2,
    pub idle_phase: f32,
    pub run_phase: f32,
    pub run_interpolation: f32,
    pub noise_timer: f32,
}

#[derive(Debug, Clone)]
pub struct WeaponAnimator {
    definition: Arc<WeaponDefinition>,
    rest: Transform,
    state: AnimatorState,
    noise: CoherentNoise,
    fire_cooldown: f32,
    recoils: RecoilStack,
    parts: Vec<PartAnimator>,
    layers: LayerOffsets,
    pose: Transform,
}

impl WeaponAnimator {
    pub fn new(definition: Arc<WeaponDefinition>, mount: Transform, seed: u32) -> Self {
        let rest = definition.rest_pose(mount);
        let parts = definition.parts.iter().map(PartAnimator::new).collect();

        Self {
            definition,
            rest,
            state: AnimatorState::default(),
            noise: CoherentNoise::new(seed),
            fire_cooldown: 0.0,
            recoils: RecoilStack::default(),
            parts,
            layers: LayerOffsets::default(),
            pose: rest,
        }
    }

    pub fn definition(&self) -> &Arc<WeaponDefinition> {
        &self.definition
    }

    pub fn rest_pose(&self) -> Transform {
        self.rest
    }

    /// Поза после последнего animate (до первого вызова = rest)
    pub fn pose(&self) -> Transform {
        self.pose
    }

    pub fn state(&self) -> &AnimatorState {
        &self.state
    }

    /// Разбивка последнего кадра по слоям
    pub fn layers(&self) -> &LayerOffsets {
        &self.layers
    }

    pub fn parts(&self) -> &[PartAnimator] {
        &self.parts
    }

    pub fn recoil_count(&self) -> usize {
        self.recoils.len()
    }

    pub fn noise_seed(&self) -> u32 {
        self.noise.seed()
    }

    /// Обновление cooldown (каждый кадр, независимо от animate)
    pub fn tick(&mut self, dt: f32) {
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
    }

    pub fn can_fire(&self) -> bool {
        self.fire_cooldown <= 0.0
    }

    /// Попытка выстрела. Во время cooldown молча игнорируется.
    ///
    /// Автоматический огонь решает вызывающий: animator не знает,
    /// зажат ли курок с прошлого выстрела.
    pub fn fire(&mut self) -> bool {
        if !self.can_fire() {
            return false;
        }

        self.fire_cooldown = self.definition.fire_interval();
        self.recoils.push(RecoilEvent::new(self.definition.recoil_curve.clone()));
        for part in &mut self.parts {
            part.play();
        }

        if is_enabled(LogLevel::Debug) {
            crate::logger::log(&format!(
                "Weapon `{}`: fired ({} recoil events live)",
                self.definition.model,
                self.recoils.len()
            ));
        }

        true
    }

    /// Кадр анимации: пересчитать позу от rest pose
    ///
    /// - `relative_velocity`: velocity в пространстве тела (-Z = вперёд)
    /// - `max_speed`: нормализация sway/lean/run
    /// - `rotation_rate`: скорость поворота взгляда (градусы/с, x = pitch, y = yaw)
    /// - `grounded`: run цикл затухает в воздухе
    pub fn animate(
        &mut self,
        relative_velocity: Vec3,
        max_speed: f32,
        rotation_rate: Vec2,
        grounded: bool,
        dt: f32,
    ) -> Transform {
        self.layers = self.compute_layers(relative_velocity, max_speed, rotation_rate, grounded, dt);
        self.pose = self.layers.total().apply_to(self.rest);

        for part in &mut self.parts {
            part.animate(dt);
        }

        self.pose
    }

    fn compute_layers(
        &mut self,
        relative_velocity: Vec3,
        max_speed: f32,
        rotation_rate: Vec2,
        grounded: bool,
        dt: f32,
    ) -> LayerOffsets {
        let state = &mut self.state;

        // 1-2. Sway + lean (два low-pass фильтра velocity)
        state.slow_velocity = lerp_vec3(state.slow_velocity, relative_velocity, dt * SLOW_VELOCITY_RATE);
        state.fast_velocity = lerp_vec3(state.fast_velocity, relative_velocity, dt * FAST_VELOCITY_RATE);
        let fast = MotionRatios::from_velocity(state.fast_velocity, max_speed);
        let slow = MotionRatios::from_velocity(state.slow_velocity, max_speed);

        // 3. Aim sway
        let aim_target = clamp_symmetric(rotation_rate * AIM_INPUT_SCALE, 1.0);
        state.aim = smooth_damp_vec2(state.aim, aim_target, &mut state.aim_velocity, AIM_SMOOTH_TIME, dt);

        // 4. Recoil (sample pass + compaction)
        let recoil_total = self.recoils.drain(dt);

        // 5. Noise
        state.noise_timer += dt * NOISE_SPEED;
        let noise_samples = self.noise.samples(state.noise_timer);

        // 6. Idle
        state.idle_phase = wrap_phase(state.idle_phase + dt * IDLE_SPEED);

        // 7. Run
        let movement = slow.planar();
        let (run_target, run_rate) = if grounded {
            (movement.clamp(0.0, 1.0), RUN_BLEND_GROUNDED)
        } else {
            (0.0, RUN_BLEND_AIRBORNE)
        };
        state.run_interpolation = lerp(state.run_interpolation, run_target, dt * run_rate);
        state.run_phase = wrap_phase(state.run_phase + dt * movement * RUN_CYCLE_SPEED);
        let run = state.run_interpolation;

        LayerOffsets {
            sway: layers::sway(&fast),
            lean: layers::lean(&slow),
            aim: layers::aim_sway(state.aim),
            recoil: layers::recoil(recoil_total, self.definition.recoil_angles, self.definition.recoil_movement),
            noise: layers::noise(noise_samples),
            idle: layers::sine_cycle(state.idle_phase, 0.004, 0.007, 0.1),
            run: layers::sine_cycle(state.run_phase, 0.01 * run, 0.02 * run, 3.0 * run),
        }
    }
}
