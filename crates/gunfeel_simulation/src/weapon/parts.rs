//! Part animators — затвор/курок проигрывают кривую на каждый выстрел

use std::sync::Arc;

use bevy::prelude::*;

use super::definition::PartDefinition;
use crate::animation::ResponseCurve;

/// Runtime состояние одной части
///
/// instances = elapsed таймеры активных проигрываний (перекрываются при
/// быстрой стрельбе, вклады суммируются).
#[derive(Debug, Clone)]
pub struct PartAnimator {
    name: String,
    rest: Transform,
    travel: Vec3,
    curve: Arc<ResponseCurve>,
    instances: Vec<f32>,
    pose: Transform,
}

impl PartAnimator {
    pub fn new(definition: &PartDefinition) -> Self {
        let rest = Transform::from_translation(definition.offset);
        Self {
            name: definition.name.clone(),
            rest,
            travel: definition.travel,
            curve: definition.curve.clone(),
            instances: Vec::new(),
            pose: rest,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rest_pose(&self) -> Transform {
        self.rest
    }

    /// Поза после последнего animate
    pub fn pose(&self) -> Transform {
        self.pose
    }

    pub fn is_playing(&self) -> bool {
        !self.instances.is_empty()
    }

    pub fn play(&mut self) {
        self.instances.push(0.0);
    }

    /// Продвинуть все проигрывания, пересчитать позу от rest
    pub fn animate(&mut self, dt: f32) -> Transform {
        let mut amount = 0.0;
        for elapsed in &mut self.instances {
            *elapsed += dt;
            amount += self.curve.evaluate(*elapsed);
        }

        let duration = self.curve.duration();
        self.instances.retain(|elapsed| *elapsed < duration);

        self.pose = self.rest;
        self.pose.translation += self.travel * amount;
        self.pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_cycles_back_to_rest() {
        let mut part = PartAnimator::new(&PartDefinition::default());
        part.play();

        // Пик кривой (0.03): затвор полностью назад
        let peak = part.animate(0.03);
        assert!((peak.translation.z - 0.04).abs() < 1e-5);
        assert!(part.is_playing());

        let end = part.animate(0.1);
        assert!((end.translation - part.rest_pose().translation).length() < 1e-5);
        assert!(!part.is_playing());
    }

    #[test]
    fn test_idle_part_stays_at_rest() {
        let mut part = PartAnimator::new(&PartDefinition::default());
        assert_eq!(part.animate(0.016), part.rest_pose());
        assert_eq!(part.name(), "slide");
    }
}
