//! Бесконечный горизонтальный пол (без Rapier)

use bevy::prelude::*;

use crate::movement::CollisionMover;

/// Высота пола для headless режима
#[derive(Resource, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Resource)]
pub struct GroundPlane {
    pub height: f32,
}

/// Move primitive поверх GroundPlane
///
/// Горизонталь проходит без препятствий, вертикаль упирается в пол.
/// grounded = попытка оказаться на уровне пола или ниже.
#[derive(Debug, Clone, Copy)]
pub struct GroundPlaneMover {
    pub position: Vec3,
    pub floor_height: f32,
}

impl GroundPlaneMover {
    pub fn new(position: Vec3, floor_height: f32) -> Self {
        Self {
            position,
            floor_height,
        }
    }
}

impl CollisionMover for GroundPlaneMover {
    fn move_by(&mut self, displacement: Vec3) -> bool {
        let mut attempted = self.position + displacement;
        let grounded = attempted.y <= self.floor_height;

        // Resolve penetration
        if grounded {
            attempted.y = self.floor_height;
        }

        self.position = attempted;
        grounded
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falling_through_floor_is_clamped() {
        let mut mover = GroundPlaneMover::new(Vec3::new(0.0, 0.05, 0.0), 0.0);

        let grounded = mover.move_by(Vec3::new(1.0, -0.2, 0.0));

        assert!(grounded);
        assert_eq!(mover.position(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_rising_above_floor_is_airborne() {
        let mut mover = GroundPlaneMover::new(Vec3::ZERO, 0.0);

        assert!(!mover.move_by(Vec3::new(0.0, 0.08, 0.0)));
        assert!((mover.position().y - 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_standing_on_floor_stays_grounded() {
        let mut mover = GroundPlaneMover::new(Vec3::new(0.0, 2.0, 0.0), 2.0);

        assert!(mover.move_by(Vec3::ZERO));
        assert_eq!(mover.position().y, 2.0);
    }
}
