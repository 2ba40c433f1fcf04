//! Rapier move primitive — shape-cast капсулы агента
//!
//! Архитектура:
//! - Синхронный `KinematicCharacterController::move_shape` поверх read-only
//!   query pipeline (результат в том же кадре, grounded лаг ровно один кадр)
//! - Капсула чуть меньше AgentConfig на SKIN_WIDTH (offset контроллера)
//! - Коллайдеры собственного rigid body агента исключены из query

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use bevy_rapier3d::rapier::control::KinematicCharacterController;
use bevy_rapier3d::rapier::math::Isometry;

use crate::movement::{AgentConfig, CollisionMover};

/// Зазор между капсулой и геометрией (метры)
pub const SKIN_WIDTH: f32 = 0.02;

/// Query-капсула агента (radius - skin, height - 2 * skin)
pub fn agent_capsule(config: &AgentConfig) -> Collider {
    let radius = (config.radius - SKIN_WIDTH).max(0.01);
    let height = (config.height - 2.0 * SKIN_WIDTH).max(radius * 2.0);
    Collider::capsule_y(height * 0.5 - radius, radius)
}

/// Центр капсулы относительно ног агента
pub fn capsule_center(config: &AgentConfig) -> Vec3 {
    Vec3::Y * (config.height * 0.5)
}

/// CollisionMover поверх Rapier query pipeline
///
/// Создаётся на кадр внутри системы (держит borrow RapierContext).
pub struct RapierShapeMover<'a, 'w> {
    context: &'a RapierContext<'w>,
    collider: Collider,
    center_offset: Vec3,
    exclude: Option<Entity>,
    position: Vec3,
}

impl<'a, 'w> RapierShapeMover<'a, 'w> {
    pub fn new(context: &'a RapierContext<'w>, config: &AgentConfig, position: Vec3) -> Self {
        Self {
            context,
            collider: agent_capsule(config),
            center_offset: capsule_center(config),
            exclude: None,
            position,
        }
    }

    /// Не сталкиваться с коллайдерами своего rigid body (коллайдер может висеть на child)
    pub fn excluding(mut self, entity: Entity) -> Self {
        self.exclude = Some(entity);
        self
    }
}

impl CollisionMover for RapierShapeMover<'_, '_> {
    fn move_by(&mut self, displacement: Vec3) -> bool {
        let controller = KinematicCharacterController {
            offset: CharacterLength::Absolute(SKIN_WIDTH),
            ..default()
        };

        let mut filter = QueryFilter::default().exclude_sensors();
        if let Some(entity) = self.exclude {
            filter = filter.exclude_rigid_body(entity);
        }

        let pose: Isometry<f32> = (self.position + self.center_offset, Quat::IDENTITY).into();
        let dt = self.context.simulation.integration_parameters.dt;
        let shape = &*self.collider.raw;

        let movement = self.context.with_query_pipeline(filter, |pipeline| {
            controller.move_shape(dt, &pipeline.query_pipeline, shape, &pose, displacement.into(), |_| {})
        });

        self.position += Vec3::from(movement.translation);
        movement.grounded
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capsule_fits_inside_agent() {
        let config = AgentConfig::default();
        let capsule = agent_capsule(&config);

        let shape = capsule.as_capsule().map(|capsule| (capsule.half_height(), capsule.radius()));
        let (half_height, radius) = shape.unwrap();

        assert!((radius - 0.28).abs() < 1e-6);
        // Полная высота = 2 * (half_height + radius) = height - 2 * skin
        assert!((2.0 * (half_height + radius) - 1.76).abs() < 1e-5);
        assert_eq!(capsule_center(&config), Vec3::new(0.0, 0.9, 0.0));
    }
}
