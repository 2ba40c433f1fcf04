//! LocomotionPlugin — per-frame драйвер агентов
//!
//! Update, строго по порядку:
//! 1. LocomotionSet::Drive — Locomotion::update (move primitive выбранного backend'а)
//! 2. LocomotionSet::Sync — Transform тела → view anchor → оружие → части
//!
//! Client пишет input в PlayerController ДО LocomotionSet::Drive.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{HeldWeapon, PlayerView, WeaponPart};
use super::controller::PlayerController;
use crate::movement::Locomotion;
use crate::physics::{GroundPlane, GroundPlaneMover, RapierShapeMover};

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionSet {
    Drive,
    Sync,
}

/// Collision backend для move primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoverBackend {
    /// Бесконечный пол на заданной высоте (headless)
    GroundPlane { height: f32 },
    /// RapierContext::move_shape (нужен RapierPhysicsPlugin)
    Rapier,
}

impl Default for MoverBackend {
    fn default() -> Self {
        MoverBackend::GroundPlane { height: 0.0 }
    }
}

#[derive(Default)]
pub struct LocomotionPlugin {
    pub backend: MoverBackend,
}

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Locomotion>()
            .register_type::<PlayerView>()
            .register_type::<HeldWeapon>()
            .register_type::<WeaponPart>()
            .configure_sets(Update, (LocomotionSet::Drive, LocomotionSet::Sync).chain())
            .add_systems(
                Update,
                (sync_agent_transforms, sync_view_anchors, sync_weapon_poses)
                    .chain()
                    .in_set(LocomotionSet::Sync),
            );

        match self.backend {
            MoverBackend::GroundPlane { height } => {
                app.register_type::<GroundPlane>()
                    .insert_resource(GroundPlane { height })
                    .add_systems(Update, drive_agents_on_ground_plane.in_set(LocomotionSet::Drive));
            }
            MoverBackend::Rapier => {
                app.add_systems(Update, drive_agents_with_rapier.in_set(LocomotionSet::Drive));
            }
        }
    }
}

/// Система: locomotion поверх GroundPlane
pub fn drive_agents_on_ground_plane(
    time: Res<Time>,
    plane: Res<GroundPlane>,
    mut agents: Query<(&mut Locomotion, &mut PlayerController)>,
) {
    let dt = time.delta_secs();

    for (mut locomotion, mut controller) in agents.iter_mut() {
        let mut mover = GroundPlaneMover::new(locomotion.state().position, plane.height);
        locomotion.update(&mut *controller, &mut mover, dt);
        controller.input_mut().clear_frame();
    }
}

/// Система: locomotion через Rapier shape-cast
pub fn drive_agents_with_rapier(
    time: Res<Time>,
    rapier: ReadRapierContext,
    mut agents: Query<(Entity, &mut Locomotion, &mut PlayerController)>,
) {
    let Ok(context) = rapier.single() else {
        return;
    };
    let dt = time.delta_secs();

    for (entity, mut locomotion, mut controller) in agents.iter_mut() {
        let mut mover = RapierShapeMover::new(&context, &locomotion.config, locomotion.state().position)
            .excluding(entity);
        locomotion.update(&mut *controller, &mut mover, dt);
        controller.input_mut().clear_frame();
    }
}

/// Система: LocomotionState → Transform тела (позиция ног + yaw)
pub fn sync_agent_transforms(mut agents: Query<(&Locomotion, &mut Transform), Changed<Locomotion>>) {
    for (locomotion, mut transform) in agents.iter_mut() {
        let state = locomotion.state();
        transform.translation = state.position;
        transform.rotation = state.facing();
    }
}

/// Система: view anchor (камера) следует за controller.view()
pub fn sync_view_anchors(
    players: Query<(&PlayerController, &PlayerView)>,
    mut anchors: Query<&mut Transform, Without<Locomotion>>,
) {
    for (controller, view) in players.iter() {
        let Ok(mut transform) = anchors.get_mut(view.camera) else {
            continue;
        };
        *transform = controller.view();
    }
}

/// Система: поза оружия и его частей (локально к view anchor)
pub fn sync_weapon_poses(
    controllers: Query<&PlayerController>,
    mut weapons: Query<(&HeldWeapon, &mut Transform), Without<WeaponPart>>,
    mut parts: Query<(&WeaponPart, &mut Transform), Without<HeldWeapon>>,
) {
    for (weapon, mut transform) in weapons.iter_mut() {
        if let Ok(controller) = controllers.get(weapon.owner) {
            *transform = controller.weapon_pose();
        }
    }

    for (part, mut transform) in parts.iter_mut() {
        let Ok(controller) = controllers.get(part.owner) else {
            continue;
        };
        if let Some(animator) = controller.weapon().parts().get(part.index) {
            *transform = animator.pose();
        }
    }
}
