//! Physics module — collision-aware move primitives для Locomotion
//!
//! Два backend'а одного контракта (CollisionMover):
//! - GroundPlaneMover: бесконечный пол на заданной высоте (headless, тесты)
//! - RapierShapeMover: shape-cast капсулы через Rapier query pipeline (client)

pub mod ground_plane;
pub mod rapier_mover;

pub use ground_plane::{GroundPlane, GroundPlaneMover};
pub use rapier_mover::{agent_capsule, capsule_center, RapierShapeMover, SKIN_WIDTH};
