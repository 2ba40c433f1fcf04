//! Player domain — агент под управлением input source
//!
//! Содержит:
//! - InputSource / InputState (абстракция устройств)
//! - AgentController (LocomotionAgent: view anchor, fire, weapon animate)
//! - ECS: компоненты, LocomotionPlugin, spawn_player

pub mod components;
pub mod controller;
pub mod input;
pub mod spawn;
pub mod systems;

pub use components::{HeldWeapon, PlayerView, WeaponPart};
pub use controller::{AgentController, ControlConfig, PlayerController};
pub use input::{InputSource, InputState};
pub use spawn::{spawn_player, PlayerEntities};
pub use systems::{
    drive_agents_on_ground_plane, drive_agents_with_rapier, sync_agent_transforms, sync_view_anchors,
    sync_weapon_poses, LocomotionPlugin, LocomotionSet, MoverBackend,
};
