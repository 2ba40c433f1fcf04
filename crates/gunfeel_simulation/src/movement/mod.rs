//! Movement domain — locomotion агента
//!
//! Содержит:
//! - AgentConfig (тюнинги капсулы и движения)
//! - LocomotionState (position, velocity, rotation, grounded)
//! - Locomotion (per-frame velocity integration, jump debounce)
//! - LocomotionAgent / CollisionMover (capability hooks)

pub mod config;
pub mod hooks;
pub mod locomotion;
pub mod state;

pub use config::AgentConfig;
pub use hooks::{CollisionMover, LocomotionAgent};
pub use locomotion::{Locomotion, GRAVITY, GROUND_STICK_RATE, GROUND_STICK_VELOCITY, JUMP_DEBOUNCE};
pub use state::{facing_from_yaw, rotate_to_world, LocomotionState, PITCH_LIMIT};
