//! Weapon domain — procedural анимация оружия от первого лица
//!
//! Содержит:
//! - WeaponDefinition / PartDefinition (immutable, shared через Arc)
//! - RecoilEvent / RecoilStack (импульсы выстрелов)
//! - layers (семь чистых слоёв → WeaponOffset)
//! - WeaponAnimator (runtime state, fire/tick/animate)
//! - PartAnimator (затвор и прочие движущиеся части)

pub mod animator;
pub mod definition;
pub mod layers;
pub mod parts;
pub mod recoil;

pub use animator::{AnimatorState, WeaponAnimator, IDLE_PERIOD};
pub use definition::{PartDefinition, WeaponDefinition};
pub use layers::{CoherentNoise, LayerOffsets, MotionRatios, WeaponOffset};
pub use parts::PartAnimator;
pub use recoil::{RecoilEvent, RecoilStack};

#[cfg(test)]
mod animator_tests;
