//! Animation primitives — кривые и сглаживание
//!
//! Содержит:
//! - ResponseCurve (time-keyed кривая отклика, Hermite)
//! - lerp / smooth_damp / clamp helpers (reused locomotion + weapon)

pub mod curve;
pub mod smoothing;

pub use curve::{Keyframe, ResponseCurve};
pub use smoothing::*;
