//! Frame-rate independent animation primitives.
//!
//! Every primitive here is advanced with real elapsed seconds, never a frame
//! count, so motion speed is identical at 30, 60 or 144 fps.
//!
//! - [`damp`] / [`DampedVec3`]: exponential smoothing toward a moving target
//! - [`lerp_toward`]: fixed-rate linear approach used by hover and entrance scale
//! - [`StaggeredFade`]: cascading per-item opacity with a per-trigger start time
//! - [`LoopingScroll`]: seamless horizontal marquee over duplicated content
//! - [`IdleFloat`] / [`HoverWobble`]: bounded periodic decoration

mod animatable;
mod damp;
mod float;
mod marquee;
mod stagger;
mod timing;

pub use animatable::Animatable;
pub use damp::{damp, damp_factor, lerp_toward, DampedVec3};
pub use float::{HoverWobble, IdleFloat};
pub use marquee::{duplicated_positions, LoopingScroll};
pub use stagger::StaggeredFade;
pub use timing::Easing;

/// Approach rate (1/s) for hover-grow feedback.
pub const HOVER_SCALE_RATE: f32 = 8.0;
/// Approach rate (1/s) for card entrance scale.
pub const ENTRANCE_SCALE_RATE: f32 = 6.0;
/// Approach rate (1/s) for rotations settling back to rest.
pub const ROTATION_SETTLE_RATE: f32 = 4.0;
/// Smoothing time (s) for pointer-following surfaces.
pub const POINTER_FOLLOW_SMOOTHING: f32 = 0.15;
