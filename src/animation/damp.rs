use super::Animatable;
use crate::math::Vec3;

/// Fraction of the remaining distance to cover this frame under exponential
/// smoothing with time constant `smoothing` seconds.
///
/// Always in `[0, 1]`: a non-positive `delta` moves nothing, a non-positive
/// `smoothing` snaps to the target.
pub fn damp_factor(smoothing: f32, delta: f32) -> f32 {
    if delta.is_nan() || delta <= 0.0 {
        return 0.0;
    }
    if smoothing.is_nan() || smoothing <= 0.0 {
        return 1.0;
    }
    1.0 - (-delta / smoothing).exp()
}

/// One exponential smoothing step of `current` toward `target`.
///
/// Never overshoots, and repeated steps toward a fixed target converge.
pub fn damp<T: Animatable>(current: &T, target: &T, smoothing: f32, delta: f32) -> T {
    let t = damp_factor(smoothing, delta);
    if t >= 1.0 {
        return target.clone();
    }
    T::lerp(current, target, t)
}

/// Fixed-rate linear approach: moves `rate * delta` of the remaining
/// distance, capped so a long frame lands on the target instead of past it.
pub fn lerp_toward<T: Animatable>(current: &T, target: &T, rate: f32, delta: f32) -> T {
    let t = (rate * delta).clamp(0.0, 1.0);
    if t >= 1.0 {
        return target.clone();
    }
    T::lerp(current, target, t)
}

/// A position that chases a target with exponential damping.
///
/// The target can change every frame; the value is recomputed from where it
/// currently is, so retargeting mid-flight redirects without a jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampedVec3 {
    current: Vec3,
    target: Vec3,
    smoothing: f32,
}

impl DampedVec3 {
    pub fn new(initial: Vec3, smoothing: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            smoothing,
        }
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Jump straight to `value` (first layout, teleports).
    pub fn set_immediate(&mut self, value: Vec3) {
        self.current = value;
        self.target = value;
    }

    pub fn advance(&mut self, delta: f32) -> Vec3 {
        self.current = damp(&self.current, &self.target, self.smoothing, delta);
        self.current
    }

    pub fn current(&self) -> Vec3 {
        self.current
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn is_settled(&self, epsilon: f32) -> bool {
        self.current.distance(self.target) <= epsilon
    }
}
