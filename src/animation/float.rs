use super::{lerp_toward, ROTATION_SETTLE_RATE};

/// Small periodic bob, purely decorative.
///
/// The value is a closed-form function of elapsed time, so it cannot drift:
/// it is always within `[-amplitude, amplitude]` and repeats every
/// `2π / frequency` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleFloat {
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
}

impl IdleFloat {
    pub const fn new(amplitude: f32, frequency: f32, phase: f32) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
        }
    }

    pub fn offset(&self, elapsed: f32) -> f32 {
        self.amplitude * (elapsed * self.frequency + self.phase).sin()
    }

    pub fn with_phase(self, phase: f32) -> Self {
        Self { phase, ..self }
    }
}

/// Side-to-side rotation while hovered, settling back to rest otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverWobble {
    pub amplitude: f32,
    pub frequency: f32,
}

impl HoverWobble {
    pub const CARD: HoverWobble = HoverWobble {
        amplitude: 0.1,
        frequency: 3.0,
    };

    /// Next rotation given the current one.
    pub fn update(&self, current: f32, hovered: bool, elapsed: f32, delta: f32) -> f32 {
        if hovered {
            (elapsed * self.frequency).sin() * self.amplitude
        } else {
            lerp_toward(&current, &0.0, ROTATION_SETTLE_RATE, delta)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_is_bounded_and_periodic() {
        let f = IdleFloat::new(0.05, 0.5, 1.3);
        let period = std::f32::consts::TAU / 0.5;
        for i in 0..500 {
            let t = i as f32 * 0.173;
            let v = f.offset(t);
            assert!(v.abs() <= 0.05 + 1e-6);
            assert!((v - f.offset(t + period)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_wobble_settles_when_not_hovered() {
        let w = HoverWobble::CARD;
        let mut r = w.update(0.0, true, 0.4, 0.016);
        assert!(r.abs() > 0.0);
        for _ in 0..600 {
            r = w.update(r, false, 0.0, 1.0 / 60.0);
        }
        assert!(r.abs() < 1e-4);
    }
}
