//! Easing curves applied to normalized progress.

/// Reshapes progress in `[0, 1]`. Both curves map 0 to 0 and 1 to exactly 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// `1 - (1 - t)^3`: fast start, soft arrival
    EaseOutCubic,
}

impl Easing {
    /// Eased value of `t`, clamped to `[0, 1]` first.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => {
                let rest = 1.0 - t;
                1.0 - rest * rest * rest
            }
        }
    }
}
