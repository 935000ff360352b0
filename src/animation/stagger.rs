use super::Easing;

/// Cascading opacity fade-in for an ordered list of elements.
///
/// Item `i` starts fading `i * per_item_delay` seconds after the trigger and
/// reaches full opacity `fade_duration` seconds later. The trigger timestamp
/// is captured once in [`StaggeredFade::trigger`]; evaluating opacity every
/// frame never restarts the cascade.
#[derive(Debug, Clone)]
pub struct StaggeredFade {
    per_item_delay: f32,
    fade_duration: f32,
    easing: Easing,
    started_at: Option<f32>,
}

impl StaggeredFade {
    pub const DEFAULT_ITEM_DELAY: f32 = 0.1;
    pub const DEFAULT_FADE_DURATION: f32 = 0.5;

    pub fn new(per_item_delay: f32, fade_duration: f32) -> Self {
        Self {
            per_item_delay: per_item_delay.max(0.0),
            fade_duration,
            easing: Easing::Linear,
            started_at: None,
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Restart the cascade from `now` (seconds on the frame clock).
    pub fn trigger(&mut self, now: f32) {
        log::debug!("stagger triggered at {:.3}s", now);
        self.started_at = Some(now);
    }

    /// Forget the trigger; every item reports zero opacity until the next one.
    pub fn reset(&mut self) {
        self.started_at = None;
    }

    pub fn started_at(&self) -> Option<f32> {
        self.started_at
    }

    /// Opacity of item `index` at time `now`.
    pub fn opacity(&self, index: usize, now: f32) -> f32 {
        let Some(start) = self.started_at else {
            return 0.0;
        };
        let local = now - start - index as f32 * self.per_item_delay;
        if local <= 0.0 {
            return 0.0;
        }
        if self.fade_duration <= 0.0 {
            return 1.0;
        }
        let progress = (local / self.fade_duration).clamp(0.0, 1.0);
        self.easing.apply(progress)
    }

    /// True once the last of `count` items is fully opaque.
    pub fn is_complete(&self, count: usize, now: f32) -> bool {
        match self.started_at {
            None => false,
            Some(start) => {
                let last = count.saturating_sub(1) as f32;
                now - start >= last * self.per_item_delay + self.fade_duration
            }
        }
    }
}

impl Default for StaggeredFade {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ITEM_DELAY, Self::DEFAULT_FADE_DURATION)
    }
}
