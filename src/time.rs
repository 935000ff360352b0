use std::time::{Duration, Instant};

/// Frame timing snapshot handed to every per-frame update.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Monotonic frame counter.
    pub frame_index: u64,
}

impl FrameTime {
    pub fn new(delta: f32, elapsed: f32) -> Self {
        Self {
            delta,
            elapsed,
            frame_index: 0,
        }
    }

    /// A run of `count` frames at a fixed rate, starting right after `start`.
    pub fn fixed_steps(start: f32, rate_hz: f32, count: usize) -> impl Iterator<Item = FrameTime> {
        let delta = 1.0 / rate_hz;
        (1..=count).map(move |i| FrameTime {
            delta,
            elapsed: start + delta * i as f32,
            frame_index: i as u64,
        })
    }
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so a debugger pause, a minimized window or a stall
/// does not make damped values jump straight to their targets in one frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            origin: now,
            last: now,
            frame_index: 0,
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
        }
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            dt_min,
            dt_max,
            ..Self::new()
        }
    }

    /// Resets the delta baseline (after a suspend or a surface reconfigure).
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime {
            delta: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.origin).as_secs_f32(),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_clamps_delta() {
        let mut clock = FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(50));
        let ft = clock.tick();
        assert!(ft.delta >= 0.001 && ft.delta <= 0.05);
        assert_eq!(ft.frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
    }

    #[test]
    fn test_fixed_steps() {
        let frames: Vec<FrameTime> = FrameTime::fixed_steps(1.0, 50.0, 3).collect();
        assert_eq!(frames.len(), 3);
        assert!((frames[2].elapsed - 1.06).abs() < 1e-5);
        assert!((frames[0].delta - 0.02).abs() < 1e-7);
    }
}
