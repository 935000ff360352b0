/// Endless horizontal scroll of a strip whose content is rendered twice,
/// back to back.
///
/// The offset moves left by `speed` world units per second. Once a whole
/// copy has scrolled past (`offset <= -content_width`) one content width is
/// added back rather than resetting to zero, so a wrap detected a little late
/// keeps its overshoot and the second copy lines up exactly where the first
/// one was.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopingScroll {
    offset: f32,
    speed: f32,
    content_width: f32,
}

impl LoopingScroll {
    pub fn new(content_width: f32, speed: f32) -> Self {
        Self {
            offset: 0.0,
            speed,
            content_width,
        }
    }

    pub fn advance(&mut self, delta: f32) -> f32 {
        if self.content_width <= 0.0 || delta <= 0.0 {
            return self.offset;
        }
        self.offset -= delta * self.speed;
        if self.offset <= -self.content_width {
            self.offset = -((-self.offset).rem_euclid(self.content_width));
        }
        self.offset
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn content_width(&self) -> f32 {
        self.content_width
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Time for one full copy to scroll past.
    pub fn period(&self) -> f32 {
        if self.speed == 0.0 {
            f32::INFINITY
        } else {
            self.content_width / self.speed.abs()
        }
    }

    /// Update the width after the item list changes; the offset is folded
    /// back into the new range.
    pub fn set_content_width(&mut self, content_width: f32) {
        self.content_width = content_width;
        if content_width > 0.0 {
            self.offset = self.offset % content_width;
        } else {
            self.offset = 0.0;
        }
    }
}

/// X positions for `count` items laid out twice (2 * count slots) at
/// `spacing`, starting at `-lead_in`.
pub fn duplicated_positions(count: usize, spacing: f32, lead_in: f32) -> Vec<f32> {
    (0..count * 2)
        .map(|slot| slot as f32 * spacing - lead_in)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapped(v: f32, period: f32) -> f32 {
        let r = v.rem_euclid(period);
        if (period - r).abs() < 1e-3 {
            0.0
        } else {
            r
        }
    }

    #[test]
    fn test_offset_stays_in_range() {
        let mut scroll = LoopingScroll::new(18.0, 0.5);
        for _ in 0..10_000 {
            let o = scroll.advance(1.0 / 60.0);
            assert!(o > -18.0 && o <= 0.0);
        }
    }

    #[test]
    fn test_periodic_after_one_period() {
        let mut scroll = LoopingScroll::new(18.0, 0.5);
        scroll.advance(0.37);
        let start = scroll.offset();

        // Uneven frame times that sum to exactly one period (36 s)
        let mut remaining = scroll.period();
        let frames = [0.016f32, 0.033, 0.007, 0.05];
        let mut i = 0;
        while remaining > 0.0 {
            let dt = frames[i % frames.len()].min(remaining);
            scroll.advance(dt);
            remaining -= dt;
            i += 1;
        }

        let a = wrapped(start, 18.0);
        let b = wrapped(scroll.offset(), 18.0);
        assert!((a - b).abs() < 1e-2, "start {} end {}", start, scroll.offset());
    }

    #[test]
    fn test_late_wrap_keeps_overshoot() {
        let mut scroll = LoopingScroll::new(10.0, 1.0);
        scroll.advance(9.5);
        // A long frame crosses the wrap point by 1.5 units
        let o = scroll.advance(2.0);
        assert!((o - (-1.5)).abs() < 1e-5);
    }

    #[test]
    fn test_long_stall_wraps_many_widths() {
        let mut scroll = LoopingScroll::new(10.0, 1.0);
        // 123.25 units of travel is 12 whole copies plus 3.25
        let o = scroll.advance(123.25);
        assert!((o - (-3.25)).abs() < 1e-3);
        let o = scroll.advance(6.75);
        assert!(o > -10.0 && o <= 0.0);
        assert!(o.abs() < 1e-3);
    }

    #[test]
    fn test_zero_width_is_inert() {
        let mut scroll = LoopingScroll::new(0.0, 1.0);
        assert_eq!(scroll.advance(1.0), 0.0);
    }

    #[test]
    fn test_duplicated_positions() {
        let xs = duplicated_positions(3, 1.5, 6.0);
        assert_eq!(xs.len(), 6);
        assert_eq!(xs[0], -6.0);
        assert_eq!(xs[3] - xs[0], 3.0 * 1.5);
    }
}
