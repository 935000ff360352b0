/// Parameters of the glyph-ratio wrap heuristic for one text style.
///
/// The glyph ratio is tuned per style and deliberately not shared: bullet
/// copy uses 0.3, project descriptions 0.4.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    /// Average glyph advance as a fraction of the font size
    pub glyph_ratio: f32,
    pub line_height: f32,
    /// Characters prepended to every item (e.g. a bullet and a space)
    pub prefix_chars: usize,
}

impl TextStyle {
    pub const fn new(font_size: f32, glyph_ratio: f32, line_height: f32) -> Self {
        Self {
            font_size,
            glyph_ratio,
            line_height,
            prefix_chars: 0,
        }
    }

    pub const fn prefix(mut self, chars: usize) -> Self {
        self.prefix_chars = chars;
        self
    }

    pub fn glyph_width(&self) -> f32 {
        self.font_size * self.glyph_ratio
    }

    /// Whole characters fitting on one line, never less than one.
    pub fn chars_per_line(&self, container_width: f32) -> usize {
        let glyph = self.glyph_width();
        if glyph.is_nan() || glyph <= 0.0 {
            return usize::MAX;
        }
        let fit = (container_width / glyph).floor();
        if fit.is_nan() || fit < 1.0 {
            1
        } else if fit >= usize::MAX as f32 {
            usize::MAX
        } else {
            fit as usize
        }
    }
}

/// Estimated wrapped extent of a block of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutEstimate {
    pub lines: usize,
    pub height: f32,
}

impl LayoutEstimate {
    pub const EMPTY: LayoutEstimate = LayoutEstimate {
        lines: 0,
        height: 0.0,
    };
}

impl std::ops::Add for LayoutEstimate {
    type Output = LayoutEstimate;

    fn add(self, rhs: Self) -> Self {
        LayoutEstimate {
            lines: self.lines + rhs.lines,
            height: self.height + rhs.height,
        }
    }
}

/// Lines a single item of `char_count` characters wraps to.
pub fn wrapped_lines(char_count: usize, style: &TextStyle, container_width: f32) -> usize {
    if char_count == 0 {
        return 0;
    }
    let per_line = style.chars_per_line(container_width);
    (char_count + style.prefix_chars).div_ceil(per_line)
}

/// Estimate one item.
pub fn estimate_item(text: &str, style: &TextStyle, container_width: f32) -> LayoutEstimate {
    let lines = wrapped_lines(text.chars().count(), style, container_width);
    LayoutEstimate {
        lines,
        height: lines as f32 * style.line_height,
    }
}

/// Estimate a list of items laid out one after another.
pub fn estimate<S: AsRef<str>>(items: &[S], style: &TextStyle, container_width: f32) -> LayoutEstimate {
    items
        .iter()
        .map(|item| estimate_item(item.as_ref(), style, container_width))
        .fold(LayoutEstimate::EMPTY, |acc, e| acc + e)
}

/// Fixed chrome around an estimated text block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelMetrics {
    pub header: f32,
    pub padding: f32,
    pub min_height: f32,
}

impl PanelMetrics {
    /// `header + content + padding`, clamped to the minimum height.
    pub fn height(&self, content: f32) -> f32 {
        (self.header + content + self.padding).max(self.min_height)
    }
}
