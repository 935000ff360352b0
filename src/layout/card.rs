//! Card geometry for the experience and projects sections.
//!
//! Heights are sized from estimated text extents so the backing panel fits
//! its copy before the rendering engine has shaped any glyphs.

use super::estimate::{estimate, estimate_item, PanelMetrics, TextStyle};
use crate::math::Vec3;

pub const EXPERIENCE_CARD_WIDTH: f32 = 3.5;
const EXPERIENCE_TEXT_INSET: f32 = 0.2;

/// Bullet copy on the experience card: "• " prefix, 0.3 glyph ratio.
pub const EXPERIENCE_BULLET_STYLE: TextStyle = TextStyle::new(0.08, 0.3, 0.2).prefix(2);

pub const EXPERIENCE_PANEL: PanelMetrics = PanelMetrics {
    header: 1.0,
    padding: 0.4,
    min_height: 0.0,
};

/// Layout of an experience card with a title, a subtitle and bullet points.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceCardLayout {
    pub width: f32,
    pub height: f32,
    /// Estimated height of each bullet, in order
    pub bullet_heights: Vec<f32>,
}

impl ExperienceCardLayout {
    pub fn compute<S: AsRef<str>>(bullets: &[S]) -> Self {
        let text_width = Self::text_width();
        let bullet_heights: Vec<f32> = bullets
            .iter()
            .map(|b| estimate_item(b.as_ref(), &EXPERIENCE_BULLET_STYLE, text_width).height)
            .collect();
        let content: f32 = bullet_heights.iter().sum();

        Self {
            width: EXPERIENCE_CARD_WIDTH,
            height: EXPERIENCE_PANEL.height(content),
            bullet_heights,
        }
    }

    pub fn text_width() -> f32 {
        EXPERIENCE_CARD_WIDTH - 2.0 * EXPERIENCE_TEXT_INSET
    }

    pub fn title_y(&self) -> f32 {
        self.height / 2.0 - 0.3
    }

    pub fn subtitle_y(&self) -> f32 {
        self.height / 2.0 - 0.6
    }

    /// Left edge of the bullet column.
    pub fn bullet_x(&self) -> f32 {
        -self.width / 2.0 + EXPERIENCE_TEXT_INSET
    }

    /// Top of bullet `index`: stacked under the header by the heights of
    /// every bullet before it.
    pub fn bullet_y(&self, index: usize) -> f32 {
        let above: f32 = self.bullet_heights.iter().take(index).sum();
        self.height / 2.0 - EXPERIENCE_PANEL.header - above
    }
}

pub const PROJECT_CARD_WIDTH: f32 = 2.0;
const PROJECT_TEXT_INSET: f32 = 0.2;
pub const PROJECT_DESCRIPTION_STYLE: TextStyle = TextStyle::new(0.07, 0.4, 0.15);
pub const TAGS_PER_ROW: usize = 3;
const TAG_ROW_HEIGHT: f32 = 0.25;
const TAG_SPACING: f32 = 0.6;

pub const PROJECT_PANEL: PanelMetrics = PanelMetrics {
    header: 1.5,
    padding: 0.0,
    min_height: 2.7,
};

/// Layout of a project card: image, title, description and tech tags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectCardLayout {
    pub width: f32,
    pub height: f32,
    pub description_height: f32,
    pub tag_rows: usize,
}

impl ProjectCardLayout {
    pub fn compute(description: &str, tag_count: usize) -> Self {
        let text_width = PROJECT_CARD_WIDTH - 2.0 * PROJECT_TEXT_INSET;
        let description_height = estimate(&[description], &PROJECT_DESCRIPTION_STYLE, text_width).height;
        let tag_rows = tag_count.div_ceil(TAGS_PER_ROW);
        let content = description_height + tag_rows as f32 * TAG_ROW_HEIGHT;

        Self {
            width: PROJECT_CARD_WIDTH,
            height: PROJECT_PANEL.height(content),
            description_height,
            tag_rows,
        }
    }

    pub fn image_y(&self) -> f32 {
        self.height / 2.0 - 0.7
    }

    pub fn title_y(&self) -> f32 {
        self.height / 2.0 - 1.3
    }

    pub fn description_y(&self) -> f32 {
        self.height / 2.0 - 1.45
    }

    pub fn tags_y(&self) -> f32 {
        self.height / 2.0 - 1.5 - self.description_height
    }

    /// y of the link buttons along the bottom edge.
    pub fn actions_y(&self) -> f32 {
        -self.height / 2.0 + 0.3
    }
}

/// Offset of tag `index` of `total` inside the tag block; each row is
/// centered on its own item count.
pub fn tag_offset(index: usize, total: usize) -> (f32, f32) {
    let row = index / TAGS_PER_ROW;
    let col = index % TAGS_PER_ROW;
    let in_row = TAGS_PER_ROW.min(total.saturating_sub(row * TAGS_PER_ROW)).max(1);
    let x = (col as f32 - (in_row as f32 - 1.0) / 2.0) * TAG_SPACING;
    (x, -(row as f32) * TAG_ROW_HEIGHT)
}

pub const MAX_IMAGE_WIDTH: f32 = 1.7;
pub const MAX_IMAGE_HEIGHT: f32 = 0.9;
pub const DEFAULT_IMAGE_ASPECT: f32 = 16.0 / 9.0;

/// Fit an image of `aspect` (width / height) inside the card's image box.
///
/// Images wider than the box fit its width, others fit its height.
pub fn fit_image(aspect: f32) -> (f32, f32) {
    let aspect = if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        DEFAULT_IMAGE_ASPECT
    };
    if aspect > MAX_IMAGE_WIDTH / MAX_IMAGE_HEIGHT {
        (MAX_IMAGE_WIDTH, MAX_IMAGE_WIDTH / aspect)
    } else {
        (MAX_IMAGE_HEIGHT * aspect, MAX_IMAGE_HEIGHT)
    }
}

const GALLERY_SPACING: f32 = 2.8;

/// Resting position of card `index` of `count` in the projects row:
/// centered, alternating heights, featured cards pulled forward.
pub fn gallery_position(index: usize, count: usize, featured: bool) -> Vec3 {
    let center = count.saturating_sub(1) as f32 * 0.5;
    let x = (index as f32 - center) * GALLERY_SPACING;
    let y = if index % 2 == 0 { 0.0 } else { -0.3 };
    let z = if featured { 0.2 } else { 0.0 };
    Vec3::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_experience_card_grows_with_bullets() {
        let empty: [&str; 0] = [];
        let base = ExperienceCardLayout::compute(&empty);
        assert!(approx(base.height, 1.4));

        let one = ExperienceCardLayout::compute(&["short"]);
        assert!(approx(one.height, 1.6));

        let long = "word ".repeat(60);
        let two = ExperienceCardLayout::compute(&["short", long.as_str()]);
        // 302 chars at 129 per line wraps to 3 lines
        assert!(approx(two.bullet_heights[1], 0.6));
        assert!(approx(two.height, 2.2));
    }

    #[test]
    fn test_bullet_positions_stack() {
        let card = ExperienceCardLayout::compute(&["a", "b", "c"]);
        assert!(approx(card.bullet_y(0), card.height / 2.0 - 1.0));
        assert!(approx(card.bullet_y(2), card.bullet_y(0) - 0.4));
        assert!(approx(card.bullet_x(), -1.55));
    }

    #[test]
    fn test_project_card_min_height() {
        let card = ProjectCardLayout::compute("tiny", 2);
        assert_eq!(card.height, 2.7);
        assert_eq!(card.tag_rows, 1);
    }

    #[test]
    fn test_project_card_tall_description() {
        // 57 chars per line at 0.028 per glyph over 1.6
        let text = "x".repeat(57 * 10);
        let card = ProjectCardLayout::compute(&text, 5);
        assert!(approx(card.description_height, 1.5));
        assert!(approx(card.height, 1.5 + 1.5 + 0.5));
        assert!(approx(card.tags_y(), card.height / 2.0 - 3.0));
    }

    #[test]
    fn test_tag_rows_center_each_row() {
        assert_eq!(tag_offset(0, 5), (-0.6, 0.0));
        assert!(approx(tag_offset(2, 5).0, 0.6));
        // Second row has two tags
        let (x, y) = tag_offset(3, 5);
        assert!(approx(x, -0.3));
        assert!(approx(y, -0.25));
        assert_eq!(tag_offset(0, 1), (0.0, 0.0));
    }

    #[test]
    fn test_fit_image() {
        let (w, h) = fit_image(16.0 / 9.0);
        assert!(approx(w, 1.6) && approx(h, 0.9));
        let (w, h) = fit_image(4.0);
        assert!(approx(w, 1.7) && approx(h, 0.425));
        assert_eq!(fit_image(f32::NAN), fit_image(DEFAULT_IMAGE_ASPECT));
    }

    #[test]
    fn test_gallery_positions() {
        assert_eq!(gallery_position(0, 3, false), Vec3::new(-2.8, 0.0, 0.0));
        assert_eq!(gallery_position(1, 3, true), Vec3::new(0.0, -0.3, 0.2));
        assert_eq!(gallery_position(0, 1, false), Vec3::ZERO);
    }
}
