//! Text extent estimation and card geometry.
//!
//! Panels are sized before the rendering engine has measured any text, so
//! wrapping is estimated from character counts and an average glyph width.

mod card;
mod estimate;

pub use card::{
    fit_image, gallery_position, tag_offset, ExperienceCardLayout, ProjectCardLayout,
    DEFAULT_IMAGE_ASPECT, EXPERIENCE_BULLET_STYLE, EXPERIENCE_CARD_WIDTH, EXPERIENCE_PANEL,
    MAX_IMAGE_HEIGHT, MAX_IMAGE_WIDTH, PROJECT_CARD_WIDTH, PROJECT_DESCRIPTION_STYLE,
    PROJECT_PANEL, TAGS_PER_ROW,
};
pub use estimate::{estimate, estimate_item, wrapped_lines, LayoutEstimate, PanelMetrics, TextStyle};
