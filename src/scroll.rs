//! Scroll progress, section anchors and nav-driven scroll commands.

use crate::animation::damp;
use crate::math::Vec3;

/// Scroll container configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollConfig {
    /// Content length in viewport heights, before `distance` is applied
    pub pages: f32,
    /// Smoothing time (s) of the displayed progress
    pub damping: f32,
    /// Scroll distance factor per page
    pub distance: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            pages: 4.0,
            damping: 0.2,
            distance: 0.4,
        }
    }
}

/// Scroll instruction for the host's scroll container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollCommand {
    /// Smooth-scroll the container so its top edge sits at `top` pixels
    SmoothTo { top: f32 },
}

/// A named scroll position that the nav bar can jump to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionAnchor {
    pub label: &'static str,
    /// Fraction of the scroll height
    pub fraction: f32,
}

pub const SECTION_ANCHORS: [SectionAnchor; 4] = [
    SectionAnchor {
        label: "About Me",
        fraction: 0.15,
    },
    SectionAnchor {
        label: "Experience",
        fraction: 0.35,
    },
    SectionAnchor {
        label: "Skills",
        fraction: 0.45,
    },
    SectionAnchor {
        label: "Projects",
        fraction: 0.75,
    },
];

pub fn anchor(label: &str) -> Option<&'static SectionAnchor> {
    SECTION_ANCHORS.iter().find(|a| a.label == label)
}

/// Label to highlight at `progress`: the last anchor at or above it.
pub fn active_section(progress: f32) -> Option<&'static str> {
    SECTION_ANCHORS
        .iter()
        .rev()
        .find(|a| a.fraction <= progress)
        .map(|a| a.label)
}

/// Fixed world placement of every section; only the scroll offset moves.
pub mod depths {
    use super::Vec3;

    pub const NAME: Vec3 = Vec3::new(0.0, 0.0, 12.0);
    pub const ABOUT_HEADING: Vec3 = Vec3::new(0.0, -2.0, 8.0);
    pub const ABOUT_BODY: Vec3 = Vec3::new(0.0, -2.4, 6.0);
    pub const EXPERIENCE_HEADING: Vec3 = Vec3::new(0.0, -5.8, 8.0);
    pub const EXPERIENCE: Vec3 = Vec3::new(0.0, -7.2, 6.0);
    pub const SKILLS_HEADING: Vec3 = Vec3::new(0.0, -10.0, 8.0);
    pub const SKILLS: Vec3 = Vec3::new(0.0, -10.8, 6.0);
    pub const PROJECTS_HEADING: Vec3 = Vec3::new(0.0, -12.0, 8.0);
    pub const PROJECTS: Vec3 = Vec3::new(0.0, -13.0, 6.0);
    pub const SOCIALS: Vec3 = Vec3::new(0.0, -16.0, 6.0);
}

/// Owns normalized scroll progress.
///
/// `on_scroll` sets the raw target from the container's pixel offset; the
/// progress read by the scene is damped toward it every frame.
#[derive(Debug, Clone)]
pub struct ScrollController {
    config: ScrollConfig,
    viewport_height: f32,
    target: f32,
    progress: f32,
}

impl ScrollController {
    pub fn new(config: ScrollConfig, viewport_height: f32) -> Self {
        Self {
            config,
            viewport_height: viewport_height.max(0.0),
            target: 0.0,
            progress: 0.0,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(0.0);
    }

    /// Total height (px) of the scroll container's content.
    pub fn scroll_height(&self) -> f32 {
        self.viewport_height * self.config.pages * self.config.distance
    }

    /// Largest reachable `scrollTop`.
    pub fn max_scroll(&self) -> f32 {
        (self.scroll_height() - self.viewport_height).max(0.0)
    }

    /// The container scrolled to `top` pixels.
    pub fn on_scroll(&mut self, top: f32) {
        let max = self.max_scroll();
        self.target = if max > 0.0 {
            (top / max).clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    pub fn update(&mut self, delta: f32) -> f32 {
        self.progress = damp(&self.progress, &self.target, self.config.damping, delta);
        self.progress
    }

    /// Damped progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Undamped progress from the latest scroll event.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Vertical distance (world units) the scrolled content has moved up.
    pub fn content_offset(&self, viewport_world_height: f32) -> f32 {
        self.progress * (self.config.pages - 1.0) * viewport_world_height
    }

    /// Scroll command for a nav label; `None` for labels without an anchor.
    pub fn navigate(&self, label: &str) -> Option<ScrollCommand> {
        let Some(anchor) = anchor(label) else {
            log::debug!("no scroll anchor for {:?}", label);
            return None;
        };
        Some(ScrollCommand::SmoothTo {
            top: self.scroll_height() * anchor.fraction,
        })
    }

    pub fn active_section(&self) -> Option<&'static str> {
        active_section(self.progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate() {
        let scroll = ScrollController::new(ScrollConfig::default(), 1000.0);
        assert_eq!(scroll.scroll_height(), 1600.0);
        assert_eq!(
            scroll.navigate("Projects"),
            Some(ScrollCommand::SmoothTo { top: 1200.0 })
        );
        assert_eq!(scroll.navigate("Contact"), None);
    }

    #[test]
    fn test_progress_is_damped_and_clamped() {
        let mut scroll = ScrollController::new(ScrollConfig::default(), 1000.0);
        scroll.on_scroll(5000.0);
        assert_eq!(scroll.target(), 1.0);

        let first = scroll.update(1.0 / 60.0);
        assert!(first > 0.0 && first < 1.0);
        for _ in 0..600 {
            scroll.update(1.0 / 60.0);
        }
        assert!((scroll.progress() - 1.0).abs() < 1e-4);

        scroll.on_scroll(-20.0);
        assert_eq!(scroll.target(), 0.0);
    }

    #[test]
    fn test_active_section() {
        assert_eq!(active_section(0.0), None);
        assert_eq!(active_section(0.15), Some("About Me"));
        assert_eq!(active_section(0.4), Some("Experience"));
        assert_eq!(active_section(1.0), Some("Projects"));
    }

    #[test]
    fn test_content_offset() {
        let mut scroll = ScrollController::new(ScrollConfig::default(), 800.0);
        scroll.on_scroll(scroll.max_scroll());
        scroll.update(10.0);
        assert!((scroll.content_offset(2.0) - 6.0).abs() < 1e-5);
    }
}
